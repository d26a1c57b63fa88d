//! Configuration for the bookclub core
//!
//! - Generic YAML config loading/saving
//! - Standard config paths
//! - Map SDK endpoint and key
//!
//! # Usage
//!
//! ```ignore
//! use bookclub_core::config::{load_config, default_config_path, AppConfig};
//!
//! let config: AppConfig = load_config(&default_config_path());
//! let config = config.with_env_overrides();
//! let url = config.map_sdk.script_url()?;
//! ```

mod io;
mod map_sdk;
mod paths;

use serde::{Deserialize, Serialize};

pub use io::{load_config, save_config};
pub use map_sdk::{mask_key, MapSdkConfig, APP_KEY_ENV};
pub use paths::{default_config_dir, default_config_path};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Third-party map SDK settings
    pub map_sdk: MapSdkConfig,
}

impl AppConfig {
    /// Apply environment overrides to every section
    pub fn with_env_overrides(self) -> Self {
        Self {
            map_sdk: self.map_sdk.with_env_overrides(),
        }
    }
}
