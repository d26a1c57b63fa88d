//! Map SDK configuration
//!
//! Describes where the third-party map SDK script lives and which key and
//! libraries it is requested with. The loader turns this into the script URL.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment variable that overrides [`MapSdkConfig::app_key`]
pub const APP_KEY_ENV: &str = "BOOKCLUB_MAP_APP_KEY";

/// Map SDK configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSdkConfig {
    /// Script endpoint, without query parameters
    /// Default: the Kakao Maps JavaScript SDK
    pub endpoint: String,

    /// Application key sent as `appkey`
    pub app_key: String,

    /// Optional SDK libraries, joined with commas
    /// Default: `services` (keyword place search)
    pub libraries: Vec<String>,

    /// Timeout for the diagnostic status request made after a failed load
    /// Default: 10 seconds
    pub probe_timeout_secs: u64,
}

impl Default for MapSdkConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://dapi.kakao.com/v2/maps/sdk.js".to_string(),
            app_key: String::new(),
            libraries: vec!["services".to_string()],
            probe_timeout_secs: 10,
        }
    }
}

impl MapSdkConfig {
    /// Replace the app key with `BOOKCLUB_MAP_APP_KEY` when it is set
    pub fn with_env_overrides(self) -> Self {
        let key = std::env::var(APP_KEY_ENV).ok();
        self.with_app_key_override(key.as_deref())
    }

    /// Blank overrides are ignored
    fn with_app_key_override(mut self, key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some(key) if !key.is_empty() => {
                log::info!("{} set, overriding configured map app key", APP_KEY_ENV);
                self.app_key = key.to_string();
            }
            _ => {
                if self.app_key.is_empty() {
                    log::warn!("No map app key configured (set {} or map_sdk.app_key)", APP_KEY_ENV);
                }
            }
        }
        self
    }

    /// Build the script URL
    ///
    /// `autoload=false` is always appended so the SDK waits for an explicit
    /// `load(callback)` call instead of initializing itself on download.
    pub fn script_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.endpoint)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("appkey", &self.app_key);
            if !self.libraries.is_empty() {
                query.append_pair("libraries", &self.libraries.join(","));
            }
            query.append_pair("autoload", "false");
        }
        Ok(url)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Mask an app key for display, keeping the first four characters
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        "*".repeat(key.chars().count())
    } else {
        format!("{}{}", visible, "*".repeat(key.chars().count() - 4))
    }
}
