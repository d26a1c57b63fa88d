//! YAML config file I/O
//!
//! Any `serde` type can be read or written here. Reading never fails:
//! a missing or broken file falls back to `T::default()` so the app can
//! always start.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load a config file, falling back to defaults
///
/// A missing file is normal on first launch and is logged at info level.
/// An unreadable or unparsable file is logged as a warning.
///
/// # Example
///
/// ```ignore
/// let config: AppConfig = load_config(&default_config_path());
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    log::debug!("load_config: reading {:?}", path);

    if !path.exists() {
        log::info!("load_config: {:?} not found, using defaults", path);
        return T::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("load_config: cannot read {:?}: {}, using defaults", path, e);
            return T::default();
        }
    };

    match serde_yaml::from_str::<T>(&contents) {
        Ok(config) => {
            log::info!("load_config: loaded {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: invalid YAML in {:?}: {}, using defaults", path, e);
            T::default()
        }
    }
}

/// Write a config file as YAML
///
/// Parent directories are created as needed.
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, MapSdkConfig};

    #[test]
    fn test_missing_file_gives_defaults() {
        let config: AppConfig = load_config(Path::new("/nonexistent/bookclub/config.yaml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_yaml_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "map_sdk: [not, a, map").unwrap();

        let config: AppConfig = load_config(&path);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_saved_config_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = AppConfig {
            map_sdk: MapSdkConfig {
                app_key: "abc123".to_string(),
                libraries: vec!["services".to_string(), "clusterer".to_string()],
                ..MapSdkConfig::default()
            },
        };

        save_config(&config, &path).unwrap();
        let loaded: AppConfig = load_config(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "map_sdk:\n  app_key: from-file\n").unwrap();

        let config: AppConfig = load_config(&path);
        assert_eq!(config.map_sdk.app_key, "from-file");
        assert_eq!(config.map_sdk.endpoint, MapSdkConfig::default().endpoint);
        assert_eq!(config.map_sdk.libraries, vec!["services".to_string()]);
    }
}
