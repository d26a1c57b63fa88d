//! Standard config file locations

use std::path::PathBuf;

/// Directory holding bookclub configuration
///
/// Returns: `{config_dir}/bookclub` (e.g. `~/.config/bookclub` on Linux),
/// or `./bookclub` when the platform has no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookclub")
}

/// Default path of the main config file: `{config_dir}/bookclub/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}
