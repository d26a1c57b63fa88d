//! bookclub-sdk-check - verify the map SDK endpoint and app key
//!
//! Requests the configured script URL once and prints what the app would
//! show a user if the script failed to load. Useful after rotating the app
//! key or registering a new domain.
//!
//! ## Usage
//!
//! ```sh
//! bookclub-sdk-check                 # default config path
//! bookclub-sdk-check ./config.yaml   # explicit config
//! BOOKCLUB_MAP_APP_KEY=... bookclub-sdk-check
//! bookclub-sdk-check --init          # write the default config to edit
//! ```
//!
//! Exits with status 1 when the endpoint is not usable.

use anyhow::{Context, Result};
use bookclub_core::config::{
    default_config_path, load_config, mask_key, save_config, AppConfig, MapSdkConfig,
};
use bookclub_core::sdk::{HttpStatusProbe, ProbeError, SdkLoadError, StatusProbe};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let (init, config_path) = parse_args(std::env::args().skip(1));

    if init {
        save_config(&AppConfig::default(), &config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let config: AppConfig = load_config(&config_path);
    let map_sdk = config.with_env_overrides().map_sdk;

    let url = map_sdk
        .script_url()
        .with_context(|| format!("Invalid map SDK endpoint: {:?}", map_sdk.endpoint))?;
    let shown = MapSdkConfig {
        app_key: mask_key(&map_sdk.app_key),
        ..map_sdk.clone()
    };
    println!("Map SDK: {}", shown.script_url()?);

    let probe = HttpStatusProbe::new(map_sdk.probe_timeout())
        .context("Failed to build HTTP client")?;

    match classify(probe.probe(&url).await) {
        Ok(status) => {
            println!("reachable (HTTP {})", status);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// `[--init] [config.yaml]`
fn parse_args(args: impl Iterator<Item = String>) -> (bool, PathBuf) {
    let mut args = args.peekable();
    let init = args.next_if(|arg| arg == "--init").is_some();
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(default_config_path);
    (init, config_path)
}

/// Turn a probe outcome into the loader's view of it
fn classify(outcome: Result<u16, ProbeError>) -> Result<u16, SdkLoadError> {
    match outcome {
        Ok(status) if (200..300).contains(&status) => Ok(status),
        Ok(status) => Err(SdkLoadError::from_status(status)),
        Err(e) => {
            log::warn!("{}", e);
            Err(SdkLoadError::NetworkUnreachable)
        }
    }
}
