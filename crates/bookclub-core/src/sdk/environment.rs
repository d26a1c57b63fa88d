//! Seams between the loader and the outside world
//!
//! The loader never touches a script tag or a socket itself. The host
//! environment (a browser binding, or a fake in tests) implements
//! [`SdkEnvironment`]; the diagnostic request goes through [`StatusProbe`].

use super::error::{ProbeError, ScriptLoadFailed};
use async_trait::async_trait;
use url::Url;

/// Where the SDK script runs
#[async_trait]
pub trait SdkEnvironment: Send + Sync {
    /// Whether the SDK's global namespace is already populated
    fn is_loaded(&self) -> bool;

    /// Insert the script for `url` and wait for its load or error event
    async fn inject_script(&self, url: &Url) -> Result<(), ScriptLoadFailed>;

    /// Run the SDK's own `load(callback)` entry point, returning once the
    /// callback has fired
    async fn initialize(&self);
}

/// Reads back the HTTP status of the script endpoint after a failed load
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn probe(&self, url: &Url) -> Result<u16, ProbeError>;
}
