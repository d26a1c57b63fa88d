//! Third-party map SDK loading
//!
//! The place-search feature needs the map SDK's keyword search. The SDK is a
//! remote script that must be injected and then initialized explicitly
//! (`autoload=false`). [`SdkLoader`] makes sure that happens once, however
//! many callers ask at the same time, and turns failures into
//! [`SdkLoadError`]s that can be shown to the user.
//!
//! # Usage
//!
//! ```ignore
//! use bookclub_core::sdk::{HttpStatusProbe, SdkLoader};
//!
//! let loader = SdkLoader::new(config.map_sdk.script_url()?, environment, Arc::new(probe));
//!
//! // Any number of components may do this concurrently
//! if let Err(e) = loader.load().await {
//!     modals.open_error("지도를 불러오지 못했습니다", e.to_string(), None);
//! }
//! ```

mod environment;
mod error;
mod loader;
mod probe;

pub use environment::{SdkEnvironment, StatusProbe};
pub use error::{ProbeError, ScriptLoadFailed, SdkLoadError};
pub use loader::{SdkLoad, SdkLoader};
pub use probe::HttpStatusProbe;

#[cfg(test)]
pub(crate) use loader::test_support;
#[cfg(test)]
pub(crate) use probe::test_server;
