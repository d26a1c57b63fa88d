//! Bookclub Core - coordination services for the bookclub web app
//!
//! - [`modal`]: one shared alert/error/confirm dialog with an awaitable answer
//! - [`sdk`]: load-once loader for the third-party map SDK
//! - [`places`]: meeting place search on top of the loaded SDK
//! - [`context`]: composition root owning the shared instances
//! - [`config`]: YAML configuration

pub mod config;
pub mod context;
pub mod modal;
pub mod places;
pub mod sdk;

pub use context::AppContext;
