//! Modal coordinator error types

use thiserror::Error;

/// Errors returned by the modal coordinator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// A pending confirm was replaced by a newer modal (or the coordinator
    /// went away) before the user answered
    #[error("Confirm dialog was superseded before it was answered")]
    Superseded,

    /// A click referred to a modal that is no longer open
    #[error("Modal {ticket} is no longer open")]
    Stale { ticket: u64 },

    /// A click referred to a button the open modal does not have
    #[error("Modal has no button at index {index}")]
    UnknownButton { index: usize },
}
