//! Global modal coordination
//!
//! Any component can raise an alert, an error or a yes/no question without
//! owning dialog visibility state. A single rendering host, mounted once at
//! the application root, draws [`ModalState`] and reports gestures back
//! through [`ModalCoordinator::click`].
//!
//! # State machine
//!
//! ```text
//!            open_*()                     open_*() (replace)
//!  Closed ─────────────► Open(kind) ◄──────────────┐
//!    ▲                      │  │                   │
//!    │  close() / click()   │  └───────────────────┘
//!    └──────────────────────┘
//! ```
//!
//! At most one modal is open. Replacing an unanswered confirm rejects it
//! with [`ModalError::Superseded`].

mod coordinator;
mod error;
mod state;

pub use coordinator::{ConfirmReply, ModalCoordinator, ModalTicket, ModalUpdates, OnClose};
pub use error::ModalError;
pub use state::{
    ButtonAction, ButtonVariant, ConfirmOptions, ModalButton, ModalKind, ModalState, CANCEL_TEXT,
    CONFIRM_TEXT,
};
