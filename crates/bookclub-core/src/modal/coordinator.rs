//! ModalCoordinator - single shared dialog with an awaitable confirm
//!
//! One coordinator is created by the composition root and cloned into every
//! component that needs to ask the user something. It owns one slot: the
//! descriptor currently shown plus whatever is waiting on it (a close
//! callback or a confirm reply channel).
//!
//! ```text
//!  open_confirm() ──► slot { state, Decision(reply) } ──► watch ──► host
//!        │                                                  │
//!        ▼                                                  │ click(ticket, i)
//!  ConfirmReply.await ◄──────── reply.send(bool) ◄──────────┘
//! ```
//!
//! Replacing a modal whose confirm is still pending drops its reply sender,
//! so the earlier `ConfirmReply` resolves to [`ModalError::Superseded`]
//! instead of hanging forever.

use super::error::ModalError;
use super::state::{
    ButtonAction, ButtonVariant, ConfirmOptions, ModalButton, ModalKind, ModalState, CANCEL_TEXT,
    CONFIRM_TEXT,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::{oneshot, watch};

/// Callback run after an alert or error is acknowledged
pub type OnClose = Box<dyn FnOnce() + Send + 'static>;

/// Identity of an opened modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalTicket(u64);

impl ModalTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What the open modal is waiting to hand back
enum Pending {
    Notice { on_close: Option<OnClose> },
    Decision { reply: oneshot::Sender<bool> },
}

struct Slot {
    next_ticket: u64,
    state: ModalState,
    pending: Option<Pending>,
}

struct Shared {
    slot: Mutex<Slot>,
    state_tx: watch::Sender<ModalState>,
}

/// Process-wide modal store
///
/// Cloning is cheap and every clone drives the same modal.
#[derive(Clone)]
pub struct ModalCoordinator {
    shared: Arc<Shared>,
}

impl ModalCoordinator {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(ModalState::default());
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    next_ticket: 0,
                    state: ModalState::default(),
                    pending: None,
                }),
                state_tx,
            }),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.shared.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Opening
    // ========================================================================

    /// Show an informational message with a single "확인" button
    ///
    /// Pressing the button closes the modal, then runs `on_close`.
    pub fn open_alert(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        on_close: Option<OnClose>,
    ) -> ModalTicket {
        self.present(
            ModalKind::Alert,
            title.into(),
            description.into(),
            vec![acknowledge_button()],
            Pending::Notice { on_close },
        )
    }

    /// Same contract as [`open_alert`](Self::open_alert), shown as an error
    pub fn open_error(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        on_close: Option<OnClose>,
    ) -> ModalTicket {
        self.present(
            ModalKind::Error,
            title.into(),
            description.into(),
            vec![acknowledge_button()],
            Pending::Notice { on_close },
        )
    }

    /// Ask the user a yes/no question
    ///
    /// The modal is shown immediately; the returned [`ConfirmReply`] resolves
    /// to `Ok(true)` for the confirming button, `Ok(false)` for "취소" or
    /// [`close`](Self::close), and `Err(ModalError::Superseded)` if another
    /// modal replaces this one first.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let leave = modals
    ///     .open_confirm("모임 나가기", "정말 나가시겠어요?", ConfirmOptions::danger("나가기"))
    ///     .await?;
    /// ```
    pub fn open_confirm(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        options: ConfirmOptions,
    ) -> ConfirmReply {
        let (reply, rx) = oneshot::channel();
        let buttons = vec![
            ModalButton::new(CANCEL_TEXT, ButtonVariant::Secondary, ButtonAction::Cancel),
            ModalButton::new(options.confirm_text, options.variant, ButtonAction::Confirm),
        ];
        let ticket = self.present(
            ModalKind::Confirm,
            title.into(),
            description.into(),
            buttons,
            Pending::Decision { reply },
        );
        ConfirmReply { ticket, rx }
    }

    fn present(
        &self,
        kind: ModalKind,
        title: String,
        description: String,
        buttons: Vec<ModalButton>,
        pending: Pending,
    ) -> ModalTicket {
        let (ticket, replaced) = {
            let mut slot = self.slot();
            slot.next_ticket += 1;
            let ticket = slot.next_ticket;
            slot.state = ModalState {
                ticket,
                is_open: true,
                kind,
                title,
                description,
                buttons,
            };
            self.shared.state_tx.send_replace(slot.state.clone());
            (ticket, slot.pending.replace(pending))
        };

        if let Some(Pending::Decision { .. }) = replaced {
            log::warn!("modal: {} (ticket {}) superseded an unanswered confirm", kind, ticket);
        } else {
            log::debug!("modal: opened {} (ticket {})", kind, ticket);
        }

        ModalTicket(ticket)
    }

    // ========================================================================
    // Answering and closing
    // ========================================================================

    /// Press button `index` of modal `ticket`
    ///
    /// This is the host's only way to act on a gesture. The modal is closed
    /// before the button's effect (close callback or confirm answer) runs, so
    /// a callback may open the next modal.
    pub fn click(&self, ticket: u64, index: usize) -> Result<(), ModalError> {
        let (action, pending) = {
            let mut slot = self.slot();
            if !slot.state.is_open || slot.state.ticket != ticket {
                return Err(ModalError::Stale { ticket });
            }
            let action = slot
                .state
                .buttons
                .get(index)
                .map(|button| button.action)
                .ok_or(ModalError::UnknownButton { index })?;
            let pending = slot.pending.take();
            self.reset(&mut slot);
            (action, pending)
        };

        log::debug!("modal: ticket {} answered with {:?}", ticket, action);

        match (action, pending) {
            (ButtonAction::Acknowledge, Some(Pending::Notice { on_close: Some(on_close) })) => {
                on_close()
            }
            (ButtonAction::Cancel, Some(Pending::Decision { reply })) => {
                let _ = reply.send(false);
            }
            (ButtonAction::Confirm, Some(Pending::Decision { reply })) => {
                let _ = reply.send(true);
            }
            _ => {}
        }

        Ok(())
    }

    /// Close whatever is open
    ///
    /// An unanswered confirm resolves to `false`; an alert's close callback is
    /// dropped without running. Calling this while closed changes nothing and
    /// notifies no subscriber.
    pub fn close(&self) {
        let pending = {
            let mut slot = self.slot();
            let pending = slot.pending.take();
            self.reset(&mut slot);
            pending
        };

        if let Some(Pending::Decision { reply }) = pending {
            log::debug!("modal: confirm dismissed");
            let _ = reply.send(false);
        }
    }

    fn reset(&self, slot: &mut Slot) {
        slot.state = ModalState::default();
        self.shared.state_tx.send_if_modified(|state| {
            if state.is_closed() {
                false
            } else {
                *state = ModalState::default();
                true
            }
        });
    }

    // ========================================================================
    // Observing
    // ========================================================================

    /// Current descriptor
    pub fn state(&self) -> ModalState {
        self.slot().state.clone()
    }

    /// Updates for the rendering host; yields on every open and close
    pub fn subscribe(&self) -> ModalUpdates {
        ModalUpdates {
            rx: self.shared.state_tx.subscribe(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot().state.is_open
    }

    /// Whether a confirm is waiting for an answer
    ///
    /// Callers that must not displace another flow's question check this
    /// before opening a modal.
    pub fn has_pending_confirm(&self) -> bool {
        matches!(self.slot().pending, Some(Pending::Decision { .. }))
    }
}

impl Default for ModalCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModalCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalCoordinator")
            .field("state", &self.state())
            .finish()
    }
}

fn acknowledge_button() -> ModalButton {
    ModalButton::new(CONFIRM_TEXT, ButtonVariant::Primary, ButtonAction::Acknowledge)
}

/// Owned snapshots of the modal state, one per change
///
/// Every snapshot is cloned out of the channel, so a host can call
/// [`ModalCoordinator::click`] while still holding one.
#[derive(Debug, Clone)]
pub struct ModalUpdates {
    rx: watch::Receiver<ModalState>,
}

impl ModalUpdates {
    /// Latest state, marking it seen
    pub fn current(&mut self) -> ModalState {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the next change; `None` once the coordinator is gone
    pub async fn next(&mut self) -> Option<ModalState> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }

    /// Whether a change arrived since the last snapshot
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

/// Answer of a confirm dialog
///
/// Resolves to `Ok(true)` / `Ok(false)` once the user answers, or
/// `Err(ModalError::Superseded)` if the dialog is replaced first.
#[must_use = "the answer is only observed by awaiting the reply"]
#[derive(Debug)]
pub struct ConfirmReply {
    ticket: ModalTicket,
    rx: oneshot::Receiver<bool>,
}

impl ConfirmReply {
    pub fn ticket(&self) -> ModalTicket {
        self.ticket
    }
}

impl Future for ConfirmReply {
    type Output = Result<bool, ModalError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|answer| answer.map_err(|_| ModalError::Superseded))
    }
}
