//! Modal descriptor types
//!
//! [`ModalState`] is the snapshot the rendering host draws. It is plain data:
//! button behaviour lives in [`ButtonAction`] and is carried out by
//! [`ModalCoordinator::click`](super::ModalCoordinator::click).

/// Default label of the confirming button
pub const CONFIRM_TEXT: &str = "확인";
/// Label of the cancel button on confirm dialogs
pub const CANCEL_TEXT: &str = "취소";

/// Which kind of dialog is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalKind {
    #[default]
    None,
    /// Informational message with a single button
    Alert,
    /// Same shape as [`ModalKind::Alert`], rendered with error emphasis
    Error,
    /// Yes/no decision awaited by the caller
    Confirm,
}

impl std::fmt::Display for ModalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Alert => write!(f, "alert"),
            Self::Error => write!(f, "error"),
            Self::Confirm => write!(f, "confirm"),
        }
    }
}

/// Visual emphasis of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    /// Destructive confirmation (delete, leave gathering, ...)
    Danger,
}

/// What pressing a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Close an alert/error and run its close callback
    Acknowledge,
    /// Close a confirm dialog, answering `false`
    Cancel,
    /// Close a confirm dialog, answering `true`
    Confirm,
}

/// A single dialog button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalButton {
    pub text: String,
    pub variant: ButtonVariant,
    pub action: ButtonAction,
}

impl ModalButton {
    pub fn new(text: impl Into<String>, variant: ButtonVariant, action: ButtonAction) -> Self {
        Self {
            text: text.into(),
            variant,
            action,
        }
    }
}

/// Snapshot of the single, process-wide modal
///
/// The default value is the closed descriptor: not open, kind `None`,
/// empty texts, no buttons and ticket 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalState {
    /// Identity of the open modal, used to reject clicks aimed at an older one
    pub ticket: u64,
    pub is_open: bool,
    pub kind: ModalKind,
    pub title: String,
    pub description: String,
    pub buttons: Vec<ModalButton>,
}

impl ModalState {
    /// Whether this is the closed/empty descriptor
    pub fn is_closed(&self) -> bool {
        *self == Self::default()
    }

    /// Find the first button performing `action`
    pub fn button_index(&self, action: ButtonAction) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }
}

/// Options for [`ModalCoordinator::open_confirm`](super::ModalCoordinator::open_confirm)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    /// Label of the confirming button
    /// Default: "확인"
    pub confirm_text: String,
    /// Emphasis of the confirming button, `Primary` or `Danger`
    pub variant: ButtonVariant,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            confirm_text: CONFIRM_TEXT.to_string(),
            variant: ButtonVariant::Primary,
        }
    }
}

impl ConfirmOptions {
    /// Destructive confirmation with a custom label, e.g. `danger("삭제")`
    pub fn danger(confirm_text: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Danger,
            ..Self::default()
        }
        .with_confirm_text(confirm_text)
    }

    pub fn with_confirm_text(mut self, confirm_text: impl Into<String>) -> Self {
        self.confirm_text = confirm_text.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_closed() {
        let state = ModalState::default();
        assert!(state.is_closed());
        assert!(!state.is_open);
        assert_eq!(state.kind, ModalKind::None);
        assert!(state.buttons.is_empty());
    }

    #[test]
    fn test_confirm_options_defaults() {
        let options = ConfirmOptions::default();
        assert_eq!(options.confirm_text, "확인");
        assert_eq!(options.variant, ButtonVariant::Primary);

        let options = ConfirmOptions::danger("삭제");
        assert_eq!(options.confirm_text, "삭제");
        assert_eq!(options.variant, ButtonVariant::Danger);

        let options = ConfirmOptions::default().with_confirm_text("참석");
        assert_eq!(options.confirm_text, "참석");
        assert_eq!(options.variant, ButtonVariant::Primary);
    }

    #[test]
    fn test_button_index() {
        let state = ModalState {
            ticket: 1,
            is_open: true,
            kind: ModalKind::Confirm,
            title: "T".into(),
            description: "D".into(),
            buttons: vec![
                ModalButton::new(CANCEL_TEXT, ButtonVariant::Secondary, ButtonAction::Cancel),
                ModalButton::new(CONFIRM_TEXT, ButtonVariant::Primary, ButtonAction::Confirm),
            ],
        };
        assert_eq!(state.button_index(ButtonAction::Confirm), Some(1));
        assert_eq!(state.button_index(ButtonAction::Acknowledge), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ModalKind::Confirm.to_string(), "confirm");
        assert_eq!(ModalKind::Error.to_string(), "error");
    }
}
