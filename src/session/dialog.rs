//! Modal dialogs
//!
//! A session shows at most one dialog. Each kind offers a fixed set of
//! buttons; pressing one or cancelling always empties the slot.

/// Dialog currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Win { score: u64, new_high_score: bool },
    GameOver { score: u64, new_high_score: bool },
    Paused,
    NewGameConfirm,
}

/// Dialog button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    NewGame,
    Continue,
}

/// What the engine should do once a dialog closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    NewGame,
    Unpause,
    Dismiss,
}

impl DialogKind {
    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::Win { .. } => "You win!",
            DialogKind::GameOver { .. } => "Game over",
            DialogKind::Paused => "Paused",
            DialogKind::NewGameConfirm => "Start a new game?",
        }
    }

    pub fn message(&self) -> Option<String> {
        match *self {
            DialogKind::Win {
                score,
                new_high_score,
            }
            | DialogKind::GameOver {
                score,
                new_high_score,
            } => {
                let mut msg = format!("Final score: {}", score);
                if new_high_score {
                    msg.push_str("\nNew high score!");
                }
                Some(msg)
            }
            DialogKind::Paused => None,
            DialogKind::NewGameConfirm => Some("Current progress will be lost.".to_string()),
        }
    }

    pub fn buttons(&self) -> &'static [DialogButton] {
        match self {
            DialogKind::Win { .. } | DialogKind::NewGameConfirm => {
                &[DialogButton::NewGame, DialogButton::Continue]
            }
            DialogKind::GameOver { .. } => &[DialogButton::NewGame],
            DialogKind::Paused => &[DialogButton::Continue],
        }
    }

    pub fn button_label(&self, button: DialogButton) -> &'static str {
        match (self, button) {
            (_, DialogButton::NewGame) => "New game",
            (DialogKind::Win { .. }, DialogButton::Continue) => "Keep playing",
            (DialogKind::NewGameConfirm, DialogButton::Continue) => "Cancel",
            (_, DialogButton::Continue) => "Continue",
        }
    }

    /// Back navigation closes the dialog
    pub fn is_cancelable(&self) -> bool {
        matches!(self, DialogKind::Paused | DialogKind::NewGameConfirm)
    }

    /// Result of pressing `button`; `None` if this dialog has no such button.
    pub fn press(&self, button: DialogButton) -> Option<DialogOutcome> {
        if !self.buttons().contains(&button) {
            return None;
        }
        Some(match (self, button) {
            (_, DialogButton::NewGame) => DialogOutcome::NewGame,
            (DialogKind::Win { .. } | DialogKind::Paused, DialogButton::Continue) => {
                DialogOutcome::Unpause
            }
            (_, DialogButton::Continue) => DialogOutcome::Dismiss,
        })
    }

    /// Result of back navigation; `None` if the dialog ignores it.
    pub fn cancel(&self) -> Option<DialogOutcome> {
        match self {
            DialogKind::Paused => Some(DialogOutcome::Unpause),
            DialogKind::NewGameConfirm => Some(DialogOutcome::Dismiss),
            DialogKind::Win { .. } | DialogKind::GameOver { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIN: DialogKind = DialogKind::Win {
        score: 2048,
        new_high_score: true,
    };
    const OVER: DialogKind = DialogKind::GameOver {
        score: 10,
        new_high_score: false,
    };

    #[test]
    fn test_win_offers_continue() {
        assert_eq!(WIN.press(DialogButton::Continue), Some(DialogOutcome::Unpause));
        assert_eq!(WIN.press(DialogButton::NewGame), Some(DialogOutcome::NewGame));
        assert_eq!(WIN.cancel(), None);
    }

    #[test]
    fn test_game_over_cannot_continue() {
        assert_eq!(OVER.press(DialogButton::Continue), None);
        assert_eq!(OVER.press(DialogButton::NewGame), Some(DialogOutcome::NewGame));
        assert!(!OVER.is_cancelable());
    }

    #[test]
    fn test_paused_and_confirm() {
        assert_eq!(
            DialogKind::Paused.press(DialogButton::Continue),
            Some(DialogOutcome::Unpause)
        );
        assert_eq!(DialogKind::Paused.cancel(), Some(DialogOutcome::Unpause));
        assert_eq!(
            DialogKind::NewGameConfirm.press(DialogButton::Continue),
            Some(DialogOutcome::Dismiss)
        );
        assert_eq!(DialogKind::NewGameConfirm.cancel(), Some(DialogOutcome::Dismiss));
    }

    #[test]
    fn test_cancel_agrees_with_cancelable() {
        for kind in [WIN, OVER, DialogKind::Paused, DialogKind::NewGameConfirm] {
            assert_eq!(kind.cancel().is_some(), kind.is_cancelable());
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            WIN.message().as_deref(),
            Some("Final score: 2048\nNew high score!")
        );
        assert_eq!(OVER.message().as_deref(), Some("Final score: 10"));
        assert_eq!(DialogKind::Paused.message(), None);
        assert_eq!(WIN.button_label(DialogButton::Continue), "Keep playing");
    }
}
