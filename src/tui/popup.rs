use crate::selector::SelectedDate;
use crossterm::event::KeyCode;

/// What a key press means to an open popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupOutcome {
    Ignored,
    /// Close the popup only.
    Dismiss,
    /// Close the popup and the view that opened it.
    DismissParent,
}

/// A modal panel drawn over the selector.
pub trait Popup {
    fn title(&self) -> &str;

    fn lines(&self) -> Vec<String>;

    /// Keys that close the popup.
    fn dispose_keys(&self) -> &[KeyCode];

    /// Keys that close the popup together with its parent view, if any.
    fn dispose_parent_keys(&self) -> Option<&[KeyCode]> {
        None
    }

    /// One-line key hint shown under the body.
    fn help(&self) -> String;
}

pub fn resolve(popup: &dyn Popup, key: KeyCode) -> PopupOutcome {
    if popup
        .dispose_parent_keys()
        .is_some_and(|keys| keys.contains(&key))
    {
        PopupOutcome::DismissParent
    } else if popup.dispose_keys().contains(&key) {
        PopupOutcome::Dismiss
    } else {
        PopupOutcome::Ignored
    }
}

/// Asks the user to accept the chosen date.
pub struct ConfirmPopup {
    pub date: SelectedDate,
}

impl ConfirmPopup {
    const DISMISS: [KeyCode; 2] = [KeyCode::Esc, KeyCode::Backspace];
    const ACCEPT: [KeyCode; 2] = [KeyCode::Enter, KeyCode::Char('y')];

    pub fn new(date: SelectedDate) -> Self {
        ConfirmPopup { date }
    }
}

impl Popup for ConfirmPopup {
    fn title(&self) -> &str {
        "Confirm Date"
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Selected: {}", self.date)];
        match self.date.to_naive_date() {
            Some(date) => lines.push(date.format("%A, %B %-d, %Y").to_string()),
            None => lines.push("Not a valid calendar date".to_string()),
        }
        lines
    }

    fn dispose_keys(&self) -> &[KeyCode] {
        &Self::DISMISS
    }

    fn dispose_parent_keys(&self) -> Option<&[KeyCode]> {
        Some(&Self::ACCEPT)
    }

    fn help(&self) -> String {
        "Enter to accept, ESC to keep editing".to_string()
    }
}

pub struct ErrorPopup {
    message: String,
}

impl ErrorPopup {
    const DISMISS: [KeyCode; 2] = [KeyCode::Esc, KeyCode::Enter];

    pub fn new(message: impl Into<String>) -> Self {
        ErrorPopup {
            message: message.into(),
        }
    }
}

impl Popup for ErrorPopup {
    fn title(&self) -> &str {
        "Error"
    }

    fn lines(&self) -> Vec<String> {
        vec![format!("An error occurred. {}", self.message)]
    }

    fn dispose_keys(&self) -> &[KeyCode] {
        &Self::DISMISS
    }

    fn help(&self) -> String {
        "Press Enter or ESC to close".to_string()
    }
}
