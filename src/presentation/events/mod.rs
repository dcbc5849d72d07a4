//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Global key bindings.
pub struct EventHandler;

impl EventHandler {
    fn is_ctrl(key: &KeyEvent, c: char) -> bool {
        key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Ctrl+C quits from anywhere.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        Self::is_ctrl(key, 'c')
    }

    /// Ctrl+S submits the form.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        Self::is_ctrl(key, 's')
    }

    /// Ctrl+D drops the visible toast.
    #[must_use]
    pub fn is_dismiss_event(key: &KeyEvent) -> bool {
        Self::is_ctrl(key, 'd')
    }

    /// Ctrl+O opens the image picker.
    #[must_use]
    pub fn is_picker_event(key: &KeyEvent) -> bool {
        Self::is_ctrl(key, 'o')
    }

    /// Esc goes back.
    #[must_use]
    pub fn is_back_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc
    }
}
