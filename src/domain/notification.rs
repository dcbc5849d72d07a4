//! Toast notification model.

use std::time::{Duration, Instant};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// An action completed.
    Success,
    /// Something needs attention.
    Warn,
    /// An action failed.
    Error,
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When it was first shown, if it has been.
    pub displayed_at: Option<Instant>,
    /// How long it stays visible once shown.
    pub duration: Duration,
}

impl Notification {
    /// Creates a notification with the default duration.
    #[must_use]
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            displayed_at: None,
            duration: Duration::from_secs(5),
        }
    }

    /// Overrides the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns whether the display window has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    /// Starts the display window on first call.
    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}
