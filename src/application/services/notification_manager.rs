use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// Queue of toasts shown one at a time.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl NotificationManager {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        let notification =
            Notification::new(level, title, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, title, message);
    }

    /// Expires the visible toast once its window has passed.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.advance();
            }
        }
    }

    /// Drops the visible toast immediately. Returns whether one was shown.
    pub fn dismiss(&mut self) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) {
        self.queue.pop_front();
        if let Some(next) = self.queue.front_mut() {
            next.mark_displayed();
        }
    }

    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
