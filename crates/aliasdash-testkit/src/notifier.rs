//! Notification capture

use aliasdash_app::{Notification, NotificationLevel, Notifier};
use parking_lot::Mutex;

/// Notifier that keeps everything it is shown.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    /// Error notifications only.
    pub fn errors(&self) -> Vec<Notification> {
        self.of_level(NotificationLevel::Error)
    }

    /// Success notifications only.
    pub fn successes(&self) -> Vec<Notification> {
        self.of_level(NotificationLevel::Success)
    }

    fn of_level(&self, level: NotificationLevel) -> Vec<Notification> {
        self.seen
            .lock()
            .iter()
            .filter(|n| n.level == level)
            .cloned()
            .collect()
    }

    /// Forget everything seen so far.
    pub fn clear(&self) {
        self.seen.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}
