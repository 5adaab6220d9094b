//! Transient, non-blocking user notifications

use serde::{Deserialize, Serialize};

/// Generic hint for failed loads.
pub const LOAD_RETRY_HINT: &str =
    "Sorry for the inconvenience! Could you try refreshing the page? ";

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    /// Action confirmed by the server
    Success,
    /// Action failed or was rejected
    Error,
}

/// A toast-style message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Short headline, empty for successes
    pub title: String,
    /// Body text
    pub message: String,
}

impl Notification {
    /// Success message without a title.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: String::new(),
            message: message.into(),
        }
    }

    /// Error with a headline.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Sink for notifications. Implementations must not block.
pub trait Notifier: Send + Sync {
    /// Show `notification`.
    fn notify(&self, notification: Notification);
}
