//! Terminal notifications

use aliasdash_app::{Notification, NotificationLevel, Notifier};

/// Prints successes to stdout and failures to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.message),
            NotificationLevel::Error => {
                eprintln!("error: {}: {}", notification.title, notification.message);
            }
        }
    }
}
