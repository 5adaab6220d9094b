//! Wall-clock effects

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait TimeEffects: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
