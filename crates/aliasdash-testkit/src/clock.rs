//! Controllable clock

use aliasdash_core::effects::TimeEffects;
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;

/// Clock that only moves when advanced.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Clock stopped at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock stopped at 2024-01-01T00:00:00Z.
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    /// Move forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeEffects for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
