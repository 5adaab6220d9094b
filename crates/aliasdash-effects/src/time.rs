//! System clock handler

use aliasdash_core::effects::TimeEffects;
use chrono::{DateTime, Utc};

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeHandler;

impl SystemTimeHandler {
    /// Create a new system time handler
    pub fn new() -> Self {
        Self
    }
}

impl TimeEffects for SystemTimeHandler {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
