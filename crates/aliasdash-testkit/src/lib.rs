//! aliasdash Testing Infrastructure
//!
//! Test doubles for the effect traits and the alias API:
//!
//! - [`MockAliasApi`]: an in-memory alias backend with scripted failures and a
//!   call log
//! - [`RecordingNotifier`]: collects notifications
//! - [`UnavailableStorage`], [`FlakyStorage`]: persistent storage that fails
//!   the probe, or passes it and then fails every operation
//! - [`ManualClock`]: time that only moves when told to
//!
//! ```rust,no_run
//! use aliasdash_testkit::*;
//!
//! let api = MockAliasApi::new().with_pages(vec![aliases(&[1, 2, 3]), aliases(&[4])]);
//! let notifier = RecordingNotifier::new();
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod api;
mod clock;
mod fixtures;
mod notifier;
mod storage;

pub use api::{ApiCall, MockAliasApi, Operation};
pub use clock::ManualClock;
pub use fixtures::{alias, aliases, default_mailboxes, default_options, memory_preferences};
pub use notifier::RecordingNotifier;
pub use storage::{FlakyStorage, UnavailableStorage};
