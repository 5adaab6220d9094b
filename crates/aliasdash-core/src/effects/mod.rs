//! Pure effect interfaces
//!
//! These traits define **what** side effects the client performs; handlers in
//! `aliasdash-effects` (production) and `aliasdash-testkit` (testing) define
//! **how**. All effect-using code is parameterized by these traits so the
//! Preference Store and the dashboard workflows can be exercised without a
//! browser, a filesystem or a network.

pub mod cookies;
pub mod storage;
pub mod time;

pub use cookies::CookieEffects;
pub use storage::{LocalStorageEffects, StorageError};
pub use time::TimeEffects;
