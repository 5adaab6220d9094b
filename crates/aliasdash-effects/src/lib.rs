//! Layer 3: Production Effect Handlers
//!
//! Stateless or self-contained implementations of the effect traits declared
//! in `aliasdash-core`:
//!
//! - [`FilesystemStorageHandler`]: persistent preference storage, one file per key
//! - [`MemoryStorageHandler`]: persistent-storage stand-in for embedding and tests
//! - [`CookieJarHandler`]: cookie jar with expiry, optionally backed by a file
//! - [`SystemTimeHandler`]: wall clock
//!
//! Test doubles that fail on purpose live in `aliasdash-testkit`.

#![forbid(unsafe_code)]

pub mod cookie_jar;
pub mod storage;
pub mod time;

pub use cookie_jar::CookieJarHandler;
pub use storage::{FilesystemStorageHandler, MemoryStorageHandler};
pub use time::SystemTimeHandler;
