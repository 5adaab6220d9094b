//! Persistent key-value storage effects (the `localStorage` analogue)

use async_trait::async_trait;

/// Storage operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The key cannot be stored by this backend
    #[error("Invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },
    /// The backend is disabled or unreachable
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// Reading failed
    #[error("Read failed: {0}")]
    ReadFailed(String),
    /// Writing failed
    #[error("Write failed: {0}")]
    WriteFailed(String),
    /// Removal failed
    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

/// Persistent string storage with no expiry semantics.
///
/// Values persist until explicitly removed or cleared externally.
#[async_trait]
pub trait LocalStorageEffects: Send + Sync {
    /// Capability probe. Called before every operation, never cached.
    async fn is_available(&self) -> bool;

    /// Read the raw stored string for `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
