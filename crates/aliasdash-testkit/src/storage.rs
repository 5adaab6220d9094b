//! Persistent storage that misbehaves on purpose

use aliasdash_core::effects::{LocalStorageEffects, StorageError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Storage disabled by policy: the probe fails.
#[derive(Debug, Default)]
pub struct UnavailableStorage {
    operations: AtomicUsize,
}

impl UnavailableStorage {
    /// New handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations attempted despite the failed probe.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    fn refuse(&self) -> StorageError {
        self.operations.fetch_add(1, Ordering::SeqCst);
        StorageError::Unavailable("storage disabled".to_string())
    }
}

#[async_trait]
impl LocalStorageEffects for UnavailableStorage {
    async fn is_available(&self) -> bool {
        false
    }

    async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(self.refuse())
    }

    async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(self.refuse())
    }

    async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(self.refuse())
    }
}

/// Storage that probes fine and then fails, like a full quota in private
/// browsing.
#[derive(Debug, Default)]
pub struct FlakyStorage;

impl FlakyStorage {
    /// New handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LocalStorageEffects for FlakyStorage {
    async fn is_available(&self) -> bool {
        true
    }

    async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::ReadFailed("quota exceeded".to_string()))
    }

    async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("quota exceeded".to_string()))
    }

    async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::DeleteFailed("quota exceeded".to_string()))
    }
}
