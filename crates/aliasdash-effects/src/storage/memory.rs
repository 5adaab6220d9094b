//! In-memory persistent storage handler

use aliasdash_core::effects::{LocalStorageEffects, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage handler. Always available; values live as long as the
/// handler.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageHandler {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorageHandler {
    /// Create a new memory storage handler
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStorageEffects for MemoryStorageHandler {
    async fn is_available(&self) -> bool {
        true
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.data.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorageHandler::new();
        storage.set_item("showStats", "true").await.unwrap();
        assert_eq!(
            storage.get_item("showStats").await.unwrap().as_deref(),
            Some("true")
        );
        storage.remove_item("showStats").await.unwrap();
        assert_eq!(storage.get_item("showStats").await.unwrap(), None);
        storage.remove_item("showStats").await.unwrap();
    }
}
