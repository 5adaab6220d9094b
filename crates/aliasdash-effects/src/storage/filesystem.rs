//! Filesystem-based persistent storage handler
//!
//! Each preference is a small text file under the base directory. The handler
//! is stateless and probes the directory on every call, so a directory that
//! becomes unwritable mid-session makes the Preference Store fall back to
//! cookies from the next call on.

use aliasdash_core::effects::{LocalStorageEffects, StorageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

const VALUE_EXTENSION: &str = "pref";

/// Filesystem-based storage handler for production use
#[derive(Debug, Clone)]
pub struct FilesystemStorageHandler {
    /// Base directory for preference files
    base_path: PathBuf,
}

impl FilesystemStorageHandler {
    /// Create a new filesystem storage handler
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory the handler writes to
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey {
                reason: "Key cannot be empty".to_string(),
            });
        }
        if key.starts_with('.') || key.contains(['/', '\\', '\0']) {
            return Err(StorageError::InvalidKey {
                reason: format!("Key {key:?} is not a plain file name"),
            });
        }
        Ok(self.base_path.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

#[async_trait]
impl LocalStorageEffects for FilesystemStorageHandler {
    async fn is_available(&self) -> bool {
        if let Err(e) = fs::create_dir_all(&self.base_path).await {
            tracing::debug!(path = %self.base_path.display(), "storage directory unavailable: {}", e);
            return false;
        }
        match fs::metadata(&self.base_path).await {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        }
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let file_path = self.file_for(key)?;
        match fs::read_to_string(&file_path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to read {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let file_path = self.file_for(key)?;
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create directory: {}", e))
        })?;
        fs::write(&file_path, value)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to write file: {}", e)))
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let file_path = self.file_for(key)?;
        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to remove file: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let storage = FilesystemStorageHandler::new(dir.path().join("prefs"));

        assert!(storage.is_available().await);
        storage.set_item("showFilter", "true").await.unwrap();
        assert!(dir.path().join("prefs").join("showFilter.pref").exists());
        assert_eq!(
            storage.get_item("showFilter").await.unwrap().as_deref(),
            Some("true")
        );

        storage.remove_item("showFilter").await.unwrap();
        assert_eq!(storage.get_item("showFilter").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_key_reads_none_and_deletes_cleanly() {
        let dir = TempDir::new().unwrap();
        let storage = FilesystemStorageHandler::new(dir.path());
        assert_eq!(storage.get_item("absent").await.unwrap(), None);
        storage.remove_item("absent").await.unwrap();
    }

    #[tokio::test]
    async fn test_path_like_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = FilesystemStorageHandler::new(dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                storage.set_item(key, "v").await,
                Err(StorageError::InvalidKey { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_unavailable_when_base_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let storage = FilesystemStorageHandler::new(&file);
        assert!(!storage.is_available().await);
    }
}
