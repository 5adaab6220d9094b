//! Cookie jar handler
//!
//! Behaves like a browser jar scoped to one origin: cookies are keyed by name,
//! expired cookies disappear, and session cookies (no expiry) never outlive the
//! handler. Persistent cookies are mirrored to a JSON file when the jar is
//! opened from a path.

use aliasdash_core::cookie::SetCookie;
use aliasdash_core::effects::{CookieEffects, StorageError, TimeEffects};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    expires: Option<DateTime<Utc>>,
    domain: Option<String>,
    path: String,
    secure: bool,
}

impl StoredCookie {
    fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(true, |at| at > now)
    }
}

/// Cookie jar with expiry.
pub struct CookieJarHandler {
    path: Option<PathBuf>,
    clock: Arc<dyn TimeEffects>,
    jar: RwLock<BTreeMap<String, StoredCookie>>,
}

impl CookieJarHandler {
    /// Jar that lives only in memory.
    pub fn in_memory(clock: Arc<dyn TimeEffects>) -> Self {
        Self {
            path: None,
            clock,
            jar: RwLock::new(BTreeMap::new()),
        }
    }

    /// Jar mirrored to `path`. A missing file starts an empty jar.
    pub async fn open(
        path: impl Into<PathBuf>,
        clock: Arc<dyn TimeEffects>,
    ) -> Result<Self, StorageError> {
        let path = path.into();
        let jar = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StorageError::ReadFailed(format!("Corrupt cookie file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StorageError::ReadFailed(format!(
                    "Failed to read cookie file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path: Some(path),
            clock,
            jar: RwLock::new(jar),
        })
    }

    /// File the jar persists to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn persist(&self, jar: &BTreeMap<String, StoredCookie>) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let persistent: BTreeMap<_, _> = jar
            .iter()
            .filter(|(_, cookie)| cookie.expires.is_some())
            .collect();
        let bytes = serde_json::to_vec_pretty(&persistent)
            .map_err(|e| StorageError::WriteFailed(format!("Failed to encode cookies: {}", e)))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::WriteFailed(format!("Failed to create directory: {}", e))
            })?;
        }
        fs::write(path, bytes)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to write cookie file: {}", e)))
    }
}

#[async_trait]
impl CookieEffects for CookieJarHandler {
    async fn cookie_string(&self) -> Result<String, StorageError> {
        let now = self.clock.now();
        let jar = self.jar.read().await;
        let pairs: Vec<String> = jar
            .iter()
            .filter(|(_, cookie)| cookie.is_live_at(now))
            .map(|(name, cookie)| format!("{}={}", name, cookie.value))
            .collect();
        Ok(pairs.join("; "))
    }

    async fn set_cookie(&self, cookie: &SetCookie) -> Result<(), StorageError> {
        if cookie.name.is_empty() || cookie.name.contains([';', '=']) {
            return Err(StorageError::InvalidKey {
                reason: format!("Cookie name {:?} is not a token", cookie.name),
            });
        }
        let now = self.clock.now();
        // Held through `persist`: file saves follow update order.
        let mut jar = self.jar.write().await;
        jar.retain(|_, stored| stored.is_live_at(now));
        if cookie.is_expired_at(now) {
            jar.remove(&cookie.name);
        } else {
            jar.insert(
                cookie.name.clone(),
                StoredCookie {
                    value: cookie.value.clone(),
                    expires: cookie.expires,
                    domain: cookie.domain.clone(),
                    path: cookie.path.clone(),
                    secure: cookie.secure,
                },
            );
        }
        tracing::debug!(cookie = %cookie.to_header(), "cookie written");
        self.persist(&jar).await
    }
}
