//! Cookie jar effects, the fallback path of the Preference Store

use super::storage::StorageError;
use crate::cookie::SetCookie;
use async_trait::async_trait;

/// A `document.cookie`-style jar.
///
/// Reading yields the `name=value; name2=value2` string of every live cookie;
/// writing takes one structured cookie. A cookie whose expiry is in the past
/// is removed by the jar, the same way a browser drops it.
#[async_trait]
pub trait CookieEffects: Send + Sync {
    /// Serialized live cookies, `"; "`-separated.
    async fn cookie_string(&self) -> Result<String, StorageError>;

    /// Write (or expire) a cookie.
    async fn set_cookie(&self, cookie: &SetCookie) -> Result<(), StorageError>;
}
