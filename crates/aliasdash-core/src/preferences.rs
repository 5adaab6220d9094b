//! Preference Store
//!
//! A get/set/delete key-value abstraction over persistent storage with a
//! transparent cookie fallback. Consumers depend only on the [`Preferences`]
//! trait; [`PreferenceStore`] is the production composition of a
//! [`LocalStorageEffects`] primary and a [`CookieEffects`] fallback.
//!
//! The mechanism is chosen on every call by probing the primary backend. A
//! primary that passes the probe but fails the operation (quota errors, a
//! storage area revoked mid-session) falls back to cookies for that call.
//! Nothing here returns an error to the caller; failures are logged and
//! reported as a falsy result.

use crate::cookie::{decode_cookie_value, encode_cookie_value, find_cookie, SetCookie};
use crate::effects::{CookieEffects, LocalStorageEffects, TimeEffects};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Well-known preference keys.
pub mod keys {
    /// Filter panel visibility
    pub const SHOW_FILTER: &str = "showFilter";
    /// Stats panel visibility
    pub const SHOW_STATS: &str = "showStats";
    /// Dark-mode flag (cookie)
    pub const DARK_MODE: &str = "dark-mode";
    /// Analytics opt-out flag
    pub const ANALYTICS_IGNORE: &str = "analytics-ignore";
}

/// A stored preference after type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    /// Stored as the literal `"true"` or `"false"`
    Bool(bool),
    /// Any other string, verbatim
    Text(String),
}

impl PreferenceValue {
    /// Coerce a raw stored string: `"true"`/`"false"` become booleans,
    /// everything else stays text.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            other => Self::Text(other.to_string()),
        }
    }

    /// Raw string form written to storage.
    pub fn to_raw(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Truthiness as a UI flag: `true`, or any non-empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Boolean value, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(_) => None,
        }
    }

    /// Text value, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bool(_) => None,
            Self::Text(s) => Some(s),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for PreferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw())
    }
}

impl From<bool> for PreferenceValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The injectable preference interface.
#[async_trait]
pub trait Preferences: Send + Sync {
    /// Write `value` under `key`. `days` only applies on the cookie path.
    ///
    /// Returns `false` without writing when `key` or `value` is empty, and
    /// when neither backend accepted the write.
    async fn set(&self, key: &str, value: &PreferenceValue, days: Option<i64>) -> bool;

    /// Read and coerce the value stored under `key`.
    async fn get(&self, key: &str) -> Option<PreferenceValue>;

    /// Remove `key`.
    async fn delete(&self, key: &str);

    /// Convenience: read a flag, treating absence as `false`.
    async fn flag(&self, key: &str) -> bool {
        self.get(key).await.is_some_and(|v| v.is_truthy())
    }
}

/// Persistent storage with cookie fallback.
pub struct PreferenceStore<L: ?Sized, C: ?Sized> {
    local: Arc<L>,
    cookies: Arc<C>,
    clock: Arc<dyn TimeEffects>,
    cookie_domain: Option<String>,
}

impl<L, C> PreferenceStore<L, C>
where
    L: LocalStorageEffects + ?Sized,
    C: CookieEffects + ?Sized,
{
    /// Compose a store from its two backends and a clock.
    pub fn new(local: Arc<L>, cookies: Arc<C>, clock: Arc<dyn TimeEffects>) -> Self {
        Self {
            local,
            cookies,
            clock,
            cookie_domain: None,
        }
    }

    /// Scope fallback cookies to `domain`.
    pub fn with_cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie_domain = Some(domain.into());
        self
    }

    fn cookie(&self, key: &str, raw: &str, days: Option<i64>) -> SetCookie {
        let mut cookie = SetCookie::new(key, encode_cookie_value(raw));
        if let Some(days) = days {
            cookie = cookie.expiring_in_days(self.clock.now(), days);
        }
        if let Some(domain) = &self.cookie_domain {
            cookie = cookie.with_domain(domain.clone());
        }
        cookie
    }

    async fn write_cookie(&self, cookie: SetCookie) -> bool {
        match self.cookies.set_cookie(&cookie).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %cookie.name, "cookie fallback write failed: {}", e);
                false
            }
        }
    }

    async fn read_cookie(&self, key: &str) -> Option<String> {
        match self.cookies.cookie_string().await {
            Ok(jar) => find_cookie(&jar, key).map(decode_cookie_value),
            Err(e) => {
                tracing::warn!(key, "cookie fallback read failed: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl<L, C> Preferences for PreferenceStore<L, C>
where
    L: LocalStorageEffects + ?Sized,
    C: CookieEffects + ?Sized,
{
    async fn set(&self, key: &str, value: &PreferenceValue, days: Option<i64>) -> bool {
        if key.is_empty() || value.is_empty() {
            return false;
        }
        let raw = value.to_raw();

        if self.local.is_available().await {
            match self.local.set_item(key, &raw).await {
                Ok(()) => return true,
                Err(e) => tracing::warn!(key, "persistent storage write failed, using cookie: {}", e),
            }
        }
        self.write_cookie(self.cookie(key, &raw, days)).await
    }

    async fn get(&self, key: &str) -> Option<PreferenceValue> {
        let raw = if self.local.is_available().await {
            match self.local.get_item(key).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(key, "persistent storage read failed, using cookie: {}", e);
                    self.read_cookie(key).await
                }
            }
        } else {
            self.read_cookie(key).await
        };
        raw.map(|raw| PreferenceValue::from_raw(&raw))
    }

    async fn delete(&self, key: &str) {
        if self.local.is_available().await {
            match self.local.remove_item(key).await {
                Ok(()) => return,
                Err(e) => tracing::warn!(key, "persistent storage delete failed, using cookie: {}", e),
            }
        }
        self.write_cookie(self.cookie(key, "", Some(-1)))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion() {
        assert_eq!(PreferenceValue::from_raw("true"), PreferenceValue::Bool(true));
        assert_eq!(PreferenceValue::from_raw("false"), PreferenceValue::Bool(false));
        assert_eq!(
            PreferenceValue::from_raw("42"),
            PreferenceValue::Text("42".to_string())
        );
        assert_eq!(
            PreferenceValue::from_raw("True"),
            PreferenceValue::Text("True".to_string())
        );
    }

    #[test]
    fn test_raw_round_trip_of_booleans() {
        assert_eq!(PreferenceValue::Bool(false).to_raw(), "false");
        assert_eq!(PreferenceValue::from("t").to_raw(), "t");
    }

    #[test]
    fn test_truthiness() {
        assert!(PreferenceValue::Bool(true).is_truthy());
        assert!(!PreferenceValue::Bool(false).is_truthy());
        assert!(PreferenceValue::from("t").is_truthy());
        assert!(!PreferenceValue::from("").is_truthy());
    }
}
