//! Dark-mode theme state

use crate::cookie::{find_cookie, SameSite, SetCookie};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cookie holding the dark-mode flag.
pub const DARK_MODE_COOKIE: &str = "dark-mode";

/// Lifetime of the dark-mode cookie.
pub const DARK_MODE_DAYS: i64 = 30;

/// Page theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Default theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Theme encoded in a cookie string. Only the literal `"true"` selects dark.
    pub fn from_cookie_string(cookie_string: &str) -> Self {
        match find_cookie(cookie_string, DARK_MODE_COOKIE) {
            Some("true") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value of the `data-theme` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Cookie persisting this theme.
    pub fn to_cookie(self, now: DateTime<Utc>, host: &str, secure: bool) -> SetCookie {
        let flag = matches!(self, Self::Dark).to_string();
        SetCookie::new(DARK_MODE_COOKIE, flag)
            .expiring_in_days(now, DARK_MODE_DAYS)
            .secure(secure)
            .same_site(SameSite::Lax)
            .with_domain(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_literal_true_is_dark() {
        assert_eq!(Theme::from_cookie_string("dark-mode=true"), Theme::Dark);
        assert_eq!(Theme::from_cookie_string("dark-mode=false"), Theme::Light);
        assert_eq!(Theme::from_cookie_string("dark-mode=1"), Theme::Light);
        assert_eq!(Theme::from_cookie_string(""), Theme::Light);
    }

    #[test]
    fn test_cookie_value() {
        let now = Utc::now();
        let cookie = Theme::Dark.to_cookie(now, "app.example.com", true);
        assert_eq!(cookie.value, "true");
        assert!(cookie.secure);
        assert_eq!(Theme::Dark.toggled().to_cookie(now, "h", false).value, "false");
    }
}
