//! Cookie formatting and lookup
//!
//! [`SetCookie`] is what the Preference Store and the theme toggle hand to a
//! [`CookieEffects`](crate::effects::CookieEffects) jar; [`find_cookie`] reads
//! one value back out of the jar's `name=value; ...` string.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in one day of cookie lifetime.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// `9999-12-31T23:59:59Z`, the latest expiry a cookie is given.
pub const LATEST_EXPIRY_TIMESTAMP: i64 = 253_402_300_799;

fn latest_expiry() -> DateTime<Utc> {
    DateTime::from_timestamp(LATEST_EXPIRY_TIMESTAMP, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    /// `SameSite=Lax`
    Lax,
    /// `SameSite=Strict`
    Strict,
}

/// A cookie write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCookie {
    /// Cookie name
    pub name: String,
    /// Raw cookie value
    pub value: String,
    /// Absolute expiry; `None` means a session cookie
    pub expires: Option<DateTime<Utc>>,
    /// Cookie path
    pub path: String,
    /// Cookie domain
    pub domain: Option<String>,
    /// `Secure` flag
    pub secure: bool,
    /// `SameSite` attribute
    pub same_site: Option<SameSite>,
}

impl SetCookie {
    /// Session cookie scoped to `/`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            path: "/".to_string(),
            domain: None,
            secure: false,
            same_site: None,
        }
    }

    /// Expire `days` days after `now`. Negative values produce a cookie that is
    /// already expired; lifetimes past the year 9999 are capped there.
    pub fn expiring_in_days(mut self, now: DateTime<Utc>, days: i64) -> Self {
        let latest = latest_expiry();
        let expires = Duration::try_seconds(days.saturating_mul(SECONDS_PER_DAY))
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .map_or(
                if days < 0 {
                    DateTime::<Utc>::MIN_UTC
                } else {
                    latest
                },
                |at| at.min(latest),
            );
        self.expires = Some(expires);
        self
    }

    /// Set the cookie domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the `Secure` flag.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set `SameSite`.
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// Whether the cookie is dead at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    /// Render as a `Set-Cookie` / `document.cookie` assignment.
    pub fn to_header(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if let Some(expires) = self.expires {
            out.push_str("; expires=");
            out.push_str(&expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
        }
        if self.secure {
            out.push_str("; Secure");
        }
        if let Some(same_site) = self.same_site {
            out.push_str(match same_site {
                SameSite::Lax => "; SameSite=Lax",
                SameSite::Strict => "; SameSite=Strict",
            });
        }
        if let Some(domain) = &self.domain {
            out.push_str("; domain=");
            out.push_str(domain);
        }
        out.push_str("; path=");
        out.push_str(&self.path);
        out
    }
}

/// Escape the characters that would break a `name=value; ...` cookie string.
pub fn encode_cookie_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            ';' => out.push_str("%3B"),
            ',' => out.push_str("%2C"),
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// Reverse [`encode_cookie_value`]. Malformed escapes are kept verbatim.
pub fn decode_cookie_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escaped = value
                .get(i + 1..i + 3)
                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = escaped {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

/// Look up `name` in a `name=value; name2=value2` cookie string.
pub fn find_cookie<'a>(cookie_string: &'a str, name: &str) -> Option<&'a str> {
    cookie_string.split(';').find_map(|pair| {
        let pair = pair.trim_start_matches(' ');
        pair.strip_prefix(name)?.strip_prefix('=')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 6, 14, 13, 5, 38).unwrap()
    }

    #[test]
    fn test_find_cookie_skips_leading_spaces() {
        let jar = "foo=value; bar=test;  baz=";
        assert_eq!(find_cookie(jar, "foo"), Some("value"));
        assert_eq!(find_cookie(jar, "bar"), Some("test"));
        assert_eq!(find_cookie(jar, "baz"), Some(""));
        assert_eq!(find_cookie(jar, "qux"), None);
    }

    #[test]
    fn test_find_cookie_requires_exact_name() {
        assert_eq!(find_cookie("showFilterX=1; showFilter=true", "showFilter"), Some("true"));
        assert_eq!(find_cookie("", "showFilter"), None);
    }

    #[test]
    fn test_header_with_expiry() {
        let cookie = SetCookie::new("bar", "test").expiring_in_days(noon(), 0);
        assert_eq!(
            cookie.to_header(),
            "bar=test; expires=Thu, 14 Jun 2018 13:05:38 GMT; path=/"
        );
    }

    #[test]
    fn test_header_with_all_attributes() {
        let cookie = SetCookie::new("dark-mode", "true")
            .expiring_in_days(noon(), 30)
            .secure(true)
            .same_site(SameSite::Lax)
            .with_domain("app.example.com");
        assert_eq!(
            cookie.to_header(),
            "dark-mode=true; expires=Sat, 14 Jul 2018 13:05:38 GMT; Secure; SameSite=Lax; \
             domain=app.example.com; path=/"
        );
    }

    #[test]
    fn test_out_of_range_lifetimes_clamp() {
        let latest = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        let forever = SetCookie::new("k", "v").expiring_in_days(noon(), 100_000_000);
        assert_eq!(forever.expires, Some(latest));
        assert!(!forever.is_expired_at(noon()));
        assert!(forever.to_header().contains("expires=Fri, 31 Dec 9999 23:59:59 GMT"));

        let max = SetCookie::new("k", "v").expiring_in_days(noon(), i64::MAX);
        assert_eq!(max.expires, Some(latest));

        let min = SetCookie::new("k", "v").expiring_in_days(noon(), i64::MIN);
        assert_eq!(min.expires, Some(DateTime::<Utc>::MIN_UTC));
        assert!(min.is_expired_at(noon()));
    }

    #[test]
    fn test_value_escaping() {
        let encoded = encode_cookie_value("a; b,100%\n");
        assert_eq!(encoded, "a%3B b%2C100%25%0A");
        assert_eq!(find_cookie(&format!("k={encoded}; other=1"), "k"), Some(encoded.as_str()));
        assert_eq!(decode_cookie_value(&encoded), "a; b,100%\n");
        assert_eq!(encode_cookie_value("plain=text é"), "plain=text é");
        assert_eq!(decode_cookie_value("50%zz%+1%"), "50%zz%+1%");
    }

    #[test]
    fn test_negative_days_is_already_expired() {
        let cookie = SetCookie::new("k", "").expiring_in_days(noon(), -1);
        assert!(cookie.is_expired_at(noon()));
        assert!(!SetCookie::new("k", "v").is_expired_at(noon()));
    }
}
