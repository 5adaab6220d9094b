//! Pre-flight validation
//!
//! Inputs rejected here never reach the network; the caller shows the message
//! inline instead.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DashError, Result};
use crate::types::MailboxId;

/// Lowercase letters, digits, `-`, `_` and `.`; no leading, trailing or
/// consecutive dots.
pub const ALIAS_PREFIX_PATTERN: &str = r"^[0-9a-z_-]+(?:\.[0-9a-z_-]+)*$";

/// Inline message shown for a non-empty invalid prefix.
pub const ALIAS_PREFIX_HINT: &str =
    "Only lowercase letters, numbers, dots (.), dashes (-) and underscores (_) are supported.";

/// Message shown when a mailbox update has no mailbox selected.
pub const EMPTY_MAILBOX_SELECTION: &str = "You must select at least a mailbox";

#[allow(clippy::expect_used)]
static ALIAS_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(ALIAS_PREFIX_PATTERN).expect("alias prefix pattern compiles"));

/// Whether `prefix` is acceptable as-is.
pub fn is_valid_alias_prefix(prefix: &str) -> bool {
    ALIAS_PREFIX_RE.is_match(prefix)
}

/// Result of checking the prefix input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixCheck {
    /// The input, lowercased
    pub normalized: String,
    /// Whether the create action may be enabled
    pub valid: bool,
    /// Inline error; empty input gets none
    pub error: Option<&'static str>,
}

/// Lowercase the raw input and check it.
pub fn check_alias_prefix_input(raw: &str) -> PrefixCheck {
    let normalized = raw.to_lowercase();
    let valid = is_valid_alias_prefix(&normalized);
    let error = (!valid && !normalized.is_empty()).then_some(ALIAS_PREFIX_HINT);
    PrefixCheck {
        normalized,
        valid,
        error,
    }
}

/// Reject an invalid prefix before a create request.
pub fn validate_alias_prefix(prefix: &str) -> Result<()> {
    if is_valid_alias_prefix(prefix) {
        Ok(())
    } else {
        Err(DashError::invalid(ALIAS_PREFIX_HINT))
    }
}

/// Reject an empty mailbox selection before an update request.
pub fn validate_mailbox_selection(mailbox_ids: &[MailboxId]) -> Result<()> {
    if mailbox_ids.is_empty() {
        Err(DashError::invalid(EMPTY_MAILBOX_SELECTION))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots() {
        assert!(is_valid_alias_prefix("foo.bar"));
        assert!(!is_valid_alias_prefix("foo..bar"));
        assert!(!is_valid_alias_prefix(".foo"));
        assert!(!is_valid_alias_prefix("foo."));
        assert!(!is_valid_alias_prefix("."));
    }

    #[test]
    fn test_character_class() {
        assert!(is_valid_alias_prefix("a-b_c.9"));
        assert!(is_valid_alias_prefix("-_-"));
        assert!(!is_valid_alias_prefix("Foo"));
        assert!(!is_valid_alias_prefix("foo bar"));
        assert!(!is_valid_alias_prefix("foo+bar"));
        assert!(!is_valid_alias_prefix(""));
    }

    #[test]
    fn test_input_is_lowercased_first() {
        let check = check_alias_prefix_input("Shop.Online");
        assert_eq!(check.normalized, "shop.online");
        assert!(check.valid);
        assert_eq!(check.error, None);
    }

    #[test]
    fn test_empty_input_has_no_message() {
        let check = check_alias_prefix_input("");
        assert!(!check.valid);
        assert_eq!(check.error, None);

        let check = check_alias_prefix_input("a..b");
        assert_eq!(check.error, Some(ALIAS_PREFIX_HINT));
    }

    #[test]
    fn test_mailbox_selection() {
        assert!(validate_mailbox_selection(&[]).is_err());
        assert!(validate_mailbox_selection(&[MailboxId(1)]).is_ok());
    }
}
