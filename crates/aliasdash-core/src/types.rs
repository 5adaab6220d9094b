//! Wire types of the alias-management API
//!
//! Only the fields the dashboard reads or mutates are typed; everything else
//! the server sends is kept in `extra` so a record survives a round trip
//! through the client unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable alias identifier, the sole identity key of an alias record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasId(pub u64);

impl fmt::Display for AliasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AliasId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Mailbox identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MailboxId(pub u64);

impl fmt::Display for MailboxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MailboxId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Mailbox as embedded in an alias record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailboxRef {
    /// Mailbox id
    pub id: MailboxId,
    /// Mailbox address
    #[serde(default)]
    pub email: String,
}

/// One alias as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasRecord {
    /// Identity key
    pub id: AliasId,
    /// Full alias address
    #[serde(default)]
    pub email: String,
    /// Whether forwarding is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Pinned aliases sort to the head of the list
    #[serde(default)]
    pub pinned: bool,
    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,
    /// Display name used when replying through the alias
    #[serde(default)]
    pub name: Option<String>,
    /// PGP encryption disabled for this alias
    #[serde(default)]
    pub disable_pgp: bool,
    /// Mailboxes the alias forwards to
    #[serde(default)]
    pub mailboxes: Vec<MailboxRef>,
    /// Fields the dashboard does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AliasRecord {
    /// Minimal record, mostly for tests and fixtures.
    pub fn new(id: u64, email: impl Into<String>) -> Self {
        Self {
            id: AliasId(id),
            email: email.into(),
            enabled: true,
            pinned: false,
            note: None,
            name: None,
            disable_pgp: false,
            mailboxes: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Ids of the assigned mailboxes.
    pub fn mailbox_ids(&self) -> Vec<MailboxId> {
        self.mailboxes.iter().map(|m| m.id).collect()
    }
}

/// A mailbox owned by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Mailbox id
    pub id: MailboxId,
    /// Mailbox address
    #[serde(default)]
    pub email: String,
    /// The default mailbox receives newly created aliases
    #[serde(default)]
    pub default: bool,
    /// Fields the dashboard does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope of `GET /api/mailboxes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailboxList {
    /// All mailboxes
    pub mailboxes: Vec<Mailbox>,
}

/// A domain suffix the user may create aliases under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffixOption {
    /// Human-readable suffix, e.g. `.abc@example.com`
    #[serde(default)]
    pub suffix: String,
    /// Server-signed token presented back when creating the alias
    pub signed_suffix: String,
    /// Fields the dashboard does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope of `GET /api/v5/alias/options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasOptions {
    /// Available suffixes, first one preselected
    #[serde(default)]
    pub suffixes: Vec<SuffixOption>,
    /// Whether the account may create another alias
    #[serde(default = "default_true")]
    pub can_create: bool,
}

fn default_true() -> bool {
    true
}

/// Envelope of `POST /api/v2/aliases`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasPage {
    /// Aliases of the requested page
    pub aliases: Vec<AliasRecord>,
}

/// Response of `POST /api/aliases/{id}/toggle`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToggleResponse {
    /// Enabled state after the toggle
    pub enabled: bool,
}

/// Error body returned by the API on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error
    pub error: String,
}

/// Partial update body of `PUT /api/aliases/{id}`.
///
/// Exactly the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasPatch {
    /// New note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New PGP-disabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_pgp: Option<bool>,
    /// New pinned flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    /// New mailbox assignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox_ids: Option<Vec<MailboxId>>,
}

impl AliasPatch {
    /// Update the note only.
    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::default()
        }
    }

    /// Update the display name only.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Update the PGP-disabled flag only.
    pub fn disable_pgp(disable_pgp: bool) -> Self {
        Self {
            disable_pgp: Some(disable_pgp),
            ..Self::default()
        }
    }

    /// Update the pinned flag only.
    pub fn pinned(pinned: bool) -> Self {
        Self {
            pinned: Some(pinned),
            ..Self::default()
        }
    }

    /// Update the mailbox assignment only.
    pub fn mailboxes(mailbox_ids: Vec<MailboxId>) -> Self {
        Self {
            mailbox_ids: Some(mailbox_ids),
            ..Self::default()
        }
    }
}

/// Body of `POST /api/v3/alias/custom/new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomAlias {
    /// Validated, lowercased prefix
    pub alias_prefix: String,
    /// Signed suffix chosen from the alias options
    pub signed_suffix: String,
    /// Mailboxes of the new alias
    pub mailbox_ids: Vec<MailboxId>,
    /// Optional note
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_record_keeps_unknown_fields() {
        let raw = json!({
            "id": 7,
            "email": "shop.abc@example.com",
            "enabled": true,
            "pinned": false,
            "note": null,
            "nb_forward": 12,
            "mailboxes": [{"id": 1, "email": "me@example.org"}]
        });
        let alias: AliasRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(alias.id, AliasId(7));
        assert_eq!(alias.mailbox_ids(), vec![MailboxId(1)]);
        assert_eq!(alias.extra.get("nb_forward"), Some(&json!(12)));

        let back = serde_json::to_value(&alias).unwrap();
        assert_eq!(back["nb_forward"], json!(12));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let body = serde_json::to_value(AliasPatch::pinned(true)).unwrap();
        assert_eq!(body, json!({"pinned": true}));

        let body = serde_json::to_value(AliasPatch::mailboxes(vec![MailboxId(3)])).unwrap();
        assert_eq!(body, json!({"mailbox_ids": [3]}));
    }

    #[test]
    fn test_alias_options_defaults() {
        let opts: AliasOptions =
            serde_json::from_value(json!({"suffixes": [{"signed_suffix": "s1"}]})).unwrap();
        assert!(opts.can_create);
        assert_eq!(opts.suffixes[0].signed_suffix, "s1");
    }
}
