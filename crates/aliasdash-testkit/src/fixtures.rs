//! Fixture builders

use std::sync::Arc;

use aliasdash_core::effects::TimeEffects;
use aliasdash_core::{AliasOptions, AliasRecord, Mailbox, MailboxId, PreferenceStore, SuffixOption};
use aliasdash_effects::{CookieJarHandler, MemoryStorageHandler};
use serde_json::Map;

use crate::clock::ManualClock;

/// Alias `id` with address `alias{id}@example.com`.
pub fn alias(id: u64) -> AliasRecord {
    AliasRecord::new(id, format!("alias{id}@example.com"))
}

/// One alias per id, in order.
pub fn aliases(ids: &[u64]) -> Vec<AliasRecord> {
    ids.iter().map(|&id| alias(id)).collect()
}

/// Mailbox 1 (default) and mailbox 2.
pub fn default_mailboxes() -> Vec<Mailbox> {
    vec![
        Mailbox {
            id: MailboxId(1),
            email: "me@example.org".to_string(),
            default: true,
            extra: Map::new(),
        },
        Mailbox {
            id: MailboxId(2),
            email: "work@example.org".to_string(),
            default: false,
            extra: Map::new(),
        },
    ]
}

/// Two suffixes, creation allowed.
pub fn default_options() -> AliasOptions {
    AliasOptions {
        suffixes: vec![
            SuffixOption {
                suffix: ".abc@example.com".to_string(),
                signed_suffix: "signed-abc".to_string(),
                extra: Map::new(),
            },
            SuffixOption {
                suffix: "@mydomain.test".to_string(),
                signed_suffix: "signed-mydomain".to_string(),
                extra: Map::new(),
            },
        ],
        can_create: true,
    }
}

/// Preference Store over memory storage and an in-memory cookie jar.
pub fn memory_preferences() -> Arc<PreferenceStore<MemoryStorageHandler, CookieJarHandler>> {
    let clock: Arc<dyn TimeEffects> = Arc::new(ManualClock::new());
    Arc::new(PreferenceStore::new(
        Arc::new(MemoryStorageHandler::new()),
        Arc::new(CookieJarHandler::in_memory(clock.clone())),
        clock,
    ))
}
