//! aliasdash Core - Client Foundation
//!
//! This crate provides the domain types, effect interfaces and pure client-side
//! logic shared by every aliasdash frontend. It performs no I/O itself: storage,
//! time and HTTP are reached through the traits in [`effects`] and implemented
//! by `aliasdash-effects` and `aliasdash-app`.
//!
//! # Contents
//!
//! ## Domain Types
//! - [`AliasRecord`], [`Mailbox`], [`AliasOptions`]: wire shapes of the alias API
//! - [`AliasId`], [`MailboxId`]: stable identifiers
//!
//! ## Effect Interfaces
//! - [`effects::LocalStorageEffects`]: persistent key-value storage
//! - [`effects::CookieEffects`]: cookie jar used as the fallback path
//! - [`effects::TimeEffects`]: wall clock for cookie expiry
//!
//! ## Pure Logic
//! - [`preferences`]: the Preference Store with transparent cookie fallback
//! - [`reconcile`]: paginated list merge and pin reordering
//! - [`validation`]: alias-prefix and mailbox-selection pre-flight checks
//! - [`webauthn`]: base64url transcoding of WebAuthn ceremony payloads

#![forbid(unsafe_code)]

/// Cookie string formatting and lookup
pub mod cookie;

/// Pure effect interfaces (no implementations)
pub mod effects;

/// Unified error handling
pub mod errors;

/// Alias, mailbox and option wire types
pub mod types;

/// Preference Store over persistent storage with cookie fallback
pub mod preferences;

/// Paginated list reconciliation
pub mod reconcile;

/// Pre-flight input validation
pub mod validation;

/// Dark-mode theme derivation
pub mod theme;

/// Analytics opt-out gate
pub mod analytics;

/// PGP public key file acceptance
pub mod pgp_key;

/// WebAuthn byte/base64url transcoding
pub mod webauthn;

pub use errors::{DashError, Result};
pub use preferences::{PreferenceStore, PreferenceValue, Preferences};
pub use reconcile::{merge_pages, reposition, Identified, Placement};
pub use types::{
    AliasId, AliasOptions, AliasPatch, AliasRecord, Mailbox, MailboxId, MailboxRef,
    NewCustomAlias, SuffixOption,
};
