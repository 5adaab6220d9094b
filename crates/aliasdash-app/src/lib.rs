//! # aliasdash App
//!
//! Portable headless core of the alias dashboard. Frontends (the CLI today)
//! render [`DashboardState`] snapshots and feed user actions back as
//! [`Intent`]s; everything between is plain async Rust with no rendering or
//! DOM coupling.
//!
//! ## Modules
//!
//! - [`api`]: the [`AliasApi`] seam and its reqwest implementation
//! - [`state`]: the dashboard view-model
//! - [`intent`]: typed user actions and delete-dialog choices
//! - [`dashboard`]: workflows that call the API, update state and notify
//! - [`notify`]: transient user notifications
//! - [`theme`], [`analytics`]: cookie/preference backed page settings

#![forbid(unsafe_code)]

pub mod analytics;
pub mod api;
pub mod dashboard;
pub mod intent;
pub mod notify;
pub mod state;
pub mod theme;

pub use api::{AliasApi, HttpAliasApi};
pub use dashboard::Dashboard;
pub use intent::{DeleteChoice, DeletePrompt, Intent};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use state::DashboardState;
pub use theme::ThemeController;
