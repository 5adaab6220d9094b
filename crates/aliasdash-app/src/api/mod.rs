//! Alias API seam
//!
//! [`AliasApi`] is the only way workflows reach the backend. Production code
//! uses [`HttpAliasApi`]; tests use the scripted fake from
//! `aliasdash-testkit`.

mod http;

pub use http::HttpAliasApi;

use aliasdash_core::{
    AliasId, AliasOptions, AliasPatch, AliasRecord, Mailbox, NewCustomAlias, Result,
};
use async_trait::async_trait;

/// REST contract of the alias backend. Every call is fallible.
#[async_trait]
pub trait AliasApi: Send + Sync {
    /// `GET /api/mailboxes`
    async fn list_mailboxes(&self) -> Result<Vec<Mailbox>>;

    /// `GET /api/v5/alias/options`
    async fn alias_options(&self) -> Result<AliasOptions>;

    /// `POST /api/v2/aliases?page_id=N`, with `{query}` when searching
    async fn list_aliases(&self, page: u32, query: Option<&str>) -> Result<Vec<AliasRecord>>;

    /// `POST /api/aliases/{id}/toggle`, returns the new enabled state
    async fn toggle_alias(&self, id: AliasId) -> Result<bool>;

    /// `PUT /api/aliases/{id}` with a partial body
    async fn update_alias(&self, id: AliasId, patch: &AliasPatch) -> Result<()>;

    /// `DELETE /api/aliases/{id}`
    async fn delete_alias(&self, id: AliasId) -> Result<()>;

    /// `POST /api/v3/alias/custom/new`
    async fn create_custom_alias(&self, request: &NewCustomAlias) -> Result<AliasRecord>;
}
