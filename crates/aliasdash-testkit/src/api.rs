//! In-memory alias backend

use std::collections::HashMap;

use aliasdash_app::AliasApi;
use aliasdash_core::{
    AliasId, AliasOptions, AliasPatch, AliasRecord, DashError, Mailbox, MailboxRef,
    NewCustomAlias, Result,
};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::fixtures::{default_mailboxes, default_options};

/// API operation, used to script failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /api/mailboxes`
    ListMailboxes,
    /// `GET /api/v5/alias/options`
    AliasOptions,
    /// `POST /api/v2/aliases`
    ListAliases,
    /// `POST /api/aliases/{id}/toggle`
    Toggle,
    /// `PUT /api/aliases/{id}`
    Update,
    /// `DELETE /api/aliases/{id}`
    Delete,
    /// `POST /api/v3/alias/custom/new`
    Create,
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    /// Mailbox listing
    ListMailboxes,
    /// Options listing
    AliasOptions,
    /// Page fetch
    ListAliases {
        /// Requested page
        page: u32,
        /// Search query, if any
        query: Option<String>,
    },
    /// Enable/disable toggle
    Toggle(AliasId),
    /// Partial update
    Update(AliasId, AliasPatch),
    /// Deletion
    Delete(AliasId),
    /// Custom alias creation
    Create(NewCustomAlias),
}

impl ApiCall {
    fn operation(&self) -> Operation {
        match self {
            Self::ListMailboxes => Operation::ListMailboxes,
            Self::AliasOptions => Operation::AliasOptions,
            Self::ListAliases { .. } => Operation::ListAliases,
            Self::Toggle(_) => Operation::Toggle,
            Self::Update(..) => Operation::Update,
            Self::Delete(_) => Operation::Delete,
            Self::Create(_) => Operation::Create,
        }
    }
}

struct Inner {
    pages: Vec<Vec<AliasRecord>>,
    mailboxes: Vec<Mailbox>,
    options: AliasOptions,
    failing: HashMap<Operation, DashError>,
    failing_pages: HashMap<u32, DashError>,
    calls: Vec<ApiCall>,
    next_id: u64,
}

impl Inner {
    fn alias_mut(&mut self, id: AliasId) -> Option<&mut AliasRecord> {
        self.pages.iter_mut().flatten().find(|a| a.id == id)
    }

    fn record(&mut self, call: ApiCall) -> Result<()> {
        let operation = call.operation();
        let page = match &call {
            ApiCall::ListAliases { page, .. } => Some(*page),
            _ => None,
        };
        tracing::trace!(?call, "mock alias API call");
        self.calls.push(call);
        if let Some(err) = page.and_then(|p| self.failing_pages.get(&p)) {
            return Err(err.clone());
        }
        match self.failing.get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Alias backend kept in memory, paged exactly as given.
pub struct MockAliasApi {
    inner: Mutex<Inner>,
}

impl Default for MockAliasApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAliasApi {
    /// Backend with one default mailbox, two suffixes and no aliases.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                pages: Vec::new(),
                mailboxes: default_mailboxes(),
                options: default_options(),
                failing: HashMap::new(),
                failing_pages: HashMap::new(),
                calls: Vec::new(),
                next_id: 10_000,
            }),
        }
    }

    /// Serve `pages`; page `n` is `pages[n]`, later pages are empty.
    pub fn with_pages(self, pages: Vec<Vec<AliasRecord>>) -> Self {
        self.inner.lock().pages = pages;
        self
    }

    /// Serve these mailboxes.
    pub fn with_mailboxes(self, mailboxes: Vec<Mailbox>) -> Self {
        self.inner.lock().mailboxes = mailboxes;
        self
    }

    /// Serve these options.
    pub fn with_options(self, options: AliasOptions) -> Self {
        self.inner.lock().options = options;
        self
    }

    /// Make every call of `operation` fail with `err` until [`Self::recover`].
    pub fn fail(&self, operation: Operation, err: DashError) {
        self.inner.lock().failing.insert(operation, err);
    }

    /// Make fetching `page` fail with `err`.
    pub fn fail_page(&self, page: u32, err: DashError) {
        self.inner.lock().failing_pages.insert(page, err);
    }

    /// Stop failing `operation`.
    pub fn recover(&self, operation: Operation) {
        self.inner.lock().failing.remove(&operation);
    }

    /// Replace the content of `page`, e.g. to simulate server-side edits.
    pub fn set_page(&self, page: usize, aliases: Vec<AliasRecord>) {
        let mut inner = self.inner.lock();
        if inner.pages.len() <= page {
            inner.pages.resize(page + 1, Vec::new());
        }
        inner.pages[page] = aliases;
    }

    /// Every request received so far.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.lock().calls.clone()
    }

    /// Requests other than listings.
    pub fn mutations(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !matches!(
                    c,
                    ApiCall::ListMailboxes | ApiCall::AliasOptions | ApiCall::ListAliases { .. }
                )
            })
            .collect()
    }

    /// Server-side copy of an alias.
    pub fn server_alias(&self, id: AliasId) -> Option<AliasRecord> {
        self.inner
            .lock()
            .pages
            .iter()
            .flatten()
            .find(|a| a.id == id)
            .cloned()
    }
}

#[async_trait]
impl AliasApi for MockAliasApi {
    async fn list_mailboxes(&self) -> Result<Vec<Mailbox>> {
        let mut inner = self.inner.lock();
        inner.record(ApiCall::ListMailboxes)?;
        Ok(inner.mailboxes.clone())
    }

    async fn alias_options(&self) -> Result<AliasOptions> {
        let mut inner = self.inner.lock();
        inner.record(ApiCall::AliasOptions)?;
        Ok(inner.options.clone())
    }

    async fn list_aliases(&self, page: u32, query: Option<&str>) -> Result<Vec<AliasRecord>> {
        let mut inner = self.inner.lock();
        inner.record(ApiCall::ListAliases {
            page,
            query: query.map(str::to_string),
        })?;
        let aliases = inner.pages.get(page as usize).cloned().unwrap_or_default();
        Ok(match query {
            Some(q) => aliases.into_iter().filter(|a| a.email.contains(q)).collect(),
            None => aliases,
        })
    }

    async fn toggle_alias(&self, id: AliasId) -> Result<bool> {
        let mut inner = self.inner.lock();
        inner.record(ApiCall::Toggle(id))?;
        let alias = inner
            .alias_mut(id)
            .ok_or_else(|| DashError::http(404, "Alias not found"))?;
        alias.enabled = !alias.enabled;
        Ok(alias.enabled)
    }

    async fn update_alias(&self, id: AliasId, patch: &AliasPatch) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.record(ApiCall::Update(id, patch.clone()))?;
        let known = inner.mailboxes.clone();
        let alias = inner
            .alias_mut(id)
            .ok_or_else(|| DashError::http(404, "Alias not found"))?;
        if let Some(note) = &patch.note {
            alias.note = Some(note.clone());
        }
        if let Some(name) = &patch.name {
            alias.name = Some(name.clone());
        }
        if let Some(disable_pgp) = patch.disable_pgp {
            alias.disable_pgp = disable_pgp;
        }
        if let Some(pinned) = patch.pinned {
            alias.pinned = pinned;
        }
        if let Some(ids) = &patch.mailbox_ids {
            alias.mailboxes = ids
                .iter()
                .map(|id| MailboxRef {
                    id: *id,
                    email: known
                        .iter()
                        .find(|m| m.id == *id)
                        .map(|m| m.email.clone())
                        .unwrap_or_default(),
                })
                .collect();
        }
        Ok(())
    }

    async fn delete_alias(&self, id: AliasId) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.record(ApiCall::Delete(id))?;
        for page in &mut inner.pages {
            page.retain(|a| a.id != id);
        }
        Ok(())
    }

    async fn create_custom_alias(&self, request: &NewCustomAlias) -> Result<AliasRecord> {
        let mut inner = self.inner.lock();
        inner.record(ApiCall::Create(request.clone()))?;
        let suffix = inner
            .options
            .suffixes
            .iter()
            .find(|s| s.signed_suffix == request.signed_suffix)
            .map(|s| s.suffix.clone())
            .ok_or_else(|| DashError::http(400, "Invalid signed_suffix"))?;
        let email = format!("{}{}", request.alias_prefix, suffix);
        if inner.pages.iter().flatten().any(|a| a.email == email) {
            return Err(DashError::http(409, format!("{email} already exists")));
        }

        inner.next_id += 1;
        let mut alias = AliasRecord::new(inner.next_id, email);
        alias.note = Some(request.note.clone()).filter(|n| !n.is_empty());
        alias.mailboxes = request
            .mailbox_ids
            .iter()
            .map(|id| MailboxRef {
                id: *id,
                email: String::new(),
            })
            .collect();
        if inner.pages.is_empty() {
            inner.pages.push(Vec::new());
        }
        inner.pages[0].insert(0, alias.clone());
        Ok(alias)
    }
}
