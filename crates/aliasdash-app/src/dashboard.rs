//! Dashboard workflows
//!
//! Each workflow calls the [`AliasApi`], updates [`DashboardState`] and
//! reports the outcome through the [`Notifier`]. Failures of every kind
//! (transport, HTTP status, rejected input) end in an error notification and
//! an exact reversal of any optimistic change; they are also returned so
//! callers can react, but never need to be handled to keep the page usable.

use std::sync::Arc;

use aliasdash_core::preferences::keys;
use aliasdash_core::validation::{
    check_alias_prefix_input, validate_alias_prefix, validate_mailbox_selection, PrefixCheck,
};
use aliasdash_core::{
    AliasId, AliasPatch, AliasRecord, DashError, MailboxId, NewCustomAlias, PreferenceValue,
    Preferences, Result,
};

use crate::api::AliasApi;
use crate::intent::Intent;
use crate::notify::{Notification, Notifier, LOAD_RETRY_HINT};
use crate::state::DashboardState;

/// Headless alias dashboard.
pub struct Dashboard {
    api: Arc<dyn AliasApi>,
    prefs: Arc<dyn Preferences>,
    notifier: Arc<dyn Notifier>,
    state: DashboardState,
}

impl Dashboard {
    /// Create a dashboard with empty state.
    pub fn new(
        api: Arc<dyn AliasApi>,
        prefs: Arc<dyn Preferences>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            prefs,
            notifier,
            state: DashboardState::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.clone()
    }

    fn fail(&self, title: &str, err: DashError) -> DashError {
        let message = err.user_message();
        self.fail_with(title, message, err)
    }

    fn fail_with(&self, title: &str, message: String, err: DashError) -> DashError {
        tracing::warn!(title, error = %err, "dashboard action failed");
        self.notifier.notify(Notification::error(title, message));
        err
    }

    fn missing(&self, title: &str, id: AliasId) -> DashError {
        self.fail(
            title,
            DashError::not_found(format!("alias {id} is not displayed")),
        )
    }

    // ─── Loading ─────────────────────────────────────────────────────────

    /// Restore panel flags and load everything.
    pub async fn mount(&mut self) -> DashboardState {
        self.state.show_filter = self.prefs.flag(keys::SHOW_FILTER).await;
        self.state.show_stats = self.prefs.flag(keys::SHOW_STATS).await;
        self.load_initial_data().await;
        self.snapshot()
    }

    /// Mailboxes, then alias options, then the first pages of aliases.
    pub async fn load_initial_data(&mut self) {
        self.state.is_loading = true;
        // failures are already notified
        let _ = self.load_mailboxes().await;
        let _ = self.load_alias_options().await;
        self.state.is_loading = false;
        self.load_aliases().await;
    }

    /// Load mailboxes and remember the default one.
    pub async fn load_mailboxes(&mut self) -> Result<()> {
        const TITLE: &str = "Could not load mailboxes";
        let mailboxes = match self.api.list_mailboxes().await {
            Ok(mailboxes) => mailboxes,
            Err(e) => return Err(self.fail_load(TITLE, e)),
        };
        if self.state.apply_mailboxes(mailboxes).is_none() {
            return Err(self.fail_load(TITLE, DashError::not_found("no default mailbox")));
        }
        Ok(())
    }

    /// Load suffixes and the creation quota.
    pub async fn load_alias_options(&mut self) -> Result<()> {
        const TITLE: &str = "Could not load alias options";
        self.state.is_loading = true;
        let result = match self.api.alias_options().await {
            Ok(options) if options.suffixes.is_empty() => {
                self.state.apply_alias_options(options);
                Err(self.fail_load(TITLE, DashError::not_found("no alias suffix available")))
            }
            Ok(options) => {
                self.state.apply_alias_options(options);
                Ok(())
            }
            Err(e) => Err(self.fail_load(TITLE, e)),
        };
        self.state.is_loading = false;
        result
    }

    fn fail_load(&self, title: &str, err: DashError) -> DashError {
        tracing::warn!(title, error = %err, "dashboard load failed");
        self.notifier
            .notify(Notification::error(title, LOAD_RETRY_HINT));
        err
    }

    /// Fetch one page. A failed fetch is notified and yields an empty page.
    async fn fetch_page(&mut self, page: u32) -> Vec<AliasRecord> {
        self.state.is_fetching_aliases = true;
        let query = Some(self.state.search.as_str()).filter(|q| !q.is_empty());
        let aliases = match self.api.list_aliases(page, query).await {
            Ok(aliases) => aliases,
            Err(e) => {
                self.fail_load("Aliases could not be loaded", e);
                Vec::new()
            }
        };
        self.state.is_fetching_aliases = false;
        aliases
    }

    /// Reload from page 0, fetching page 1 ahead to know whether more exist.
    pub async fn load_aliases(&mut self) {
        self.state.reset_pages(Vec::new(), Vec::new());
        let first = self.fetch_page(0).await;
        let peek = self.fetch_page(1).await;
        self.state.reset_pages(first, peek);
        tracing::debug!(
            displayed = self.state.aliases.len(),
            last_page = self.state.is_last_page(),
            "aliases loaded"
        );
    }

    /// Merge the already fetched next page, then fetch the one after it.
    pub async fn load_more(&mut self) {
        self.state.is_loading_more = true;
        self.state.merge_next_page();
        let page = self.state.page + 1;
        self.state.next_page = self.fetch_page(page).await;
        self.state.is_loading_more = false;
    }

    /// Search and reload from page 0.
    pub async fn search(&mut self, query: impl Into<String>) {
        self.state.search = query.into();
        self.load_aliases().await;
    }

    /// Clear the search and reload.
    pub async fn reset_filter(&mut self) {
        self.state.search.clear();
        self.load_aliases().await;
    }

    // ─── Panels ──────────────────────────────────────────────────────────

    /// Flip and persist the filter panel flag.
    pub async fn toggle_filter(&mut self) -> bool {
        self.state.show_filter = !self.state.show_filter;
        let value = PreferenceValue::Bool(self.state.show_filter);
        self.prefs.set(keys::SHOW_FILTER, &value, None).await;
        self.state.show_filter
    }

    /// Flip and persist the stats panel flag.
    pub async fn toggle_stats(&mut self) -> bool {
        self.state.show_stats = !self.state.show_stats;
        let value = PreferenceValue::Bool(self.state.show_stats);
        self.prefs.set(keys::SHOW_STATS, &value, None).await;
        self.state.show_stats
    }

    // ─── Alias mutations ─────────────────────────────────────────────────

    /// Optimistically flip `enabled`; adopt the server's answer, or revert.
    pub async fn toggle_enabled(&mut self, id: AliasId) -> Result<bool> {
        const TITLE: &str = "Could not disable/enable alias";
        let Some(previous) = self.state.flip_enabled(id) else {
            return Err(self.missing(TITLE, id));
        };
        match self.api.toggle_alias(id).await {
            Ok(enabled) => {
                let email = match self.state.alias_mut(id) {
                    Some(alias) => {
                        alias.enabled = enabled;
                        alias.email.clone()
                    }
                    None => String::new(),
                };
                let verb = if enabled { "enabled" } else { "disabled" };
                self.notifier
                    .notify(Notification::success(format!("{email} is {verb}")));
                Ok(enabled)
            }
            Err(e) => {
                if let Some(alias) = self.state.alias_mut(id) {
                    alias.enabled = previous;
                }
                Err(self.fail(TITLE, e))
            }
        }
    }

    /// Optimistically flip `disable_pgp`; revert on failure.
    pub async fn toggle_pgp(&mut self, id: AliasId) -> Result<()> {
        const TITLE: &str = "Could not toggle PGP";
        let Some(previous) = self.state.flip_pgp(id) else {
            return Err(self.missing(TITLE, id));
        };
        match self
            .api
            .update_alias(id, &AliasPatch::disable_pgp(!previous))
            .await
        {
            Ok(()) => {
                let email = self.email_of(id);
                let state = if previous { "enabled" } else { "disabled" };
                self.notifier
                    .notify(Notification::success(format!("PGP {state} for {email}")));
                Ok(())
            }
            Err(e) => {
                if let Some(alias) = self.state.alias_mut(id) {
                    alias.disable_pgp = previous;
                }
                Err(self.fail(TITLE, e))
            }
        }
    }

    /// Flip `pinned`. The list is reordered only once the server confirms;
    /// on failure the flag is reverted and the order is untouched.
    pub async fn toggle_pin(&mut self, id: AliasId) -> Result<()> {
        const TITLE: &str = "Alias could not be pinned";
        let Some(alias) = self.state.alias_mut(id) else {
            return Err(self.missing(TITLE, id));
        };
        let previous = alias.pinned;
        alias.pinned = !previous;

        match self.api.update_alias(id, &AliasPatch::pinned(!previous)).await {
            Ok(()) => {
                self.state.apply_pin(id, !previous);
                let email = self.email_of(id);
                let verb = if previous { "unpinned" } else { "pinned" };
                self.notifier
                    .notify(Notification::success(format!("{email} is {verb}")));
                Ok(())
            }
            Err(e) => {
                if let Some(alias) = self.state.alias_mut(id) {
                    alias.pinned = previous;
                }
                Err(self.fail(TITLE, e))
            }
        }
    }

    /// Save a note.
    pub async fn save_note(&mut self, id: AliasId, note: impl Into<String>) -> Result<()> {
        const TITLE: &str = "Note could not be saved";
        let note = note.into();
        if self.state.alias(id).is_none() {
            return Err(self.missing(TITLE, id));
        }
        match self.api.update_alias(id, &AliasPatch::note(note.clone())).await {
            Ok(()) => {
                let email = self.email_of(id);
                if let Some(alias) = self.state.alias_mut(id) {
                    alias.note = Some(note);
                }
                self.notifier
                    .notify(Notification::success(format!("Note saved for {email}")));
                Ok(())
            }
            Err(e) => Err(self.fail(TITLE, e)),
        }
    }

    /// Save a display name.
    pub async fn save_name(&mut self, id: AliasId, name: impl Into<String>) -> Result<()> {
        const TITLE: &str = "Could not save Display name";
        let name = name.into();
        if self.state.alias(id).is_none() {
            return Err(self.missing(TITLE, id));
        }
        match self.api.update_alias(id, &AliasPatch::name(name.clone())).await {
            Ok(()) => {
                let email = self.email_of(id);
                if let Some(alias) = self.state.alias_mut(id) {
                    alias.name = Some(name);
                }
                self.notifier
                    .notify(Notification::success(format!("Display name saved for {email}")));
                Ok(())
            }
            Err(e) => Err(self.fail(TITLE, e)),
        }
    }

    /// Reassign mailboxes. An empty selection is rejected without a request.
    pub async fn set_mailboxes(&mut self, id: AliasId, mailbox_ids: Vec<MailboxId>) -> Result<()> {
        const TITLE: &str = "Mailbox could not be updated";
        if let Err(e) = validate_mailbox_selection(&mailbox_ids) {
            return Err(self.fail("Error", e));
        }
        match self
            .api
            .update_alias(id, &AliasPatch::mailboxes(mailbox_ids.clone()))
            .await
        {
            Ok(()) => {
                let email = self.email_of(id);
                let known = self.state.mailboxes.clone();
                if let Some(alias) = self.state.alias_mut(id) {
                    alias.mailboxes = mailbox_ids
                        .iter()
                        .map(|mid| aliasdash_core::MailboxRef {
                            id: *mid,
                            email: known
                                .iter()
                                .find(|m| m.id == *mid)
                                .map(|m| m.email.clone())
                                .unwrap_or_default(),
                        })
                        .collect();
                }
                self.notifier
                    .notify(Notification::success(format!("Mailbox updated for {email}")));
                Ok(())
            }
            Err(e) => Err(self.fail(TITLE, e)),
        }
    }

    /// Delete, drop from the list, and refresh options (the quota changes).
    pub async fn delete_alias(&mut self, id: AliasId) -> Result<()> {
        const TITLE: &str = "Alias could not be deleted";
        match self.api.delete_alias(id).await {
            Ok(()) => {
                let email = self.email_of(id);
                self.state.remove_alias(id);
                self.notifier
                    .notify(Notification::success(format!("Alias {email} deleted")));
                // failure is notified inside
                let _ = self.load_alias_options().await;
                Ok(())
            }
            Err(e) => Err(self.fail(TITLE, e)),
        }
    }

    /// Disable an enabled alias. Already disabled aliases are left alone.
    pub async fn disable_alias(&mut self, id: AliasId) -> Result<()> {
        const TITLE: &str = "Alias could not be disabled";
        let Some(alias) = self.state.alias(id) else {
            return Err(self.missing(TITLE, id));
        };
        if !alias.enabled {
            return Ok(());
        }
        match self.api.toggle_alias(id).await {
            Ok(_) => {
                let email = self.email_of(id);
                if let Some(alias) = self.state.alias_mut(id) {
                    alias.enabled = false;
                }
                self.notifier
                    .notify(Notification::success(format!("{email} is disabled")));
                Ok(())
            }
            Err(e) => Err(self.fail(TITLE, e)),
        }
    }

    // ─── Custom alias creation ───────────────────────────────────────────

    /// Lowercase and validate the prefix input.
    pub fn set_prefix_input(&mut self, raw: &str) -> PrefixCheck {
        let check = check_alias_prefix_input(raw);
        self.state.apply_prefix_check(check.clone());
        check
    }

    /// Update the note of the create dialog.
    pub fn set_note_input(&mut self, note: impl Into<String>) {
        self.state.note_input = note.into();
    }

    /// Choose a signed suffix.
    pub fn select_suffix(&mut self, signed_suffix: impl Into<String>) {
        self.state.selected_signed_suffix = Some(signed_suffix.into());
    }

    /// Create an alias from the dialog inputs.
    ///
    /// The inputs are cleared and the options reloaded whatever the outcome.
    pub async fn create_custom_alias(&mut self) -> Result<AliasRecord> {
        const TITLE: &str = "Alias could not be created";
        let result = match self.new_custom_alias_request() {
            Ok(request) => self.api.create_custom_alias(&request).await,
            Err(e) => Err(e),
        };
        let result = match result {
            Ok(alias) => {
                self.notifier
                    .notify(Notification::success(format!("Alias {} created", alias.email)));
                self.state.prepend_alias(alias.clone());
                Ok(alias)
            }
            Err(e) => Err(self.fail_with(TITLE, e.server_message(), e)),
        };

        self.state.clear_create_inputs();
        // failure is notified inside
        let _ = self.load_alias_options().await;
        result
    }

    fn new_custom_alias_request(&self) -> Result<NewCustomAlias> {
        validate_alias_prefix(&self.state.prefix_input)?;
        let signed_suffix = self
            .state
            .selected_signed_suffix
            .clone()
            .ok_or_else(|| DashError::invalid("No alias suffix selected"))?;
        let default_mailbox = self
            .state
            .default_mailbox_id
            .ok_or_else(|| DashError::invalid("No default mailbox"))?;
        Ok(NewCustomAlias {
            alias_prefix: self.state.prefix_input.clone(),
            signed_suffix,
            mailbox_ids: vec![default_mailbox],
            note: self.state.note_input.clone(),
        })
    }

    fn email_of(&self, id: AliasId) -> String {
        self.state
            .alias(id)
            .map(|a| a.email.clone())
            .unwrap_or_else(|| format!("alias {id}"))
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    /// Run `intent` and return the resulting snapshot. Failures have already
    /// been notified by the time this returns.
    pub async fn dispatch(&mut self, intent: Intent) -> DashboardState {
        tracing::debug!(?intent, "dispatch");
        let outcome: Result<()> = match intent {
            Intent::ToggleFilter => {
                self.toggle_filter().await;
                Ok(())
            }
            Intent::ToggleStats => {
                self.toggle_stats().await;
                Ok(())
            }
            Intent::LoadMore => {
                self.load_more().await;
                Ok(())
            }
            Intent::Search(query) => {
                self.search(query).await;
                Ok(())
            }
            Intent::ResetFilter => {
                self.reset_filter().await;
                Ok(())
            }
            Intent::ToggleEnabled(id) => self.toggle_enabled(id).await.map(|_| ()),
            Intent::TogglePgp(id) => self.toggle_pgp(id).await,
            Intent::TogglePin(id) => self.toggle_pin(id).await,
            Intent::SaveNote { id, note } => self.save_note(id, note).await,
            Intent::SaveName { id, name } => self.save_name(id, name).await,
            Intent::SetMailboxes { id, mailbox_ids } => self.set_mailboxes(id, mailbox_ids).await,
            Intent::Delete(id) => self.delete_alias(id).await,
            Intent::Disable(id) => self.disable_alias(id).await,
            Intent::PrefixInput(raw) => {
                self.set_prefix_input(&raw);
                Ok(())
            }
            Intent::NoteInput(note) => {
                self.set_note_input(note);
                Ok(())
            }
            Intent::SelectSuffix(suffix) => {
                self.select_suffix(suffix);
                Ok(())
            }
            Intent::CreateCustomAlias => self.create_custom_alias().await.map(|_| ()),
        };
        if let Err(e) = outcome {
            tracing::debug!(error = %e, "intent finished with error");
        }
        self.snapshot()
    }
}
