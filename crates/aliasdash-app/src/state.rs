//! Dashboard view-model
//!
//! [`DashboardState`] is the complete renderable state of the dashboard.
//! Workflows mutate it only through the methods below and hand out clones as
//! snapshots, so renderers never observe a half-applied update.

use aliasdash_core::reconcile::{merge_pages, reposition, Placement};
use aliasdash_core::validation::PrefixCheck;
use aliasdash_core::{AliasId, AliasOptions, AliasRecord, Mailbox, MailboxId, SuffixOption};

/// Renderable dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Filter panel visible
    pub show_filter: bool,
    /// Stats panel visible
    pub show_stats: bool,

    /// User mailboxes
    pub mailboxes: Vec<Mailbox>,
    /// Mailbox new aliases are attached to
    pub default_mailbox_id: Option<MailboxId>,

    /// Whether another alias may be created
    pub can_create_alias: bool,
    /// Mailboxes/options still loading
    pub is_loading: bool,
    /// Lowercased prefix input
    pub prefix_input: String,
    /// Whether the create action is enabled
    pub prefix_valid: bool,
    /// Inline prefix error
    pub prefix_error: Option<&'static str>,
    /// Available suffixes
    pub suffixes: Vec<SuffixOption>,
    /// Chosen signed suffix
    pub selected_signed_suffix: Option<String>,
    /// Note for the alias being created
    pub note_input: String,

    /// A page fetch is in flight
    pub is_fetching_aliases: bool,
    /// Displayed aliases, every page fetched so far
    pub aliases: Vec<AliasRecord>,
    /// Peek-ahead page; empty means the displayed list is complete
    pub next_page: Vec<AliasRecord>,
    /// Index of the last merged page
    pub page: u32,
    /// "Load more" in progress
    pub is_loading_more: bool,
    /// Current search query
    pub search: String,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            show_filter: false,
            show_stats: false,
            mailboxes: Vec::new(),
            default_mailbox_id: None,
            can_create_alias: true,
            is_loading: true,
            prefix_input: String::new(),
            prefix_valid: false,
            prefix_error: None,
            suffixes: Vec::new(),
            selected_signed_suffix: None,
            note_input: String::new(),
            is_fetching_aliases: true,
            aliases: Vec::new(),
            next_page: Vec::new(),
            page: 0,
            is_loading_more: false,
            search: String::new(),
        }
    }
}

impl DashboardState {
    /// No further page exists.
    pub fn is_last_page(&self) -> bool {
        self.next_page.is_empty()
    }

    /// Displayed alias by id.
    pub fn alias(&self, id: AliasId) -> Option<&AliasRecord> {
        self.aliases.iter().find(|a| a.id == id)
    }

    /// Mutable displayed alias by id.
    pub fn alias_mut(&mut self, id: AliasId) -> Option<&mut AliasRecord> {
        self.aliases.iter_mut().find(|a| a.id == id)
    }

    /// Record loaded mailboxes and pick the default one.
    pub fn apply_mailboxes(&mut self, mailboxes: Vec<Mailbox>) -> Option<MailboxId> {
        self.default_mailbox_id = mailboxes.iter().find(|m| m.default).map(|m| m.id);
        self.mailboxes = mailboxes;
        self.default_mailbox_id
    }

    /// Record alias options and preselect the first suffix.
    pub fn apply_alias_options(&mut self, options: AliasOptions) {
        self.selected_signed_suffix = options.suffixes.first().map(|s| s.signed_suffix.clone());
        self.suffixes = options.suffixes;
        self.can_create_alias = options.can_create;
    }

    /// Start over from page 0.
    pub fn reset_pages(&mut self, first: Vec<AliasRecord>, peek: Vec<AliasRecord>) {
        self.page = 0;
        self.aliases = first;
        self.next_page = peek;
    }

    /// Advance one page: merge the peek-ahead page into the displayed list.
    pub fn merge_next_page(&mut self) {
        self.page += 1;
        let current = std::mem::take(&mut self.aliases);
        let incoming = std::mem::take(&mut self.next_page);
        self.aliases = merge_pages(current, incoming);
    }

    /// Flip `enabled` locally, returning the previous value.
    pub fn flip_enabled(&mut self, id: AliasId) -> Option<bool> {
        let alias = self.alias_mut(id)?;
        let previous = alias.enabled;
        alias.enabled = !previous;
        Some(previous)
    }

    /// Flip `disable_pgp` locally, returning the previous value.
    pub fn flip_pgp(&mut self, id: AliasId) -> Option<bool> {
        let alias = self.alias_mut(id)?;
        let previous = alias.disable_pgp;
        alias.disable_pgp = !previous;
        Some(previous)
    }

    /// Set `pinned` and move the alias to the head (pinned) or tail.
    pub fn apply_pin(&mut self, id: AliasId, pinned: bool) -> bool {
        match self.alias_mut(id) {
            Some(alias) => alias.pinned = pinned,
            None => return false,
        }
        reposition(&mut self.aliases, &id, Placement::for_pinned(pinned))
    }

    /// Drop an alias from the displayed list.
    pub fn remove_alias(&mut self, id: AliasId) -> Option<AliasRecord> {
        let index = self.aliases.iter().position(|a| a.id == id)?;
        Some(self.aliases.remove(index))
    }

    /// Show a newly created alias at the head of the list.
    pub fn prepend_alias(&mut self, alias: AliasRecord) {
        self.remove_alias(alias.id);
        self.aliases.insert(0, alias);
    }

    /// Record the outcome of checking the prefix input.
    pub fn apply_prefix_check(&mut self, check: PrefixCheck) {
        self.prefix_input = check.normalized;
        self.prefix_valid = check.valid;
        self.prefix_error = check.error;
    }

    /// Clear the create-alias inputs.
    pub fn clear_create_inputs(&mut self) {
        self.prefix_input.clear();
        self.prefix_valid = false;
        self.prefix_error = None;
        self.note_input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn state_with(ids: &[u64]) -> DashboardState {
        DashboardState {
            aliases: ids
                .iter()
                .map(|&id| AliasRecord::new(id, format!("a{id}@example.com")))
                .collect(),
            ..DashboardState::default()
        }
    }

    fn ids(state: &DashboardState) -> Vec<u64> {
        state.aliases.iter().map(|a| a.id.0).collect()
    }

    #[test]
    fn test_merge_next_page_advances() {
        let mut state = state_with(&[1, 2, 3]);
        state.next_page = vec![AliasRecord::new(4, "d"), AliasRecord::new(5, "e")];
        assert!(!state.is_last_page());

        state.merge_next_page();
        assert_eq!(ids(&state), vec![1, 2, 3, 4, 5]);
        assert_eq!(state.page, 1);
        assert!(state.is_last_page());
    }

    #[test]
    fn test_pin_and_unpin_reorder() {
        let mut state = state_with(&[1, 2, 3]);
        assert!(state.apply_pin(AliasId(2), true));
        assert_eq!(ids(&state), vec![2, 1, 3]);
        assert!(state.alias(AliasId(2)).unwrap().pinned);

        assert!(state.apply_pin(AliasId(2), false));
        assert_eq!(ids(&state), vec![1, 3, 2]);
        assert!(!state.apply_pin(AliasId(9), true));
    }

    #[test]
    fn test_flip_returns_previous() {
        let mut state = state_with(&[1]);
        assert_eq!(state.flip_enabled(AliasId(1)), Some(true));
        assert!(!state.alias(AliasId(1)).unwrap().enabled);
        assert_eq!(state.flip_pgp(AliasId(1)), Some(false));
        assert_eq!(state.flip_enabled(AliasId(2)), None);
    }

    #[test]
    fn test_default_mailbox_and_first_suffix() {
        let mut state = DashboardState::default();
        let mailboxes = vec![
            Mailbox {
                id: MailboxId(1),
                email: "a@example.org".into(),
                default: false,
                extra: Map::new(),
            },
            Mailbox {
                id: MailboxId(2),
                email: "b@example.org".into(),
                default: true,
                extra: Map::new(),
            },
        ];
        assert_eq!(state.apply_mailboxes(mailboxes), Some(MailboxId(2)));

        state.apply_alias_options(AliasOptions {
            suffixes: vec![
                SuffixOption {
                    suffix: "@a.com".into(),
                    signed_suffix: "sig-a".into(),
                    extra: Map::new(),
                },
                SuffixOption {
                    suffix: "@b.com".into(),
                    signed_suffix: "sig-b".into(),
                    extra: Map::new(),
                },
            ],
            can_create: false,
        });
        assert_eq!(state.selected_signed_suffix.as_deref(), Some("sig-a"));
        assert!(!state.can_create_alias);
    }

    #[test]
    fn test_prepend_keeps_ids_unique() {
        let mut state = state_with(&[1, 2]);
        state.prepend_alias(AliasRecord::new(2, "new"));
        assert_eq!(ids(&state), vec![2, 1]);
        assert_eq!(state.aliases[0].email, "new");
    }
}
