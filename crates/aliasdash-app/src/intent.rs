//! Typed user actions

use aliasdash_core::{AliasId, AliasRecord, MailboxId};

/// Something the user asked the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show/hide the filter panel
    ToggleFilter,
    /// Show/hide the stats panel
    ToggleStats,
    /// Merge the peek-ahead page and fetch the next one
    LoadMore,
    /// Search aliases
    Search(String),
    /// Clear the search and reload
    ResetFilter,
    /// Enable/disable forwarding
    ToggleEnabled(AliasId),
    /// Enable/disable PGP
    TogglePgp(AliasId),
    /// Pin/unpin
    TogglePin(AliasId),
    /// Save a note
    SaveNote {
        /// Alias to update
        id: AliasId,
        /// New note
        note: String,
    },
    /// Save a display name
    SaveName {
        /// Alias to update
        id: AliasId,
        /// New display name
        name: String,
    },
    /// Reassign mailboxes
    SetMailboxes {
        /// Alias to update
        id: AliasId,
        /// Selected mailboxes
        mailbox_ids: Vec<MailboxId>,
    },
    /// Delete permanently
    Delete(AliasId),
    /// Disable instead of deleting
    Disable(AliasId),
    /// Prefix input changed
    PrefixInput(String),
    /// Note input of the create dialog changed
    NoteInput(String),
    /// Suffix chosen in the create dialog
    SelectSuffix(String),
    /// Submit the create dialog
    CreateCustomAlias,
}

/// Button of the delete dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteChoice {
    /// Disable the alias instead
    Disable,
    /// Delete it
    Delete,
    /// Close the dialog
    Cancel,
}

impl DeleteChoice {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disable => "Disable it",
            Self::Delete => "Delete it, I don't need it anymore",
            Self::Cancel => "Cancel",
        }
    }

    /// Intent triggered by the button, if any.
    pub fn intent(self, id: AliasId) -> Option<Intent> {
        match self {
            Self::Disable => Some(Intent::Disable(id)),
            Self::Delete => Some(Intent::Delete(id)),
            Self::Cancel => None,
        }
    }
}

/// Content of the delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    /// Dialog title
    pub title: String,
    /// Dialog body
    pub message: String,
    /// Offered buttons, in display order
    pub choices: Vec<DeleteChoice>,
}

impl DeletePrompt {
    /// Build the prompt for `alias`. Aliases on a custom domain with a trash
    /// are restorable from `trash_url`. Disabling is only offered for enabled
    /// aliases.
    pub fn for_alias(alias: &AliasRecord, trash_url: Option<&str>) -> Self {
        let message = match trash_url {
            Some(url) => format!(
                "If you want to stop receiving emails from this alias, you can disable it \
                 instead. When it's deleted, it's moved to the domain trash ({url})."
            ),
            None => "If you don't want to receive emails from this alias, you can disable it. \
                     Please note that once deleted, it can't be restored."
                .to_string(),
        };

        let mut choices = Vec::with_capacity(3);
        if alias.enabled {
            choices.push(DeleteChoice::Disable);
        }
        choices.push(DeleteChoice::Delete);
        choices.push(DeleteChoice::Cancel);

        Self {
            title: format!("Delete alias {}?", alias.email),
            message,
            choices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disable_offered_only_when_enabled() {
        let mut alias = AliasRecord::new(1, "a@example.com");
        let prompt = DeletePrompt::for_alias(&alias, None);
        assert_eq!(
            prompt.choices,
            vec![DeleteChoice::Disable, DeleteChoice::Delete, DeleteChoice::Cancel]
        );

        alias.enabled = false;
        let prompt = DeletePrompt::for_alias(&alias, None);
        assert_eq!(prompt.choices, vec![DeleteChoice::Delete, DeleteChoice::Cancel]);
        assert_eq!(prompt.title, "Delete alias a@example.com?");
    }

    #[test]
    fn test_trash_message() {
        let alias = AliasRecord::new(1, "a@example.com");
        let prompt = DeletePrompt::for_alias(&alias, Some("https://example.com/trash"));
        assert!(prompt.message.contains("https://example.com/trash"));
    }

    #[test]
    fn test_choice_intents() {
        assert_eq!(
            DeleteChoice::Delete.intent(AliasId(3)),
            Some(Intent::Delete(AliasId(3)))
        );
        assert_eq!(DeleteChoice::Cancel.intent(AliasId(3)), None);
    }
}
