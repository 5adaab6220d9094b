//! Alias commands
//!
//! Each invocation mounts a fresh dashboard, pages forward until the target
//! alias is displayed, and then runs the same intent the web page would.

use aliasdash_app::{Dashboard, DashboardState, DeletePrompt, Intent};
use aliasdash_core::{AliasId, AliasRecord, MailboxId};
use anyhow::{anyhow, bail, Result};
use clap::Subcommand;

use crate::context::Context;

/// Alias listing and mutations
#[derive(Subcommand)]
pub enum AliasesCommand {
    /// List aliases
    List {
        /// Number of pages to show
        #[arg(short, long, default_value = "1")]
        pages: u32,
        /// Only aliases matching this query
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show mailboxes and available suffixes
    Options,
    /// Enable or disable forwarding
    Toggle {
        /// Alias id
        id: AliasId,
    },
    /// Pin or unpin
    Pin {
        /// Alias id
        id: AliasId,
    },
    /// Enable or disable PGP encryption
    Pgp {
        /// Alias id
        id: AliasId,
    },
    /// Set the note
    Note {
        /// Alias id
        id: AliasId,
        /// New note
        note: String,
    },
    /// Set the display name
    Name {
        /// Alias id
        id: AliasId,
        /// New display name
        name: String,
    },
    /// Reassign mailboxes
    Mailboxes {
        /// Alias id
        id: AliasId,
        /// Mailbox ids
        mailbox_ids: Vec<MailboxId>,
    },
    /// Delete permanently
    Delete {
        /// Alias id
        id: AliasId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Disable instead of deleting
    Disable {
        /// Alias id
        id: AliasId,
    },
    /// Create a custom alias
    Create {
        /// Prefix, lowercased before validation
        prefix: String,
        /// Suffix as shown by `aliases options`; the first one by default
        #[arg(short, long)]
        suffix: Option<String>,
        /// Note
        #[arg(short, long, default_value = "")]
        note: String,
    },
}

/// Handle alias commands
pub async fn handle_aliases_command(cmd: AliasesCommand, ctx: &Context) -> Result<()> {
    let mut dashboard = ctx.dashboard()?;
    dashboard.mount().await;

    match cmd {
        AliasesCommand::List { pages, query } => {
            if let Some(q) = query {
                dashboard.dispatch(Intent::Search(q)).await;
            }
            for _ in 1..pages.max(1) {
                if dashboard.state().is_last_page() {
                    break;
                }
                dashboard.dispatch(Intent::LoadMore).await;
            }
            print_aliases(dashboard.state());
        }
        AliasesCommand::Options => print_options(dashboard.state()),
        AliasesCommand::Toggle { id } => {
            reveal(&mut dashboard, id).await?;
            dashboard.toggle_enabled(id).await?;
            show(&dashboard, id);
        }
        AliasesCommand::Pin { id } => {
            reveal(&mut dashboard, id).await?;
            dashboard.toggle_pin(id).await?;
            show(&dashboard, id);
        }
        AliasesCommand::Pgp { id } => {
            reveal(&mut dashboard, id).await?;
            dashboard.toggle_pgp(id).await?;
            show(&dashboard, id);
        }
        AliasesCommand::Note { id, note } => {
            reveal(&mut dashboard, id).await?;
            dashboard.save_note(id, note).await?;
            show(&dashboard, id);
        }
        AliasesCommand::Name { id, name } => {
            reveal(&mut dashboard, id).await?;
            dashboard.save_name(id, name).await?;
            show(&dashboard, id);
        }
        AliasesCommand::Mailboxes { id, mailbox_ids } => {
            reveal(&mut dashboard, id).await?;
            dashboard.set_mailboxes(id, mailbox_ids).await?;
            show(&dashboard, id);
        }
        AliasesCommand::Delete { id, yes } => {
            let alias = reveal(&mut dashboard, id).await?;
            if !yes {
                let prompt = DeletePrompt::for_alias(&alias, None);
                println!("{}\n{}", prompt.title, prompt.message);
                let labels: Vec<&str> = prompt.choices.iter().map(|c| c.label()).collect();
                println!("choices: {}", labels.join(" | "));
                println!("rerun with --yes to delete, or use `aliases disable {id}`");
                return Ok(());
            }
            dashboard.delete_alias(id).await?;
        }
        AliasesCommand::Disable { id } => {
            reveal(&mut dashboard, id).await?;
            dashboard.disable_alias(id).await?;
        }
        AliasesCommand::Create {
            prefix,
            suffix,
            note,
        } => {
            let check = dashboard.set_prefix_input(&prefix);
            if let Some(hint) = check.error {
                bail!("{hint}");
            }
            if let Some(suffix) = suffix {
                let signed = dashboard
                    .state()
                    .suffixes
                    .iter()
                    .find(|s| s.suffix == suffix || s.signed_suffix == suffix)
                    .map(|s| s.signed_suffix.clone())
                    .ok_or_else(|| anyhow!("unknown suffix {suffix}, see `aliases options`"))?;
                dashboard.select_suffix(signed);
            }
            dashboard.set_note_input(note);
            let alias = dashboard.create_custom_alias().await?;
            print_alias(&alias);
        }
    }
    Ok(())
}

/// Page forward until `id` is displayed.
async fn reveal(dashboard: &mut Dashboard, id: AliasId) -> Result<AliasRecord> {
    loop {
        if let Some(alias) = dashboard.state().alias(id) {
            return Ok(alias.clone());
        }
        if dashboard.state().is_last_page() {
            bail!("alias {id} not found");
        }
        dashboard.load_more().await;
    }
}

fn show(dashboard: &Dashboard, id: AliasId) {
    if let Some(alias) = dashboard.state().alias(id) {
        print_alias(alias);
    }
}

fn print_alias(alias: &AliasRecord) {
    let mut flags = Vec::new();
    if !alias.enabled {
        flags.push("disabled");
    }
    if alias.pinned {
        flags.push("pinned");
    }
    if alias.disable_pgp {
        flags.push("no-pgp");
    }
    let mailboxes: Vec<&str> = alias.mailboxes.iter().map(|m| m.email.as_str()).collect();
    println!(
        "{:>8}  {:<40} [{}] -> {}{}",
        alias.id.to_string(),
        alias.email,
        flags.join(","),
        mailboxes.join(", "),
        alias
            .note
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|n| format!("  # {n}"))
            .unwrap_or_default()
    );
}

fn print_aliases(state: &DashboardState) {
    for alias in &state.aliases {
        print_alias(alias);
    }
    if !state.is_last_page() {
        println!("... more aliases, use --pages {}", state.page + 2);
    }
}

fn print_options(state: &DashboardState) {
    println!("mailboxes:");
    for mailbox in &state.mailboxes {
        let marker = if mailbox.default { " (default)" } else { "" };
        println!("  {:>6}  {}{}", mailbox.id.to_string(), mailbox.email, marker);
    }
    println!("suffixes:");
    for suffix in &state.suffixes {
        println!("  {}", suffix.suffix);
    }
    if !state.can_create_alias {
        println!("alias quota reached, upgrade to create more");
    }
}
