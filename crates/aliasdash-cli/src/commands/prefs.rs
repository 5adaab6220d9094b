//! Preference commands

use aliasdash_core::{PreferenceValue, Preferences};
use anyhow::{bail, Result};
use clap::Subcommand;

use crate::context::Context;

/// Preference Store access
#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Print a stored value
    Get {
        /// Preference key, e.g. `showStats`
        key: String,
    },
    /// Store a value; `true`/`false` are read back as booleans
    Set {
        /// Preference key
        key: String,
        /// Value
        value: String,
        /// Expiry in days, only honoured by the cookie fallback
        #[arg(long, allow_hyphen_values = true)]
        days: Option<i64>,
    },
    /// Remove a value
    Delete {
        /// Preference key
        key: String,
    },
}

/// Handle preference commands
pub async fn handle_prefs_command(cmd: PrefsCommand, ctx: &Context) -> Result<()> {
    match cmd {
        PrefsCommand::Get { key } => match ctx.prefs.get(&key).await {
            Some(value) => println!("{value}"),
            None => println!("{key} is not set"),
        },
        PrefsCommand::Set { key, value, days } => {
            let value = PreferenceValue::from_raw(&value);
            if !ctx.prefs.set(&key, &value, days).await {
                bail!("{key} was not stored (empty key or value, or no writable storage)");
            }
            tracing::info!(key, %value, "preference stored");
        }
        PrefsCommand::Delete { key } => {
            ctx.prefs.delete(&key).await;
            tracing::info!(key, "preference deleted");
        }
    }
    Ok(())
}
