//! Command-line frontend for the alias dashboard
//!
//! Drives the headless dashboard against a live backend and exposes the page
//! settings (preferences, theme, analytics opt-out) and the client-side
//! helpers (prefix validation, WebAuthn transcoding, key files) as commands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod context;
mod notifier;

use commands::{
    aliases::{handle_aliases_command, AliasesCommand},
    analytics::{handle_analytics_command, AnalyticsCommand},
    prefs::{handle_prefs_command, PrefsCommand},
    theme::{handle_theme_command, ThemeCommand},
    tools::{self, WebauthnCommand},
};
use context::Context;

#[derive(Parser)]
#[command(name = "aliasdash")]
#[command(about = "Alias dashboard - manage email aliases from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (defaults to ~/.aliasdash/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and write stored preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Show or switch the dark-mode theme
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Analytics opt-out
    #[command(subcommand)]
    Analytics(AnalyticsCommand),

    /// List and manage aliases
    #[command(subcommand)]
    Aliases(AliasesCommand),

    /// Check an alias prefix without creating anything
    ValidatePrefix {
        /// Prefix as typed
        prefix: String,
    },

    /// Decode WebAuthn options sent by the server
    #[command(subcommand)]
    Webauthn(WebauthnCommand),

    /// Check a PGP public key file and print the part that would be used
    PgpKey {
        /// Key file
        path: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);

    match cli.command {
        Commands::Prefs(cmd) => {
            let ctx = Context::open(config::load_config(&config_path)?).await?;
            handle_prefs_command(cmd, &ctx).await?;
        }

        Commands::Theme(cmd) => {
            let ctx = Context::open(config::load_config(&config_path)?).await?;
            handle_theme_command(cmd, &ctx).await?;
        }

        Commands::Analytics(cmd) => {
            let ctx = Context::open(config::load_config(&config_path)?).await?;
            handle_analytics_command(cmd, &ctx).await?;
        }

        Commands::Aliases(cmd) => {
            let ctx = Context::open(config::load_config(&config_path)?).await?;
            handle_aliases_command(cmd, &ctx).await?;
        }

        Commands::ValidatePrefix { prefix } => {
            tools::validate_prefix(&prefix)?;
        }

        Commands::Webauthn(cmd) => {
            tools::handle_webauthn_command(cmd)?;
        }

        Commands::PgpKey { path } => {
            tools::pgp_key(&path)?;
        }
    }

    Ok(())
}
