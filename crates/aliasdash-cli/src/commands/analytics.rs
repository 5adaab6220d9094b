//! Analytics opt-out commands

use aliasdash_app::analytics::{analytics_decision, opt_in, opt_out};
use aliasdash_core::analytics::AnalyticsDecision;
use anyhow::{bail, Result};
use clap::Subcommand;

use crate::context::Context;

/// Analytics opt-out stored in the Preference Store
#[derive(Subcommand)]
pub enum AnalyticsCommand {
    /// Whether analytics would load for the configured host
    Status,
    /// Stop analytics for this origin
    OptOut,
    /// Undo a previous opt-out
    OptIn,
}

/// Handle analytics commands
pub async fn handle_analytics_command(cmd: AnalyticsCommand, ctx: &Context) -> Result<()> {
    match cmd {
        AnalyticsCommand::Status => {
            let decision = analytics_decision(ctx.prefs.as_ref(), ctx.config.host()).await;
            let text = match decision {
                AnalyticsDecision::Enabled => "enabled",
                AnalyticsDecision::NotProduction => "disabled (not a production host)",
                AnalyticsDecision::OptedOut => "disabled (opted out)",
            };
            println!("analytics {text}");
        }
        AnalyticsCommand::OptOut => {
            if !opt_out(ctx.prefs.as_ref()).await {
                bail!("opt-out could not be stored");
            }
            println!("analytics disabled for this origin");
        }
        AnalyticsCommand::OptIn => {
            opt_in(ctx.prefs.as_ref()).await;
            println!("analytics opt-out removed");
        }
    }
    Ok(())
}
