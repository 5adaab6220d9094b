//! Theme commands

use anyhow::Result;
use clap::Subcommand;

use crate::context::Context;

/// Dark-mode cookie
#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

/// Handle theme commands
pub async fn handle_theme_command(cmd: ThemeCommand, ctx: &Context) -> Result<()> {
    let theme = ctx.theme();
    match cmd {
        ThemeCommand::Show => println!("{}", theme.current().await.as_str()),
        ThemeCommand::Toggle => println!("{}", theme.toggle().await?.as_str()),
    }
    Ok(())
}
