//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod install;

pub use install::InstallArgs;

/// gpm - package installer for Grav-style plugins and themes
#[derive(Parser, Debug)]
#[command(
    name = "gpm",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install plugins and themes from the remote package index",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  gpm install editor                    \x1b[90m# Install one plugin\x1b[0m\n   \
                  gpm install editor antimatter -y      \x1b[90m# Install several, no prompts\x1b[0m\n   \
                  gpm install editor -d /var/www/site   \x1b[90m# Install into another site root\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install plugins and themes
    Install(InstallArgs),
}
