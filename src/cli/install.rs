use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install a plugin:\n    gpm install editor\n\n\
                   Install without prompts:\n    gpm install editor --all-yes\n\n\
                   Install into a specific site root:\n    gpm install editor --destination /var/www/site")]
pub struct InstallArgs {
    /// Package identifiers to install (plugins or themes)
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Force re-fetching the package index from remote
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Assume yes (or the safest answer) instead of prompting
    #[arg(long = "all-yes", short = 'y')]
    pub all_yes: bool,

    /// Destination root to install into (defaults to the current directory)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub destination: Option<PathBuf>,

    /// Package index URL
    #[arg(long, value_name = "URL", env = "GPM_REPOSITORY")]
    pub repository: Option<String>,
}
