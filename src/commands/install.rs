//! Install command implementation
//!
//! Bridges the parsed CLI arguments to the batch orchestrator:
//! 1. Resolve the destination root (current directory by default)
//! 2. Fetch the remote package index and look up the requested identifiers
//! 3. Hand the resulting batch to the orchestrator
//!
//! An empty resolved set is not an error: the command prints a notice and
//! returns success, matching the behavior operators rely on in scripts.

use crate::cli::InstallArgs;
use crate::error::{GpmError, Result};
use crate::operations::install::{self, InstallOptions, InstallReport};
use crate::registry::{DEFAULT_REPOSITORY, Registry};
use crate::ui::TerminalConfirm;

pub fn run(args: InstallArgs) -> Result<InstallReport> {
    let destination = match args.destination {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| GpmError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?,
    };

    let repository = args.repository.as_deref().unwrap_or(DEFAULT_REPOSITORY);
    let registry = Registry::fetch(repository, args.force)?;
    let batch = registry.find_packages(&args.packages);

    println!();

    if batch.is_empty() {
        println!("Nothing to install.");
        println!();
        return Ok(InstallReport {
            not_found: batch.not_found,
            ..InstallReport::default()
        });
    }

    let options = InstallOptions {
        all_yes: args.all_yes,
    };

    install::run(&batch, &destination, &options, &mut TerminalConfirm)
}
