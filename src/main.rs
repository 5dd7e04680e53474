//! gpm - package installer for Grav-style plugins and themes
//!
//! Resolves package identifiers against a remote index, downloads each
//! archive, resolves destination conflicts, and moves the extracted package
//! into place, one package at a time.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod domain;
mod error;
mod fetcher;
mod installer;
mod operations;
mod progress;
mod registry;
mod scratch;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
    };

    // Per-package failures are reported inside the batch loop and do not
    // change the exit status; only errors that prevented the invocation from
    // running at all are fatal.
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
