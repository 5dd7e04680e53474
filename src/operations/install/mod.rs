//! Batch install orchestrator
//!
//! Drives each package of a batch through fetch, destination resolution and
//! installation. Every stage failure is recovered at the package level; the
//! batch always runs to completion and the scratch area is removed exactly
//! once at the end.

use std::path::Path;

use crate::domain::{InstallBatch, Package};
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::installer;
use crate::progress::DownloadProgress;
use crate::scratch::ScratchArea;
use crate::ui::{self, Confirm};

/// Options carried from the CLI into the batch loop
#[derive(Debug, Default, Clone)]
pub struct InstallOptions {
    /// Suppress prompts and apply the fixed conflict policy
    pub all_yes: bool,
}

/// Outcome of one batch, by slug
#[derive(Debug, Default)]
pub struct InstallReport {
    pub installed: Vec<String>,
    pub failed: Vec<String>,
    pub not_found: Vec<String>,
}

/// Install every package of `batch` under `destination_root`.
///
/// Packages are processed strictly in batch order, one at a time; a failed
/// package never aborts the rest. Nothing is retried.
pub fn run(
    batch: &InstallBatch,
    destination_root: &Path,
    options: &InstallOptions,
    confirm: &mut dyn Confirm,
) -> Result<InstallReport> {
    let mut report = InstallReport {
        not_found: batch.not_found.clone(),
        ..InstallReport::default()
    };

    if !batch.not_found.is_empty() {
        let missing: Vec<String> =
            batch.not_found.iter().map(|slug| ui::red(slug)).collect();
        println!("These packages were not found in the index: {}", missing.join(", "));
    }

    let fetcher = Fetcher::new()?;
    let scratch = ScratchArea::new(destination_root);

    for package in &batch.packages {
        if install_one(&fetcher, package, &scratch, destination_root, options, confirm) {
            report.installed.push(package.slug.clone());
        } else {
            report.failed.push(package.slug.clone());
        }
        println!();
    }

    scratch.cleanup()?;

    Ok(report)
}

/// Fetch, resolve and install a single package, reporting the three-line
/// progress block. Returns whether the package ended up installed.
fn install_one(
    fetcher: &Fetcher,
    package: &Package,
    scratch: &ScratchArea,
    destination_root: &Path,
    options: &InstallOptions,
    confirm: &mut dyn Confirm,
) -> bool {
    println!(
        "Preparing to install {} [v{}]",
        ui::cyan(&package.name),
        package.version
    );

    let progress = DownloadProgress::new();
    let archive = match fetcher.fetch(package, scratch, &mut |event| progress.update(event)) {
        Ok(path) => {
            progress.finish();
            path
        }
        Err(e) => {
            progress.abandon();
            println!("  |- Downloading package...   {}", ui::red("error"));
            println!("  |  '- {e}");
            println!("  '- {}", ui::red("Installation failed or aborted."));
            return false;
        }
    };

    match installer::destination::resolve(package, destination_root, options.all_yes, confirm) {
        Ok(true) => {}
        Ok(false) => {
            println!("  '- {}", ui::red("Installation failed or aborted."));
            return false;
        }
        Err(e) => {
            println!("  |  '- {e}");
            println!("  '- {}", ui::red("Installation failed or aborted."));
            return false;
        }
    }

    match installer::install(package, &archive, scratch, destination_root) {
        Ok(()) => {
            println!("  |- Installing package...    {}", ui::green("ok"));
            println!("  '- {}", ui::green("Success!"));
            true
        }
        Err(e) => {
            println!("  |- Installing package...    {}", ui::red("error"));
            println!("  |  '- {e}");
            println!("  '- {}", ui::red("Installation failed or aborted."));
            false
        }
    }
}
