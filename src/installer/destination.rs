//! Destination conflict resolution
//!
//! Classifies the install target and decides, interactively or by fixed
//! policy, whether installation may proceed. A `false` return aborts the
//! current package only; an abort never leaves partial filesystem mutation
//! behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::remove_tree;
use crate::domain::Package;
use crate::error::Result;
use crate::ui::{self, Confirm};

/// State of a target path at the moment of inspection. Recomputed per
/// package, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    Absent,
    Directory,
    SymbolicLink,
}

/// Classify `target` without following symbolic links
pub fn classify(target: &Path) -> DestinationState {
    match fs::symlink_metadata(target) {
        Err(_) => DestinationState::Absent,
        Ok(meta) if meta.file_type().is_symlink() => DestinationState::SymbolicLink,
        Ok(meta) if meta.is_dir() => DestinationState::Directory,
        // Plain files are left alone; the rename in the installer will fail
        // and report the package as failed.
        Ok(_) => DestinationState::Absent,
    }
}

/// Resolve the install target for `package`. Returns `true` when the install
/// may proceed and `false` when this package should be skipped.
///
/// Policy: existing plain directories are replaced (after confirmation when
/// interactive; unconditionally under `all_yes`); symbolic links are only
/// ever removed after an explicit confirmation and are auto-skipped under
/// `all_yes`.
pub fn resolve(
    package: &Package,
    destination_root: &Path,
    all_yes: bool,
    confirm: &mut dyn Confirm,
) -> Result<bool> {
    let target = target_path(package, destination_root);

    match classify(&target) {
        DestinationState::Directory => {
            if !all_yes {
                println!("  |- Checking destination...  {}", ui::yellow("exists"));
                let overwrite = confirm.confirm(
                    "  |  '- The package has been detected as installed already, do you want to overwrite it?",
                )?;
                if !overwrite {
                    println!(
                        "  |     '- {}",
                        ui::red("You decided to not overwrite the already installed package.")
                    );
                    return Ok(false);
                }
            }

            // Delete completes before the empty placeholder is recreated
            remove_tree(&target)?;
            fs::create_dir_all(&target)?;
        }
        DestinationState::SymbolicLink => {
            println!("  |- Checking destination...  {}", ui::yellow("symbolic link"));

            if all_yes {
                println!("  |     '- {}", ui::yellow("Skipped automatically."));
                return Ok(false);
            }

            let unlink = confirm.confirm(
                "  |  '- Destination has been detected as symlink, delete symbolic link first?",
            )?;
            if !unlink {
                println!(
                    "  |     '- {}",
                    ui::red("You decided to not delete the symlink automatically.")
                );
                return Ok(false);
            }

            // Removes only the link, never its target
            fs::remove_file(&target)?;
        }
        DestinationState::Absent => {}
    }

    println!("  |- Checking destination...  {}", ui::green("ok"));
    Ok(true)
}

/// Absolute install target for a package
pub fn target_path(package: &Package, destination_root: &Path) -> PathBuf {
    destination_root.join(package.install_path())
}
