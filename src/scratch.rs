//! Scratch area for staging downloads and extractions
//!
//! One shared `tmp-gpm` directory under the install root serves a whole
//! batch. It is created lazily on first use and torn down exactly once after
//! the batch loop, whether or not individual packages failed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::remove_tree;
use crate::error::Result;

pub const SCRATCH_DIR_NAME: &str = "tmp-gpm";

/// Staging directory owned by the batch orchestrator
#[derive(Debug)]
pub struct ScratchArea {
    root: PathBuf,
    cleaned: bool,
}

impl ScratchArea {
    /// Create a handle rooted at `<destination_root>/tmp-gpm`. No directory
    /// is created until [`ScratchArea::ensure`] is called.
    pub fn new(destination_root: &Path) -> Self {
        Self {
            root: destination_root.join(SCRATCH_DIR_NAME),
            cleaned: false,
        }
    }

    /// Path of the scratch directory (which may not exist yet)
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create the scratch directory if absent and return its path
    pub fn ensure(&self) -> Result<&Path> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(&self.root)
    }

    /// Recursively remove the scratch directory. Call once, after the last
    /// package of the batch has been processed.
    pub fn cleanup(mut self) -> Result<()> {
        self.cleaned = true;
        remove_tree(&self.root)?;
        Ok(())
    }
}

impl Drop for ScratchArea {
    fn drop(&mut self) {
        // Backstop for early returns; explicit cleanup() is the normal path
        if !self.cleaned {
            let _ = remove_tree(&self.root);
        }
    }
}
