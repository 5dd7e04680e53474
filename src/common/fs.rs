//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

/// Remove a directory tree recursively. The single removal routine shared by
/// destination overwrites and scratch-area cleanup.
///
/// Does nothing when `root` does not exist or is not a directory. Symbolic
/// links inside the tree are unlinked, never followed.
pub fn remove_tree<P: AsRef<Path>>(root: P) -> std::io::Result<()> {
    let root = root.as_ref();

    let meta = match fs::symlink_metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if !meta.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let entry_path = entry.path();
        // file_type() on a DirEntry does not traverse symlinks
        if entry.file_type()?.is_dir() {
            remove_tree(&entry_path)?;
        } else {
            fs::remove_file(&entry_path)?;
        }
    }

    fs::remove_dir(root)
}
