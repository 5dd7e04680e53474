//! Package installer: opens the staged archive, extracts it into the scratch
//! area, and atomically relocates the package folder to its destination.

pub mod destination;

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Component, Path};

use crate::domain::Package;
use crate::error::{GpmError, Result};
use crate::scratch::ScratchArea;

/// Install the staged archive for `package` at its destination under
/// `destination_root`.
///
/// Opening failures report the original download URL (the staged path is an
/// internal detail) and leave the filesystem untouched. Archives must wrap
/// their contents in exactly one root folder; anything else is rejected
/// before extraction rather than producing a bogus destination.
pub fn install(
    package: &Package,
    archive_path: &Path,
    scratch: &ScratchArea,
    destination_root: &Path,
) -> Result<()> {
    let file = File::open(archive_path).map_err(|e| GpmError::ArchiveOpenFailed {
        url: package.download.clone(),
        reason: e.to_string(),
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| GpmError::ArchiveOpenFailed {
        url: package.download.clone(),
        reason: e.to_string(),
    })?;

    let root_folder = wrapping_root(&mut archive)?;

    let staging = scratch.ensure()?;
    extract(&mut archive, staging)?;

    let destination = destination::target_path(package, destination_root);
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    // The resolver leaves an empty placeholder dir behind; rename over an
    // existing directory is not portable, so drop it first.
    if destination.is_dir() {
        fs::remove_dir(&destination)?;
    }
    fs::rename(staging.join(&root_folder), &destination)?;

    Ok(())
}

/// Name of the single top-level folder every archive entry must live under
fn wrapping_root(archive: &mut zip::ZipArchive<File>) -> Result<String> {
    if archive.is_empty() {
        return Err(GpmError::ArchiveLayoutInvalid {
            reason: "archive is empty".to_string(),
        });
    }

    let mut root: Option<String> = None;
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| GpmError::ArchiveLayoutInvalid {
            reason: e.to_string(),
        })?;
        let Some(path) = entry.enclosed_name() else {
            return Err(GpmError::ArchiveLayoutInvalid {
                reason: format!("unsafe entry path: {}", entry.name()),
            });
        };
        let mut components = path.components();
        let Some(Component::Normal(top)) = components.next() else {
            return Err(GpmError::ArchiveLayoutInvalid {
                reason: format!("entry outside any folder: {}", entry.name()),
            });
        };
        // A bare top-level entry is only acceptable as the root folder
        // itself; a top-level file would be renamed onto the destination as
        // a plain file.
        if components.next().is_none() && !entry.is_dir() {
            return Err(GpmError::ArchiveLayoutInvalid {
                reason: format!("top-level entry is not a folder: {}", entry.name()),
            });
        }
        let top = top.to_string_lossy().into_owned();
        match &root {
            None => root = Some(top),
            Some(existing) if *existing == top => {}
            Some(existing) => {
                return Err(GpmError::ArchiveLayoutInvalid {
                    reason: format!("multiple top-level entries: '{existing}' and '{top}'"),
                });
            }
        }
    }

    root.ok_or_else(|| GpmError::ArchiveLayoutInvalid {
        reason: "archive has no folder entries".to_string(),
    })
}

/// Extract every archive entry under `dest`, skipping nothing: layout was
/// validated up front, and `enclosed_name` guards against path traversal.
fn extract(archive: &mut zip::ZipArchive<File>, dest: &Path) -> Result<()> {
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| GpmError::ArchiveLayoutInvalid {
            reason: e.to_string(),
        })?;
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            let mut buffer = Vec::new();
            entry.read_to_end(&mut buffer)?;
            outfile.write_all(&buffer)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    let _ = fs::set_permissions(&outpath, fs::Permissions::from_mode(mode));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PackageKind;
    use std::io::Write as _;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn package() -> Package {
        Package {
            name: "Editor".to_string(),
            version: "1.2.0".to_string(),
            slug: "editor".to_string(),
            download: "https://example.com/editor.zip".to_string(),
            install_path: Some("user/plugins/editor".to_string()),
            kind: Some(PackageKind::Plugin),
        }
    }

    /// Build a zip archive on disk from (path, contents) pairs; entries
    /// ending in '/' become directories.
    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, contents) in entries {
            if name.ends_with('/') {
                zip.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(contents.as_bytes()).unwrap();
            }
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_install_places_root_folder_contents() {
        let temp = TempDir::new().unwrap();
        let scratch = ScratchArea::new(temp.path());
        let archive = temp.path().join("staged.zip");
        write_zip(
            &archive,
            &[
                ("editor/", ""),
                ("editor/editor.php", "<?php // plugin"),
                ("editor/assets/editor.css", ".editor {}"),
            ],
        );

        install(&package(), &archive, &scratch, temp.path()).unwrap();

        let dest = temp.path().join("user/plugins/editor");
        assert_eq!(
            fs::read_to_string(dest.join("editor.php")).unwrap(),
            "<?php // plugin"
        );
        assert!(dest.join("assets/editor.css").exists());
    }

    #[test]
    fn test_install_replaces_resolver_placeholder() {
        let temp = TempDir::new().unwrap();
        let scratch = ScratchArea::new(temp.path());
        let dest = temp.path().join("user/plugins/editor");
        fs::create_dir_all(&dest).unwrap();

        let archive = temp.path().join("staged.zip");
        write_zip(&archive, &[("editor/editor.php", "new")]);

        install(&package(), &archive, &scratch, temp.path()).unwrap();
        assert_eq!(fs::read_to_string(dest.join("editor.php")).unwrap(), "new");
    }

    #[test]
    fn test_install_unreadable_archive_reports_download_url() {
        let temp = TempDir::new().unwrap();
        let scratch = ScratchArea::new(temp.path());
        let archive = temp.path().join("staged.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();

        let err = install(&package(), &archive, &scratch, temp.path()).unwrap_err();
        assert!(matches!(err, GpmError::ArchiveOpenFailed { .. }));
        assert!(err.to_string().contains("https://example.com/editor.zip"));
        // No mutation beyond the failed open
        assert!(!temp.path().join("user").exists());
    }

    #[test]
    fn test_install_missing_archive_fails_softly() {
        let temp = TempDir::new().unwrap();
        let scratch = ScratchArea::new(temp.path());

        let err = install(
            &package(),
            &temp.path().join("nope.zip"),
            &scratch,
            temp.path(),
        )
        .unwrap_err();
        assert!(matches!(err, GpmError::ArchiveOpenFailed { .. }));
    }

    #[test]
    fn test_install_rejects_multiple_top_level_entries() {
        let temp = TempDir::new().unwrap();
        let scratch = ScratchArea::new(temp.path());
        let archive = temp.path().join("staged.zip");
        write_zip(
            &archive,
            &[("editor/editor.php", "a"), ("other/readme.md", "b")],
        );

        let err = install(&package(), &archive, &scratch, temp.path()).unwrap_err();
        assert!(matches!(err, GpmError::ArchiveLayoutInvalid { .. }));
        assert!(!temp.path().join("user").exists());
    }

    #[test]
    fn test_install_rejects_single_top_level_file() {
        let temp = TempDir::new().unwrap();
        let scratch = ScratchArea::new(temp.path());
        let archive = temp.path().join("staged.zip");
        write_zip(&archive, &[("readme.txt", "no wrapping folder here")]);

        let err = install(&package(), &archive, &scratch, temp.path()).unwrap_err();
        assert!(matches!(err, GpmError::ArchiveLayoutInvalid { .. }));
        // The destination must never end up as a plain file
        assert!(!temp.path().join("user").exists());
    }

    #[test]
    fn test_install_accepts_root_folder_without_directory_entry() {
        // Some archivers omit the explicit folder entry; files under a
        // shared root are still a valid layout.
        let temp = TempDir::new().unwrap();
        let scratch = ScratchArea::new(temp.path());
        let archive = temp.path().join("staged.zip");
        write_zip(&archive, &[("editor/editor.php", "<?php // plugin")]);

        install(&package(), &archive, &scratch, temp.path()).unwrap();
        assert!(temp.path().join("user/plugins/editor").is_dir());
        assert!(temp.path().join("user/plugins/editor/editor.php").exists());
    }

    #[test]
    fn test_install_rejects_empty_archive() {
        let temp = TempDir::new().unwrap();
        let scratch = ScratchArea::new(temp.path());
        let archive = temp.path().join("staged.zip");
        write_zip(&archive, &[]);

        let err = install(&package(), &archive, &scratch, temp.path()).unwrap_err();
        assert!(matches!(err, GpmError::ArchiveLayoutInvalid { .. }));
    }

    #[test]
    fn test_install_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("staged.zip");
        write_zip(&archive, &[("editor/editor.php", "same contents")]);

        for _ in 0..2 {
            let scratch = ScratchArea::new(temp.path());
            // Second run: resolver would have recreated an empty placeholder
            let dest = temp.path().join("user/plugins/editor");
            if dest.exists() {
                crate::common::fs::remove_tree(&dest).unwrap();
                fs::create_dir_all(&dest).unwrap();
            }
            install(&package(), &archive, &scratch, temp.path()).unwrap();
            scratch.cleanup().unwrap();
        }

        let dest = temp.path().join("user/plugins/editor");
        assert_eq!(
            fs::read_to_string(dest.join("editor.php")).unwrap(),
            "same contents"
        );
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 1);
    }
}
