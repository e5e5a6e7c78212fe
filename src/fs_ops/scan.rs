//! Source directory scanning.
//! Lists one directory level, keeps recognized image files, and returns them
//! as absolute paths in file-name order.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::DirectoryError;

use super::helpers::io_error_with_help_io;

/// Extensions accepted by the scanner. Matching is case-sensitive: only the
/// all-lower and all-upper spellings qualify.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "PNG", "jpg", "JPG", "jpeg", "JPEG", "bmp", "BMP", "gif", "GIF", "webp", "WEBP", "tif",
    "TIF", "tiff", "TIFF",
];

/// True when `name` is a visible file name with an allow-listed extension.
/// Only the extension has to be valid UTF-8; the stem may be any bytes.
pub fn is_image_name(name: &OsStr) -> bool {
    if name.as_encoded_bytes().starts_with(b".") {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
}

/// Scan `dir` (non-recursively) for image files.
///
/// Results are absolute, sorted by file name, and capped at `limit` entries
/// when a limit is given. Entries past the cap are dropped with a warning.
pub fn scan_images(dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>, DirectoryError> {
    const NAME: &str = "source directory";

    let meta = fs::metadata(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DirectoryError::NotFound {
            name: NAME,
            path: dir.to_path_buf(),
        },
        _ => DirectoryError::Unreadable {
            name: NAME,
            path: dir.to_path_buf(),
            source: e,
        },
    })?;
    if !meta.is_dir() {
        return Err(DirectoryError::NotADirectory {
            name: NAME,
            path: dir.to_path_buf(),
        });
    }

    let root = dunce::canonicalize(dir).map_err(|e| DirectoryError::Unreadable {
        name: NAME,
        path: dir.to_path_buf(),
        source: io_error_with_help_io("canonicalize", dir)(e),
    })?;

    let mut images = Vec::new();
    let mut skipped = 0usize;
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                return Err(DirectoryError::Unreadable {
                    name: NAME,
                    path: root.clone(),
                    source: io_error_with_help_io("read directory", &root)(source),
                });
            }
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !is_image_name(entry.file_name()) {
            continue;
        }
        // Follow symlinks for the type check so links to images still count.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            debug!(path = %entry.path().display(), "Skipping non-file entry with image extension");
            continue;
        }

        if limit.is_some_and(|max| images.len() >= max) {
            skipped += 1;
            continue;
        }
        images.push(entry.into_path());
    }

    if skipped > 0 {
        warn!(
            kept = images.len(),
            omitted = skipped,
            "Image limit reached; remaining files were not queued"
        );
    }
    info!(dir = %root.display(), count = images.len(), "Scanned source directory");
    Ok(images)
}
