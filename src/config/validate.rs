//! Startup validation and directory bootstrap.
//! Verifies the source directory, creates missing destination directories one
//! level deep, canonicalizes all three and checks they are distinct.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{ArgumentError, DirectoryError};
use crate::triage::Targets;

use super::types::Config;

/// Validate `cfg`, create missing destination directories and rewrite every
/// directory to its canonical absolute form. Returns the destination pair.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<Targets> {
    if cfg.history_capacity == 0 {
        return Err(ArgumentError::ZeroHistory.into());
    }
    let left = cfg
        .left_dir
        .clone()
        .ok_or(ArgumentError::MissingDirectory("left-dir", "left_dir"))?;
    let right = cfg
        .right_dir
        .clone()
        .ok_or(ArgumentError::MissingDirectory("right-dir", "right_dir"))?;

    // 1) Source: must exist, be a directory, and be readable.
    ensure_dir_exists_and_is_dir(&cfg.source_dir, "source directory")?;
    ensure_readable(&cfg.source_dir, "source directory")?;
    let source = canonical(&cfg.source_dir, "source directory")?;

    // 2) Destinations: create one level deep if missing.
    ensure_dir_is_or_create(&left, "left directory")?;
    ensure_dir_is_or_create(&right, "right directory")?;
    let left = canonical(&left, "left directory")?;
    let right = canonical(&right, "right directory")?;

    // 3) All three must be different places.
    for (first, second, a, b) in [
        ("source directory", "left directory", &source, &left),
        ("source directory", "right directory", &source, &right),
        ("left directory", "right directory", &left, &right),
    ] {
        if a == b {
            return Err(ArgumentError::SameDirectory {
                first,
                second,
                path: a.clone(),
            }
            .into());
        }
    }

    info!(
        source = %source.display(),
        left = %left.display(),
        right = %right.display(),
        "Directories ready"
    );
    cfg.source_dir = source;
    cfg.left_dir = Some(left.clone());
    cfg.right_dir = Some(right.clone());
    Ok(Targets::new(left, right))
}

/// Ensure path exists and is a directory.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &'static str) -> Result<(), DirectoryError> {
    match fs::metadata(path) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(DirectoryError::NotADirectory {
            name,
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DirectoryError::NotFound {
            name,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(DirectoryError::Unreadable {
            name,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &'static str) -> Result<(), DirectoryError> {
    fs::read_dir(path).map_err(|source| DirectoryError::Unreadable {
        name,
        path: path.to_path_buf(),
        source,
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}

/// Ensure directory exists, creating only the last path component if it is
/// missing. An existing non-directory is an error.
fn ensure_dir_is_or_create(path: &Path, name: &'static str) -> Result<(), DirectoryError> {
    match fs::metadata(path) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(DirectoryError::NotADirectory {
            name,
            path: path.to_path_buf(),
        }),
        Err(_) => {
            fs::create_dir(path).map_err(|source| DirectoryError::Create {
                name,
                path: path.to_path_buf(),
                source,
            })?;
            info!("Created {name}: {}", path.display());
            Ok(())
        }
    }
}

fn canonical(path: &Path, name: &'static str) -> Result<PathBuf, DirectoryError> {
    dunce::canonicalize(path).map_err(|source| DirectoryError::Unreadable {
        name,
        path: path.to_path_buf(),
        source,
    })
}
