//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{Context, Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{CONFIG_ENV, CONFIG_FILE_NAME, LOG_FILE_NAME};

/// Resolve `$IMAGE_SORT_CONFIG` if set: relative values are taken from the
/// current directory, and a directory value means `<dir>/config.xml`.
fn env_config_path() -> Result<Option<PathBuf>> {
    let Some(raw) = env::var_os(CONFIG_ENV) else {
        return Ok(None);
    };
    let mut p = PathBuf::from(raw);
    if p.is_relative() {
        let cwd = env::current_dir().context("resolve current directory")?;
        p = cwd.join(p);
    }
    if p.is_dir() {
        p.push(CONFIG_FILE_NAME);
    }
    Ok(Some(p))
}

/// Config file location: `$IMAGE_SORT_CONFIG`, else the OS config directory.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env_config_path()? {
        return Ok(p);
    }
    let mut base = config_dir()
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or_else(|| anyhow!("cannot determine a config directory for this user"))?;
    base.push("image_sort");
    base.push(CONFIG_FILE_NAME);
    Ok(base)
}

/// Suggested log file location. Sits next to an env-selected config file,
/// otherwise under the OS data directory.
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(cfg) = env_config_path()? {
        let dir = cfg.parent().unwrap_or_else(|| Path::new("."));
        return Ok(dir.join(LOG_FILE_NAME));
    }
    let mut base = data_dir()
        .or_else(|| {
            env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
        })
        .ok_or_else(|| anyhow!("cannot determine a data directory for this user"))?;
    base.push("image_sort");
    base.push(LOG_FILE_NAME);
    Ok(base)
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
