//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::CONFIG_ENV;

use crate::config::types::{Config, LogLevel};
use crate::errors::ArgumentError;
use crate::platform::write_config_secure_new_0600;
use crate::triage::DEFAULT_HISTORY_CAPACITY;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    left_dir: Option<String>,
    right_dir: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    history_capacity: Option<usize>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    max_images: Option<usize>,
}

/// Settings read from a config file. `None` means "not set in the file".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub left_dir: Option<PathBuf>,
    pub right_dir: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub history_capacity: Option<usize>,
    pub max_images: Option<usize>,
}

impl FileSettings {
    /// Copy every value present in the file onto `cfg`.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(l) = &self.left_dir {
            cfg.left_dir = Some(l.clone());
        }
        if let Some(r) = &self.right_dir {
            cfg.right_dir = Some(r.clone());
        }
        if let Some(level) = &self.log_level {
            cfg.log_level = *level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if let Some(n) = self.history_capacity {
            cfg.history_capacity = n;
        }
        if let Some(n) = self.max_images {
            cfg.max_images = Some(n);
        }
    }
}

// Custom deserializer that trims surrounding whitespace for optional integers
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<usize>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("expected a whole number, got '{s}': {e}"))),
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(PathBuf::from)
}

/// Parse config XML text.
pub fn parse_config_xml(contents: &str) -> Result<FileSettings> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;

    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            LogLevel::parse(s).ok_or_else(|| ArgumentError::InvalidLogLevel(s.to_string()))?,
        ),
    };

    Ok(FileSettings {
        left_dir: non_empty_path(parsed.left_dir.as_deref()),
        right_dir: non_empty_path(parsed.right_dir.as_deref()),
        log_level,
        log_file: non_empty_path(parsed.log_file.as_deref()),
        history_capacity: parsed.history_capacity,
        max_images: parsed.max_images,
    })
}

/// Load settings from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<FileSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("in config file '{}'", path.display()))
}

/// Load the active config file, if any.
///
/// A missing file at the default location is not an error; a missing file
/// named by `$IMAGE_SORT_CONFIG` is.
pub fn load_config_from_xml() -> Result<Option<FileSettings>> {
    let cfg_path = default_config_path()?;
    if !cfg_path.exists() {
        if env::var_os(CONFIG_ENV).is_some() {
            bail!(
                "{} points to '{}', which does not exist",
                CONFIG_ENV,
                cfg_path.display()
            );
        }
        debug!(path = %cfg_path.display(), "No config file; using defaults");
        return Ok(None);
    }
    let settings = load_config_from_xml_path(&cfg_path)?;
    debug!(path = %cfg_path.display(), ?settings, "Loaded config file");
    Ok(Some(settings))
}

/// Write a commented template config file. Refuses to overwrite an existing
/// file or to write beneath a symlinked directory.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/image_sort.log".into());

    let content = format!(
        "<!--\n  image_sort configuration (XML)\n\n  Fields (all optional; command-line flags win):\n    left_dir          -> destination for LEFT decisions\n    right_dir         -> destination for RIGHT decisions\n    log_level         -> quiet | normal | info | debug\n    log_file          -> path to a log file (leave empty to log to the terminal only)\n    history_capacity  -> how many moves can be undone (default {history})\n    max_images        -> queue at most this many images (leave empty for no limit)\n\n  Suggested log file: {suggested_log}\n-->\n<config>\n  <left_dir></left_dir>\n  <right_dir></right_dir>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <history_capacity>{history}</history_capacity>\n  <max_images></max_images>\n</config>\n",
        history = DEFAULT_HISTORY_CAPACITY,
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}
