//! CLI definition and parsing.
//! Defines Args and provides try_parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - --left-dir/--right-dir may be omitted when the config file sets them.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};

/// Sort a folder of images into two folders, one keypress per image.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Triage images into a left or right folder with undo"
)]
pub struct Args {
    /// Directory containing the images to sort (not searched recursively).
    #[arg(
        value_name = "SOURCE_DIR",
        value_hint = ValueHint::DirPath,
        required_unless_present_any = ["print_config", "init_config"]
    )]
    pub source_dir: Option<PathBuf>,

    /// Destination for LEFT decisions; created if missing.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub left_dir: Option<PathBuf>,

    /// Destination for RIGHT decisions; created if missing.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub right_dir: Option<PathBuf>,

    /// Number of moves that can be undone (default 50).
    #[arg(long = "history", value_name = "N")]
    pub history_capacity: Option<usize>,

    /// Queue at most N images from the source directory.
    #[arg(long, value_name = "N")]
    pub max_images: Option<usize>,

    /// Dry-run: report moves but do not touch the filesystem.
    #[arg(long, help = "Show what would be moved, but do not move anything")]
    pub dry_run: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_parser = parse_log_level, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where image_sort will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by image_sort and exit")]
    pub print_config: bool,

    /// Write a template config file at the config location, then exit.
    #[arg(long, help = "Write a template config file and exit")]
    pub init_config: bool,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source_dir {
            cfg.source_dir = sanitize_path(src);
        }
        if let Some(l) = &self.left_dir {
            cfg.left_dir = Some(sanitize_path(l));
        }
        if let Some(r) = &self.right_dir {
            cfg.right_dir = Some(sanitize_path(r));
        }
        if let Some(n) = self.history_capacity {
            cfg.history_capacity = n;
        }
        if let Some(n) = self.max_images {
            cfg.max_images = Some(n);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

/// Trim surrounding quotes left behind by shells (PowerShell/CMD quoting
/// mistakes) and one trailing separator.
fn sanitize_path(p: &Path) -> PathBuf {
    let Some(s) = p.to_str() else {
        return p.to_path_buf();
    };
    let trimmed = s.trim();
    let mut inner = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    };
    if inner.is_empty() {
        return p.to_path_buf();
    }
    if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
        inner.pop();
    }
    PathBuf::from(inner)
}

pub fn try_parse() -> Result<Args, clap::Error> {
    Args::try_parse()
}
