//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::triage::DEFAULT_HISTORY_CAPACITY;

/// How chatty the log output is. Maps onto tracing levels in the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Info,
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Quiet,
        LogLevel::Normal,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Case-insensitive; also accepts a few common synonyms
    /// (`error`, `verbose`, `trace`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(level) = Self::ALL.into_iter().find(|l| l.as_str() == s) {
            return Some(level);
        }
        match s.as_str() {
            "error" | "none" => Some(LogLevel::Quiet),
            "verbose" => Some(LogLevel::Info),
            "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| format!("invalid log level '{s}' (expected quiet, normal, info or debug)"))
    }
}

/// Runtime configuration for a triage session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the images to sort
    pub source_dir: PathBuf,
    /// Destination for "left" decisions
    pub left_dir: Option<PathBuf>,
    /// Destination for "right" decisions
    pub right_dir: Option<PathBuf>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// How many moves can be undone
    pub history_capacity: usize,
    /// Optional cap on how many images are queued
    pub max_images: Option<usize>,
    /// If true, report moves but do not touch the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            left_dir: None,
            right_dir: None,
            log_level: LogLevel::Normal,
            log_file: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_images: None,
            dry_run: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        left_dir: impl Into<PathBuf>,
        right_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            left_dir: Some(left_dir.into()),
            right_dir: Some(right_dir.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_names_and_synonyms() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>(), Ok(level));
        }
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
