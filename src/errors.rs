//! Typed error definitions for image_sort.
//! Startup failures (arguments, directories) are fatal; move and undo failures
//! are reported to the operator and the session carries on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Missing or contradictory command-line/config input.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("--{0} is required (pass it on the command line or set <{1}> in the config file)")]
    MissingDirectory(&'static str, &'static str),

    #[error("{first} and {second} resolve to the same directory: {path}")]
    SameDirectory {
        first: &'static str,
        second: &'static str,
        path: PathBuf,
    },

    #[error("history capacity must be at least 1")]
    ZeroHistory,

    #[error("invalid log level: '{0}' (expected quiet, normal, info or debug)")]
    InvalidLogLevel(String),
}

/// A directory could not be enumerated or created.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("{name} does not exist: {path}")]
    NotFound { name: &'static str, path: PathBuf },

    #[error("{name} exists but is not a directory: {path}")]
    NotADirectory { name: &'static str, path: PathBuf },

    #[error("cannot read {name} '{path}': {source}")]
    Unreadable {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create {name} '{path}': {source}")]
    Create {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single rename failed; the source file is left where it was.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("cannot move '{src}' to '{dest}': different filesystems")]
    CrossDevice { src: PathBuf, dest: PathBuf },

    #[error("permission denied moving '{src}' to '{dest}'")]
    PermissionDenied { src: PathBuf, dest: PathBuf },

    #[error("path has no file name: {0}")]
    MissingFileName(PathBuf),

    #[error("shutdown requested; not moving {0}")]
    Interrupted(PathBuf),

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl MoveError {
    /// Short machine-friendly tag used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::DestinationExists(_) => "destination_exists",
            MoveError::CrossDevice { .. } => "cross_device",
            MoveError::PermissionDenied { .. } => "permission_denied",
            MoveError::MissingFileName(_) => "missing_file_name",
            MoveError::Interrupted(_) => "interrupted",
            MoveError::Io { .. } => "io",
        }
    }
}

/// Reasons an undo request did not reverse anything.
#[derive(Debug, Error)]
pub enum UndoError {
    #[error("nothing to undo")]
    HistoryEmpty,

    /// The reverse rename failed. The history record is kept so the undo can be retried.
    #[error("undo failed: {0}")]
    RenameFailed(#[source] MoveError),
}

/// Reasons a classify or skip decision was rejected.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("all images have been processed")]
    Exhausted,

    #[error(transparent)]
    Move(#[from] MoveError),
}
