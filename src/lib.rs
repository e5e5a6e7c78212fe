//! Core library for `image_sort`.
//!
//! Sorts the images of one directory into a "left" and a "right" directory,
//! one decision per image, with a bounded undo history.
//!
//! Layout:
//! - `config`: Config type, default paths, XML loading and startup validation.
//! - `fs_ops`: scanning the source directory and no-clobber moves.
//! - `triage`: the image cursor, the undo history and the engine tying them together.
//! - `session`: the line-oriented interactive front end.
//! - `platform`: OS-specific file primitives (no-replace rename, secure writes).

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod session;
pub mod shutdown;
pub mod triage;

pub use config::types::{Config, LogLevel};
pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::{ArgumentError, DecisionError, DirectoryError, MoveError, UndoError};
pub use fs_ops::{DryRunMover, FileMover, RenameMover, scan_images};
pub use triage::{
    Direction, ImageCursor, MoveRecord, Progress, Targets, TriageEngine, TriageState, UndoHistory,
};
