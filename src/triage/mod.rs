//! Triage core: the image cursor, the undo history and the engine that drives
//! moves between them.

mod cursor;
mod engine;
mod history;

use std::fmt;
use std::path::{Path, PathBuf};

pub use cursor::ImageCursor;
pub use engine::{Progress, TriageEngine, TriageState};
pub use history::{DEFAULT_HISTORY_CAPACITY, MoveRecord, UndoHistory};

/// Which destination an image is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

/// The two destination directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    pub left: PathBuf,
    pub right: PathBuf,
}

impl Targets {
    pub fn new(left: impl Into<PathBuf>, right: impl Into<PathBuf>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn dir_for(&self, direction: Direction) -> &Path {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}
