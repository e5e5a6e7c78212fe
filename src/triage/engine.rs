//! Triage state machine.
//!
//! Ties the cursor, the undo history and a [`FileMover`] together. A forward
//! decision only touches history and cursor after the rename succeeded; an undo
//! only drops its history record after the reverse rename succeeded.

use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::errors::{DecisionError, UndoError};
use crate::fs_ops::{FileMover, RenameMover};

use super::cursor::ImageCursor;
use super::history::{MoveRecord, UndoHistory};
use super::{Direction, Targets};

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageState {
    /// A new current image exists and the presentation layer has not shown it yet.
    Loading,
    /// The current image is on screen and waiting for a decision.
    Ready,
    /// Every image has been handled but moves can still be undone.
    Drained,
    /// Every image has been handled and nothing is left to undo.
    Exhausted,
}

/// Read-only counters for progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub history_len: usize,
    pub history_capacity: usize,
    /// Moves that can no longer be undone because the history overflowed.
    pub evicted: usize,
}

impl Progress {
    pub fn remaining(&self) -> usize {
        self.total - self.processed
    }
}

#[derive(Debug)]
pub struct TriageEngine<M = RenameMover> {
    cursor: ImageCursor,
    history: UndoHistory,
    targets: Targets,
    mover: M,
    loaded: bool,
}

impl<M: FileMover> TriageEngine<M> {
    pub fn new(images: Vec<PathBuf>, targets: Targets, history_capacity: usize, mover: M) -> Self {
        Self {
            cursor: ImageCursor::new(images),
            history: UndoHistory::with_capacity(history_capacity),
            targets,
            mover,
            loaded: false,
        }
    }

    pub fn current_item(&self) -> Option<&Path> {
        self.cursor.current_item()
    }

    pub fn state(&self) -> TriageState {
        match (self.cursor.is_exhausted(), self.history.is_empty()) {
            (false, _) if self.loaded => TriageState::Ready,
            (false, _) => TriageState::Loading,
            (true, false) => TriageState::Drained,
            (true, true) => TriageState::Exhausted,
        }
    }

    /// Acknowledge that the current image has been presented (`Loading` -> `Ready`).
    pub fn mark_loaded(&mut self) {
        if !self.cursor.is_exhausted() {
            self.loaded = true;
        }
    }

    /// True once every image is handled and there is nothing left to undo.
    pub fn is_finished(&self) -> bool {
        self.cursor.is_exhausted() && self.history.is_empty()
    }

    /// Move the current image to the directory for `direction`.
    ///
    /// On failure nothing changes: the image stays current and history is untouched.
    pub fn classify(&mut self, direction: Direction) -> Result<MoveRecord, DecisionError> {
        let index = self.cursor.position();
        let src = self
            .cursor
            .current_item()
            .ok_or(DecisionError::Exhausted)?
            .to_path_buf();

        let dest = self.mover.move_to(&src, self.targets.dir_for(direction))?;

        let record = MoveRecord {
            original_path: src,
            destination_path: dest,
            list_index: index,
            direction,
        };
        if let Some(dropped) = self.history.push(record.clone()) {
            warn!(
                path = %dropped.original_path.display(),
                capacity = self.history.capacity(),
                "Undo history full; oldest move can no longer be undone"
            );
        }
        self.cursor.advance();
        self.loaded = false;
        debug!(index, %direction, history = self.history.len(), "Committed move");
        Ok(record)
    }

    /// Leave the current image where it is and move on.
    pub fn skip(&mut self) -> Result<(), DecisionError> {
        let Some(item) = self.cursor.current_item() else {
            return Err(DecisionError::Exhausted);
        };
        info!(path = %item.display(), "Skipped");
        self.cursor.advance();
        self.loaded = false;
        Ok(())
    }

    /// Reverse the most recent committed move and return to that image.
    ///
    /// The record is only removed after the file is back in place; a failed
    /// reverse rename keeps it so the undo can be retried.
    pub fn undo(&mut self) -> Result<MoveRecord, UndoError> {
        let record = self.history.peek().ok_or(UndoError::HistoryEmpty)?;
        self.mover
            .move_back(&record.destination_path, &record.original_path)
            .map_err(UndoError::RenameFailed)?;

        let Some(record) = self.history.pop() else {
            return Err(UndoError::HistoryEmpty);
        };
        if !self.cursor.rewind(record.list_index) {
            error!(
                index = record.list_index,
                len = self.cursor.len(),
                "Undo record points past the image list; cursor left in place"
            );
        }
        self.loaded = false;
        Ok(record)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            processed: self.cursor.position(),
            total: self.cursor.len(),
            history_len: self.history.len(),
            history_capacity: self.history.capacity(),
            evicted: self.history.evicted(),
        }
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MoveError;
    use std::cell::Cell;

    /// Mover that records nothing on disk and can be told to fail.
    #[derive(Default)]
    struct FakeMover {
        fail_forward: Cell<bool>,
        fail_back: Cell<bool>,
        backs: Cell<usize>,
    }

    impl FileMover for FakeMover {
        fn move_to(&self, src: &Path, dest_dir: &Path) -> Result<PathBuf, MoveError> {
            let dest = dest_dir.join(src.file_name().unwrap());
            if self.fail_forward.get() {
                return Err(MoveError::DestinationExists(dest));
            }
            Ok(dest)
        }

        fn move_back(&self, dest_path: &Path, _src_path: &Path) -> Result<(), MoveError> {
            if self.fail_back.get() {
                return Err(MoveError::PermissionDenied {
                    src: dest_path.to_path_buf(),
                    dest: dest_path.to_path_buf(),
                });
            }
            self.backs.set(self.backs.get() + 1);
            Ok(())
        }
    }

    fn engine(n: usize, capacity: usize) -> TriageEngine<FakeMover> {
        let images = (0..n).map(|i| PathBuf::from(format!("/src/{i}.png"))).collect();
        TriageEngine::new(
            images,
            Targets::new("/left", "/right"),
            capacity,
            FakeMover::default(),
        )
    }

    #[test]
    fn state_transitions() {
        let mut e = engine(1, 5);
        assert_eq!(e.state(), TriageState::Loading);
        e.mark_loaded();
        assert_eq!(e.state(), TriageState::Ready);
        e.classify(Direction::Right).unwrap();
        assert_eq!(e.state(), TriageState::Drained);
        assert!(!e.is_finished());
        e.undo().unwrap();
        assert_eq!(e.state(), TriageState::Loading);
        e.skip().unwrap();
        assert_eq!(e.state(), TriageState::Exhausted);
        assert!(e.is_finished());
    }

    #[test]
    fn classify_records_destination_and_index() {
        let mut e = engine(2, 5);
        e.skip().unwrap();
        let rec = e.classify(Direction::Left).unwrap();
        assert_eq!(rec.list_index, 1);
        assert_eq!(rec.original_path, PathBuf::from("/src/1.png"));
        assert_eq!(rec.destination_path, PathBuf::from("/left/1.png"));
        assert_eq!(e.progress().processed, 2);
    }

    #[test]
    fn failed_classify_changes_nothing() {
        let mut e = engine(2, 5);
        e.mover.fail_forward.set(true);
        assert!(matches!(
            e.classify(Direction::Left),
            Err(DecisionError::Move(MoveError::DestinationExists(_)))
        ));
        assert_eq!(e.progress().processed, 0);
        assert!(e.history().is_empty());
    }

    #[test]
    fn decisions_past_the_end_are_rejected() {
        let mut e = engine(0, 5);
        assert!(matches!(e.classify(Direction::Left), Err(DecisionError::Exhausted)));
        assert!(matches!(e.skip(), Err(DecisionError::Exhausted)));
        assert!(matches!(e.undo(), Err(UndoError::HistoryEmpty)));
        assert!(e.is_finished());
    }

    #[test]
    fn failed_undo_keeps_record() {
        let mut e = engine(2, 5);
        e.classify(Direction::Left).unwrap();
        e.mover.fail_back.set(true);
        assert!(matches!(e.undo(), Err(UndoError::RenameFailed(_))));
        assert_eq!(e.history().len(), 1);
        assert_eq!(e.progress().processed, 1);

        e.mover.fail_back.set(false);
        let rec = e.undo().unwrap();
        assert_eq!(rec.list_index, 0);
        assert_eq!(e.progress().processed, 0);
        assert!(e.history().is_empty());
    }

    #[test]
    fn undo_after_skips_returns_to_moved_item() {
        let mut e = engine(3, 5);
        e.classify(Direction::Left).unwrap();
        e.skip().unwrap();
        e.skip().unwrap();
        assert_eq!(e.state(), TriageState::Drained);
        e.undo().unwrap();
        assert_eq!(e.current_item(), Some(Path::new("/src/0.png")));
    }

    #[test]
    fn overflow_makes_first_move_unreachable() {
        let mut e = engine(4, 3);
        for _ in 0..4 {
            e.classify(Direction::Right).unwrap();
        }
        let p = e.progress();
        assert_eq!((p.history_len, p.evicted), (3, 1));
        for expected in [3, 2, 1] {
            assert_eq!(e.undo().unwrap().list_index, expected);
        }
        assert!(matches!(e.undo(), Err(UndoError::HistoryEmpty)));
        assert_eq!(e.mover.backs.get(), 3);
        assert_eq!(e.current_item(), Some(Path::new("/src/1.png")));
    }
}
