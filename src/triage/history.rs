//! Bounded undo history.

use std::collections::VecDeque;
use std::path::PathBuf;

use super::Direction;

/// Default number of moves that can be undone.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One committed move that can still be reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Where the file lived in the source directory.
    pub original_path: PathBuf,
    /// Where the file lives now.
    pub destination_path: PathBuf,
    /// Cursor position the file occupied when it was moved.
    pub list_index: usize,
    pub direction: Direction,
}

/// Fixed-capacity LIFO of [`MoveRecord`]s. When full, pushing drops the oldest
/// record for good.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    records: VecDeque<MoveRecord>,
    capacity: usize,
    evicted: usize,
}

impl UndoHistory {
    /// Capacity is clamped to at least one record.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    /// Record a move. Returns the oldest record if it had to be evicted.
    pub fn push(&mut self, record: MoveRecord) -> Option<MoveRecord> {
        let dropped = if self.records.len() == self.capacity {
            self.evicted += 1;
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        dropped
    }

    /// Remove and return the most recent record.
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop_back()
    }

    /// Most recent record, left in place.
    pub fn peek(&self) -> Option<&MoveRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total records that have fallen out of the history so far.
    pub fn evicted(&self) -> usize {
        self.evicted
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}
