//! Position tracking over the scanned image list.

use std::path::{Path, PathBuf};

/// Ordered, fixed set of images plus the index of the one under review.
///
/// `position() == len()` means every image has been dealt with.
#[derive(Debug, Clone, Default)]
pub struct ImageCursor {
    items: Vec<PathBuf>,
    current: usize,
}

impl ImageCursor {
    pub fn new(items: Vec<PathBuf>) -> Self {
        Self { items, current: 0 }
    }

    /// Image under review, or `None` once the end is reached.
    pub fn current_item(&self) -> Option<&Path> {
        self.items.get(self.current).map(PathBuf::as_path)
    }

    /// Step to the next image. Saturates at the end.
    pub fn advance(&mut self) {
        if self.current < self.items.len() {
            self.current += 1;
        }
    }

    /// Jump back to `index`. Refused (returns false, position unchanged) unless
    /// `index < len()`.
    pub fn rewind(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.current >= self.items.len()
    }
}
