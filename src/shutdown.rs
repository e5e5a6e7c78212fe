//! Process-wide shutdown coordination.
//! The Ctrl-C handler sets a flag; the session loop and the mover check it so
//! no new rename starts once the operator asked to stop. While the session is
//! idle at the prompt the handler may exit right away; while a step is busy it
//! lets the step finish first.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.
use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Clear the shutdown flag (tests only).
#[doc(hidden)]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}

static BUSY: AtomicBool = AtomicBool::new(false);

/// Marks a filesystem step in progress until dropped.
#[must_use = "the step is only marked busy while the guard is alive"]
pub struct BusyGuard(());

impl Drop for BusyGuard {
    fn drop(&mut self) {
        BUSY.store(false, Ordering::Relaxed);
    }
}

/// Mark the start of a step that must not be cut short by an interrupt.
#[inline]
pub fn busy() -> BusyGuard {
    BUSY.store(true, Ordering::Relaxed);
    BusyGuard(())
}

/// True while a [`BusyGuard`] is alive.
#[inline]
pub fn is_busy() -> bool {
    BUSY.load(Ordering::Relaxed)
}
