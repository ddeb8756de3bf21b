//! # Wake Latch
//!
//! A binary latch releasing one blocked diner once its forks are granted.
//!
//! ## Contract
//!
//! Each seat owns exactly one latch. The admission step opens it while the
//! table guard is held; the owning diner consumes it strictly outside the
//! guard. Because admission only ever moves a seat `Hungry -> Eating`, at
//! most one open is pending per seat at any time - a second open before
//! the first is consumed means the admission invariant already broke, and
//! the latch aborts instead of papering over it.

use parking_lot::{Condvar, Mutex};

/// One-waiter binary latch: `open` grants, `consume` blocks until granted
/// and resets.
///
/// Built from a mutex/condvar pair rather than a semaphore so that the
/// open/closed state stays inspectable and a double-open is detectable.
pub struct WakeLatch {
    /// Whether a grant is pending.
    opened: Mutex<bool>,
    /// Signaled on open.
    available: Condvar,
}

impl WakeLatch {
    /// Creates a closed latch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            opened: Mutex::new(false),
            available: Condvar::new(),
        }
    }

    /// Opens the latch and wakes the waiter, if any.
    ///
    /// Called only from the guarded admission step. The latch's own lock
    /// is held for a few instructions; this never blocks meaningfully.
    ///
    /// # Panics
    ///
    /// Panics if the latch is already open. One open per consume is a
    /// protocol invariant; a second one means a seat was admitted twice.
    pub fn open(&self) {
        let mut opened = self.opened.lock();
        assert!(
            !*opened,
            "wake latch opened twice without an intervening consume"
        );
        *opened = true;
        self.available.notify_one();
    }

    /// Blocks until the latch is open, then resets it to closed.
    ///
    /// Returns immediately if the latch was already open. The wait loop
    /// absorbs spurious condvar wakeups. Must never be called while the
    /// table guard is held.
    pub fn consume(&self) {
        let mut opened = self.opened.lock();
        while !*opened {
            self.available.wait(&mut opened);
        }
        *opened = false;
    }

    /// Returns whether a grant is currently pending. Non-blocking peek,
    /// for tests and observers.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.opened.lock()
    }
}

impl Default for WakeLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_new_latch_is_closed() {
        let latch = WakeLatch::new();
        assert!(!latch.is_open());
    }

    #[test]
    fn test_consume_after_open_returns_immediately() {
        let latch = WakeLatch::new();

        latch.open();
        assert!(latch.is_open());

        latch.consume();
        assert!(!latch.is_open());
    }

    #[test]
    fn test_consume_blocks_until_cross_thread_open() {
        let latch = Arc::new(WakeLatch::new());
        let opener = Arc::clone(&latch);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            opener.open();
        });

        let start = Instant::now();
        latch.consume();

        // The consumer must have actually waited for the opener.
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert!(!latch.is_open());
        handle.join().unwrap();
    }

    #[test]
    fn test_open_consume_cycle_repeats() {
        let latch = WakeLatch::new();

        for _ in 0..3 {
            latch.open();
            latch.consume();
        }
        assert!(!latch.is_open());
    }

    #[test]
    #[should_panic(expected = "opened twice")]
    fn test_double_open_panics() {
        let latch = WakeLatch::new();
        latch.open();
        latch.open();
    }
}
