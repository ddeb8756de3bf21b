//! # Shared Seat States
//!
//! The N-element seat state array and the single guard that serializes
//! every access to it.
//!
//! ## Thread Safety
//!
//! - All reads and writes of the array go through [`SeatMap::with_seats`],
//!   which holds the guard for the duration of the closure.
//! - Nothing in this module blocks beyond the guard acquisition itself;
//!   critical sections are a handful of array reads and writes.

use parking_lot::Mutex;

/// The lifecycle state of one seat at the table.
///
/// Every seat cycles `Thinking -> Hungry -> Eating -> Thinking` forever.
/// There is no other legal transition.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatState {
    /// Not requesting the forks.
    Thinking = 0,
    /// Requested the forks, not yet admitted.
    Hungry = 1,
    /// Holding both adjacent forks.
    Eating = 2,
}

impl SeatState {
    /// Returns true if this seat currently holds its forks.
    #[inline]
    #[must_use]
    pub const fn is_eating(self) -> bool {
        matches!(self, Self::Eating)
    }
}

/// The shared seat array behind a single mutex.
///
/// This is the only shared mutable state in the protocol. One guard for
/// the whole table gives every admission decision a globally-consistent
/// view; per-seat locks would reintroduce the circular-wait hazard the
/// design exists to remove.
pub struct SeatMap {
    /// Seat count, fixed at construction. Kept outside the mutex so
    /// neighbor math never touches the guard.
    count: usize,
    /// The guarded state array.
    seats: Mutex<Box<[SeatState]>>,
}

impl SeatMap {
    /// Creates a seat map with `count` seats, all `Thinking`.
    ///
    /// # Panics
    ///
    /// Panics if `count < 2` - a ring needs at least two seats.
    #[must_use]
    pub fn new(count: usize) -> Self {
        assert!(count >= 2, "a table needs at least 2 seats, got {count}");

        Self {
            count,
            seats: Mutex::new(vec![SeatState::Thinking; count].into_boxed_slice()),
        }
    }

    /// Returns the number of seats.
    #[inline]
    #[must_use]
    pub const fn seat_count(&self) -> usize {
        self.count
    }

    /// Runs `body` with exclusive access to the full seat array.
    ///
    /// The guard is held for the duration of `body` and released on every
    /// exit path, including a panic inside `body`. Callers must not block
    /// inside `body`.
    pub fn with_seats<R>(&self, body: impl FnOnce(&mut [SeatState]) -> R) -> R {
        let mut seats = self.seats.lock();
        body(&mut seats)
    }

    /// Returns a copy of the seat array taken under the guard.
    ///
    /// For observers and tests. The copy is a consistent point-in-time
    /// view; it is stale the moment the guard is released.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SeatState> {
        self.seats.lock().to_vec()
    }
}
