//! # Admission & Signaling Protocol
//!
//! The table: N seats, N forks, one guard, one wake latch per seat.
//!
//! ## Why This Cannot Deadlock
//!
//! A diner never holds one fork while waiting for the other. Inside a
//! single guarded step it either gets BOTH forks (seat flips to `Eating`,
//! latch opens) or it gets NEITHER and goes to sleep on its latch. With no
//! partial acquisition there is no hold-and-wait, and with one global
//! guard there is no lock cycle. No fork ordering trick is needed - or
//! sufficient: the admission check must see the whole table at once.
//!
//! ## Call Sites of Admission
//!
//! `may_eat(i)` is evaluated in exactly three places, all under the guard:
//!
//! 1. `request(i)` - the diner checks itself after going `Hungry`
//! 2. `release(i)` - the leaving diner re-checks its left neighbor
//! 3. `release(i)` - then its right neighbor
//!
//! Left before right, always. The order has no effect on safety (both run
//! inside one guard acquisition) but keeps event traces reproducible.

use crate::latch::WakeLatch;
use crate::state::{SeatMap, SeatState};

/// The shared table: seat states plus one wake latch per seat.
///
/// `request` and `release` are the entire public protocol. Both may be
/// called freely from any thread; every state decision happens under the
/// table's single guard.
pub struct Table {
    /// The guarded seat array.
    seats: SeatMap,
    /// Per-seat wake latches, indexed like the seats.
    wake: Box<[WakeLatch]>,
}

impl Table {
    /// Creates a table with `count` seats, everyone `Thinking`, all
    /// latches closed.
    ///
    /// # Panics
    ///
    /// Panics if `count < 2`. A two-seat table is degenerate but valid:
    /// each diner's left and right neighbor coincide, so the two simply
    /// alternate.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let wake: Box<[WakeLatch]> = (0..count).map(|_| WakeLatch::new()).collect();

        Self {
            seats: SeatMap::new(count),
            wake,
        }
    }

    /// Returns the number of seats.
    #[inline]
    #[must_use]
    pub const fn seat_count(&self) -> usize {
        self.seats.seat_count()
    }

    /// Returns the seat to the left of `seat` (wrapping).
    #[inline]
    #[must_use]
    pub const fn left(&self, seat: usize) -> usize {
        (seat + self.seat_count() - 1) % self.seat_count()
    }

    /// Returns the seat to the right of `seat` (wrapping).
    #[inline]
    #[must_use]
    pub const fn right(&self, seat: usize) -> usize {
        (seat + 1) % self.seat_count()
    }

    /// Read access to the seat map, for observers and tests.
    #[inline]
    #[must_use]
    pub const fn seats(&self) -> &SeatMap {
        &self.seats
    }

    /// The admission predicate: `seat` is hungry and neither neighbor is
    /// eating. Only meaningful under the guard.
    fn may_eat(&self, seats: &[SeatState], seat: usize) -> bool {
        seats[seat] == SeatState::Hungry
            && !seats[self.left(seat)].is_eating()
            && !seats[self.right(seat)].is_eating()
    }

    /// Admits `seat` if its predicate holds: flips it to `Eating` and
    /// opens its latch in the same guarded step, so the wakeup can never
    /// be missed. The ONLY place `Hungry -> Eating` happens.
    fn admit_if_ready(&self, seats: &mut [SeatState], seat: usize) {
        if self.may_eat(seats, seat) {
            seats[seat] = SeatState::Eating;
            self.wake[seat].open();
        }
    }

    /// Requests both forks for `seat`; blocks until they are held.
    ///
    /// Under the guard the seat goes `Hungry` and immediately tests its
    /// own admission - the optimistic path where neither neighbor is
    /// eating returns without ever sleeping. Otherwise the call parks on
    /// the seat's latch until some neighbor's `release` admits it.
    ///
    /// # Panics
    ///
    /// Panics if `seat` is out of range or not currently `Thinking`.
    pub fn request(&self, seat: usize) {
        assert!(
            seat < self.seat_count(),
            "seat {seat} out of range for a {}-seat table",
            self.seat_count()
        );

        self.seats.with_seats(|seats| {
            assert_eq!(
                seats[seat],
                SeatState::Thinking,
                "seat {seat} requested forks while not thinking"
            );
            seats[seat] = SeatState::Hungry;
            self.admit_if_ready(seats, seat);
        });

        // Outside the guard: returns at once if we admitted ourselves
        // above, otherwise sleeps until a release opens the latch.
        self.wake[seat].consume();
    }

    /// Returns both forks for `seat`; never blocks.
    ///
    /// Under the guard the seat goes back to `Thinking`, then each
    /// neighbor's admission is evaluated independently (left first). Both
    /// neighbors can be admitted in the same guarded step.
    ///
    /// # Panics
    ///
    /// Panics if `seat` is out of range or not currently `Eating`.
    pub fn release(&self, seat: usize) {
        assert!(
            seat < self.seat_count(),
            "seat {seat} out of range for a {}-seat table",
            self.seat_count()
        );

        self.seats.with_seats(|seats| {
            assert_eq!(
                seats[seat],
                SeatState::Eating,
                "seat {seat} returned forks it did not hold"
            );
            seats[seat] = SeatState::Thinking;
            self.admit_if_ready(seats, self.left(seat));
            self.admit_if_ready(seats, self.right(seat));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    /// Polls until `seat` reaches `want`, panicking after ~2s.
    fn wait_for_state(table: &Table, seat: usize, want: SeatState) {
        for _ in 0..2000 {
            if table.seats().snapshot()[seat] == want {
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("seat {seat} never reached {want:?}");
    }

    #[test]
    fn test_new_table_starts_thinking() {
        let table = Table::new(5);
        assert_eq!(table.seat_count(), 5);
        assert!(table
            .seats()
            .snapshot()
            .iter()
            .all(|s| *s == SeatState::Thinking));
    }

    #[test]
    fn test_neighbor_ring_wraps() {
        let table = Table::new(5);
        assert_eq!(table.left(0), 4);
        assert_eq!(table.right(0), 1);
        assert_eq!(table.left(3), 2);
        assert_eq!(table.right(4), 0);
    }

    #[test]
    fn test_two_seat_ring_neighbors_coincide() {
        // Degenerate ring: each diner's admission depends on exactly one
        // other seat.
        let table = Table::new(2);
        assert_eq!(table.left(0), table.right(0));
        assert_eq!(table.left(0), 1);
        assert_eq!(table.left(1), table.right(1));
        assert_eq!(table.left(1), 0);
    }

    #[test]
    fn test_immediate_admission_with_idle_neighbors() {
        let table = Table::new(5);

        // Nobody is eating, so this must not block.
        table.request(0);

        assert_eq!(table.seats().snapshot()[0], SeatState::Eating);
    }

    #[test]
    fn test_nonadjacent_diners_eat_concurrently() {
        let table = Table::new(5);

        // 0 and 2 share no fork; neither call may block on the other.
        table.request(0);
        table.request(2);

        let seats = table.seats().snapshot();
        assert_eq!(seats[0], SeatState::Eating);
        assert_eq!(seats[2], SeatState::Eating);
    }

    #[test]
    fn test_diner_between_two_eaters_waits_for_both() {
        let table = Arc::new(Table::new(5));
        table.request(0);
        table.request(2);

        let waiter = {
            let table = Arc::clone(&table);
            thread::spawn(move || table.request(1))
        };
        wait_for_state(&table, 1, SeatState::Hungry);

        // One neighbor releasing is not enough: the other still eats.
        table.release(0);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(table.seats().snapshot()[1], SeatState::Hungry);

        table.release(2);
        waiter.join().unwrap();
        assert_eq!(table.seats().snapshot()[1], SeatState::Eating);
    }

    #[test]
    fn test_release_cascade_admits_both_neighbors() {
        let table = Arc::new(Table::new(5));
        table.request(0);

        // Both neighbors of 0 line up while 0 eats.
        let waiters: Vec<_> = [1, 4]
            .into_iter()
            .map(|seat| {
                let table = Arc::clone(&table);
                thread::spawn(move || table.request(seat))
            })
            .collect();
        wait_for_state(&table, 1, SeatState::Hungry);
        wait_for_state(&table, 4, SeatState::Hungry);

        // Their other neighbors (2 and 3) are thinking, so a single
        // release admits both in one guarded step.
        table.release(0);

        for waiter in waiters {
            waiter.join().unwrap();
        }
        let seats = table.seats().snapshot();
        assert_eq!(seats[1], SeatState::Eating);
        assert_eq!(seats[4], SeatState::Eating);
    }

    #[test]
    fn test_release_admits_only_qualified_neighbor() {
        let table = Arc::new(Table::new(5));
        table.request(0);
        table.request(2);

        let blocked_1 = {
            let table = Arc::clone(&table);
            thread::spawn(move || table.request(1))
        };
        let blocked_4 = {
            let table = Arc::clone(&table);
            thread::spawn(move || table.request(4))
        };
        wait_for_state(&table, 1, SeatState::Hungry);
        wait_for_state(&table, 4, SeatState::Hungry);

        // 4's other neighbor (3) thinks -> admitted. 1's other neighbor
        // (2) still eats -> stays hungry.
        table.release(0);
        blocked_4.join().unwrap();

        let seats = table.seats().snapshot();
        assert_eq!(seats[4], SeatState::Eating);
        assert_eq!(seats[1], SeatState::Hungry);

        table.release(2);
        blocked_1.join().unwrap();
        assert_eq!(table.seats().snapshot()[1], SeatState::Eating);
    }

    #[test]
    fn test_two_seat_table_alternates() {
        let table = Arc::new(Table::new(2));
        table.request(0);

        let waiter = {
            let table = Arc::clone(&table);
            thread::spawn(move || table.request(1))
        };
        wait_for_state(&table, 1, SeatState::Hungry);

        table.release(0);
        waiter.join().unwrap();
        assert_eq!(table.seats().snapshot()[1], SeatState::Eating);

        table.release(1);
        assert!(table
            .seats()
            .snapshot()
            .iter()
            .all(|s| *s == SeatState::Thinking));
    }

    #[test]
    fn test_full_cycle_transitions() {
        let table = Table::new(3);

        for _ in 0..4 {
            table.request(0);
            assert_eq!(table.seats().snapshot()[0], SeatState::Eating);
            table.release(0);
            assert_eq!(table.seats().snapshot()[0], SeatState::Thinking);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_request_out_of_range_panics() {
        let table = Table::new(3);
        table.request(3);
    }

    #[test]
    #[should_panic(expected = "did not hold")]
    fn test_release_without_eating_panics() {
        let table = Table::new(3);
        table.release(0);
    }

    #[test]
    #[should_panic(expected = "while not thinking")]
    fn test_double_request_panics() {
        let table = Table::new(3);
        table.request(0);
        table.request(0);
    }
}
