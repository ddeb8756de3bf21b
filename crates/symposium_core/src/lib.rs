//! # SYMPOSIUM Core
//!
//! Deadlock-free arbitration for N diners sharing N forks around a table.
//! Every diner needs BOTH adjacent forks to eat; adjacent diners can never
//! eat at the same time.
//!
//! ## Architecture Rules
//!
//! 1. **One guard for the whole table** - a single mutex serializes every
//!    read and write of the seat array, and every admission decision.
//! 2. **Both forks or neither** - a diner is admitted atomically inside a
//!    guarded step, or it sleeps holding nothing. Partial acquisition does
//!    not exist, so circular wait cannot form.
//! 3. **Nothing blocks under the guard** - the only blocking wait in the
//!    whole crate is [`WakeLatch::consume`], and it runs strictly after the
//!    guard has been released.
//!
//! ## The Admission Flow
//!
//! ```text
//!              request(i)                         release(i)
//!         ┌─────────────────┐               ┌──────────────────────┐
//!         │ lock guard      │               │ lock guard           │
//!         │ seats[i]=Hungry │               │ seats[i]=Thinking    │
//!         │ may_eat(i)?     │               │ may_eat(left(i))?    │
//!         │   -> admit(i)   │               │   -> admit(left(i))  │
//!         │ unlock          │               │ may_eat(right(i))?   │
//!         │                 │               │   -> admit(right(i)) │
//!         │ latch[i].consume│ <──wakes────  │ unlock               │
//!         └─────────────────┘               └──────────────────────┘
//! ```
//!
//! `admit` is the only place a seat transitions to `Eating`, and it opens
//! that seat's wake latch in the same guarded step. A waiter can therefore
//! never miss a wakeup that was decided before it started waiting.
//!
//! ## Example
//!
//! ```rust,ignore
//! use symposium_core::Table;
//!
//! let table = Table::new(5);
//! table.request(2);   // blocks until both of seat 2's forks are held
//! // ... dine ...
//! table.release(2);   // returns immediately, may admit neighbors
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod latch;
pub mod state;
pub mod table;

pub use latch::WakeLatch;
pub use state::{SeatMap, SeatState};
pub use table::Table;
