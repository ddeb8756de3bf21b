//! # Diner Events
//!
//! Transition reports shipped from diner threads to a single sink.
//!
//! The original sin this design avoids: printing while holding the
//! coordination guard stretches every critical section by the cost of a
//! console write. Diner threads instead push small copyable events into a
//! channel after the guard is released; one consumer owns stdout.

use std::fmt;
use std::time::Duration;

/// The phase a diner just entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Thinking for the given duration.
    Thinking(Duration),
    /// Requested the forks; parked until admitted.
    Hungry,
    /// Both forks held; dining for the given duration.
    Eating(Duration),
}

/// A state-transition report from one diner thread.
///
/// Events from one diner arrive at the sink in the order they were sent;
/// ordering across diners is whatever the scheduler produced.
#[derive(Clone, Copy, Debug)]
pub struct DinerEvent {
    /// Seat index of the reporting diner.
    pub diner: usize,
    /// Full think-dine cycles this diner completed before the event.
    pub cycle: u64,
    /// The phase just entered.
    pub phase: Phase,
}

impl fmt::Display for DinerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Thinking(wait) => {
                write!(f, "{} thinks {} ms.", self.diner, wait.as_millis())
            }
            Phase::Hungry => write!(f, "\t\t{} is hungry.", self.diner),
            Phase::Eating(wait) => write!(f, "{} eats {} ms.", self.diner, wait.as_millis()),
        }
    }
}
