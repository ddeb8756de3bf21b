//! # Pacing
//!
//! Randomized think/dine durations. Purely advisory: the protocol is
//! correct with any durations including zero, these just make the demo
//! interleave interestingly.
//!
//! With a configured seed every diner gets its own deterministic ChaCha8
//! stream (seed + seat index), so a run's trace is reproducible. Without
//! one, the wall clock seeds each stream.

use crate::config::SimulationConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Per-diner duration source. One instance per diner thread; never shared.
pub struct Pacing {
    /// Deterministic stream when seeded from config.
    rng: ChaCha8Rng,
    /// Inclusive lower bound, milliseconds.
    min_ms: u64,
    /// Inclusive upper bound, milliseconds.
    max_ms: u64,
}

impl Pacing {
    /// Builds the duration source for one seat.
    #[must_use]
    pub fn for_diner(config: &SimulationConfig, seat: usize) -> Self {
        let seed = config
            .seed
            .map_or_else(|| entropy_seed(seat), |seed| seed.wrapping_add(seat as u64));

        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min_ms: config.min_wait_ms,
            max_ms: config.max_wait_ms,
        }
    }

    /// Returns the next wait, uniform in `[min_wait_ms, max_wait_ms]`.
    pub fn next_wait(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(self.min_ms..=self.max_ms))
    }
}

/// Wall-clock seed for unseeded runs. Mixing in the seat index keeps the
/// diners from marching in lockstep.
fn entropy_seed(seat: usize) -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    (nanos as u64).wrapping_mul(0x9E37_79B9_97F4_A7C5) ^ (seat as u64)
}
