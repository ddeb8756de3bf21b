//! # Simulation Runner
//!
//! Owns the diner threads. Each runs the classic loop - think, request,
//! dine, release - against the shared [`Table`], checking a shutdown flag
//! at the top of every iteration.
//!
//! ## Shutdown
//!
//! Shutdown is cooperative and always drains: a thread only observes the
//! flag between cycles, after it has released its forks. So when the flag
//! goes up, every diner still blocked in `request` has all of its
//! potential blockers guaranteed to release exactly once more - which
//! admits it, lets it dine, release, observe the flag and exit. `stop`
//! can therefore join unconditionally.

use crate::config::{ConfigError, SimulationConfig};
use crate::events::{DinerEvent, Phase};
use crate::pacing::Pacing;
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use symposium_core::Table;

/// A running set of diner threads around one shared table.
///
/// Dropping a `Simulation` stops and joins it.
pub struct Simulation {
    /// The shared arbitration state.
    table: Arc<Table>,
    /// Raised once; threads observe it between cycles.
    shutdown: Arc<AtomicBool>,
    /// Completed-cycle counter per seat, for liveness checks.
    cycles: Arc<[AtomicU64]>,
    /// Joined on stop.
    handles: Vec<JoinHandle<()>>,
}

impl Simulation {
    /// Validates `config` and spawns one named thread per diner.
    ///
    /// Transition events are pushed into `events`; pass the sender of an
    /// unbounded channel and drain the receiver elsewhere. A dropped
    /// receiver silently disables reporting without affecting the diners.
    pub fn start(
        config: &SimulationConfig,
        events: &Sender<DinerEvent>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let table = Arc::new(Table::new(config.diners));
        let shutdown = Arc::new(AtomicBool::new(false));
        let cycles: Arc<[AtomicU64]> = (0..config.diners).map(|_| AtomicU64::new(0)).collect();

        let handles = (0..config.diners)
            .map(|seat| {
                let table = Arc::clone(&table);
                let shutdown = Arc::clone(&shutdown);
                let cycles = Arc::clone(&cycles);
                let events = events.clone();
                let pacing = Pacing::for_diner(config, seat);

                thread::Builder::new()
                    .name(format!("diner-{seat}"))
                    .spawn(move || {
                        diner_loop(seat, &table, &shutdown, &cycles[seat], pacing, &events);
                    })
                    .expect("failed to spawn diner thread")
            })
            .collect();

        tracing::info!(diners = config.diners, "symposium started");

        Ok(Self {
            table,
            shutdown,
            cycles,
            handles,
        })
    }

    /// The shared table, for observers sampling seat snapshots.
    #[must_use]
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Full cycles completed by the diner at `seat` so far.
    #[must_use]
    pub fn cycles_completed(&self, seat: usize) -> u64 {
        self.cycles[seat].load(Ordering::Relaxed)
    }

    /// Raises the shutdown flag and joins every diner thread.
    ///
    /// Idempotent; see the module docs for why the joins terminate.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);

        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }

        tracing::info!("symposium stopped");
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One diner's loop. Events are sent strictly outside the guard; the
/// sends themselves never block (unbounded channel) and a send to a
/// closed channel is deliberately ignored.
fn diner_loop(
    seat: usize,
    table: &Table,
    shutdown: &AtomicBool,
    cycles: &AtomicU64,
    mut pacing: Pacing,
    events: &Sender<DinerEvent>,
) {
    let mut cycle = 0u64;

    while !shutdown.load(Ordering::Relaxed) {
        let think = pacing.next_wait();
        let _ = events.send(DinerEvent {
            diner: seat,
            cycle,
            phase: Phase::Thinking(think),
        });
        thread::sleep(think);

        let _ = events.send(DinerEvent {
            diner: seat,
            cycle,
            phase: Phase::Hungry,
        });
        table.request(seat);

        let dine = pacing.next_wait();
        let _ = events.send(DinerEvent {
            diner: seat,
            cycle,
            phase: Phase::Eating(dine),
        });
        thread::sleep(dine);

        table.release(seat);
        cycle += 1;
        cycles.store(cycle, Ordering::Relaxed);
    }

    tracing::debug!(seat, cycles = cycle, "diner thread exiting");
}
