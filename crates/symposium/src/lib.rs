//! # SYMPOSIUM
//!
//! The simulation around [`symposium_core`]: configuration, pacing, diner
//! threads, and the decoupled output sink.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐              ┌─────────────────────────────┐
//! │ TOML config  │─────────────>│          Simulation         │
//! └──────────────┘   startup    │                             │
//!                               │  diner-0 ─┐                 │
//!                               │  diner-1 ─┼──> Table (core) │
//!                               │    ...    │    one guard    │
//!                               │  diner-N ─┘                 │
//!                               └──────┬──────────────────────┘
//!                                      │ DinerEvent channel
//!                                      ▼
//!                               ┌─────────────┐
//!                               │  sink (bin) │──> stdout
//!                               └─────────────┘
//! ```
//!
//! Each diner thread loops think -> request -> dine -> release until the
//! shutdown flag is raised. Think and dine durations are advisory noise
//! from [`Pacing`]; correctness never depends on them. Transition events
//! travel over a channel so that nothing ever prints while the table
//! guard is held.

pub mod config;
pub mod events;
pub mod pacing;
pub mod runner;

// Re-export the protocol crate
pub use symposium_core as core;

// Re-export commonly used types
pub use config::{ConfigError, SimulationConfig};
pub use events::{DinerEvent, Phase};
pub use pacing::Pacing;
pub use runner::Simulation;
