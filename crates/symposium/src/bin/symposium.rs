//! # SYMPOSIUM Demo
//!
//! N diners, N forks, one guard, zero deadlocks. Runs until killed.
//!
//! ```bash
//! # Default table (5 diners, 400-800 ms waits)
//! symposium
//!
//! # Custom table
//! symposium symposium.toml
//! ```

use crossbeam_channel::unbounded;
use std::env;
use std::process;
use symposium::{Simulation, SimulationConfig};

fn main() {
    let config = match env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ FATAL: failed to load config {path}: {e}");
                process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                        SYMPOSIUM v0.1.0");
    println!("          one guard, one latch per seat, zero deadlocks");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("  Diners:   {}", config.diners);
    println!("  Waits:    {}-{} ms", config.min_wait_ms, config.max_wait_ms);
    if let Some(seed) = config.seed {
        println!("  Seed:     {seed}");
    }
    println!();

    let (events, sink) = unbounded();

    let _simulation = match Simulation::start(&config, &events) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("✗ FATAL: {e}");
            process::exit(1);
        }
    };

    // The sink owns stdout. Strictly outside the guard, strictly in
    // per-diner order; runs until the process is killed.
    for event in sink {
        println!("{event}");
    }
}
