//! # Simulation Configuration
//!
//! Loaded from a TOML file once at startup, or defaulted. Validation
//! happens before any thread is spawned; after that the config is
//! immutable and every error in the workspace is a logic error.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`SimulationConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A ring needs at least two diners.
    #[error("at least 2 diners are required, got {0}")]
    TooFewDiners(usize),

    /// The wait interval is empty.
    #[error("invalid wait range: min {min_ms} ms exceeds max {max_ms} ms")]
    InvalidWaitRange {
        /// Configured lower bound.
        min_ms: u64,
        /// Configured upper bound.
        max_ms: u64,
    },
}

/// Parameters for one simulation run.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of diners (and forks) around the table.
    pub diners: usize,
    /// Lower bound for think and dine durations, in milliseconds.
    pub min_wait_ms: u64,
    /// Upper bound for think and dine durations, in milliseconds.
    pub max_wait_ms: u64,
    /// When set, pacing is fully deterministic per diner.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            diners: 5,
            min_wait_ms: 400,
            max_wait_ms: 800,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reads, parses and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the rest of the workspace assumes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.diners < 2 {
            return Err(ConfigError::TooFewDiners(self.diners));
        }
        if self.min_wait_ms > self.max_wait_ms {
            return Err(ConfigError::InvalidWaitRange {
                min_ms: self.min_wait_ms,
                max_ms: self.max_wait_ms,
            });
        }
        Ok(())
    }
}
