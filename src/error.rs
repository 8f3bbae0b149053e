//! Simulation error types

use thiserror::Error;

/// Errors produced by the simulation core.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid run parameters, reported before any series is built.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// NaN or negative flow rate in a composed series. The meter model
    /// refuses to integrate such a series rather than emit bogus pulses.
    #[error("numeric anomaly at second {index}: flow rate {value} is not a non-negative finite number")]
    NumericAnomaly { index: usize, value: f64 },
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
