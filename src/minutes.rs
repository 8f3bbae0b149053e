//! Per-minute aggregation of the pulse stream.
//!
//! Field devices report pulse counts per minute; the per-second stream is
//! collapsed into non-overlapping 60 s windows and per-minute values are
//! broadcast back to second resolution for output alignment.

use crate::config::WINDOW_S;
use crate::error::{Result, SimError};

/// Sums the per-second pulse counts over sequential 60 s windows.
pub fn per_minute_sums(pulse_counts: &[u32]) -> Result<Vec<u32>> {
    if pulse_counts.len() % WINDOW_S != 0 {
        return Err(SimError::Configuration(format!(
            "series length {} does not tile into {WINDOW_S} s windows",
            pulse_counts.len()
        )));
    }

    Ok(pulse_counts
        .chunks_exact(WINDOW_S)
        .map(|window| window.iter().sum())
        .collect())
}

/// Repeats each per-minute value across the 60 seconds of its window.
pub fn broadcast<T: Copy>(per_minute: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(per_minute.len() * WINDOW_S);
    for &value in per_minute {
        out.extend(std::iter::repeat(value).take(WINDOW_S));
    }
    out
}
