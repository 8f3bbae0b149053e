//! Positive-displacement meter model.
//!
//! The meter fills a fixed-volume measuring chamber and emits one pulse
//! every time the chamber completes. Integration runs left to right over
//! the horizon with a single carried threshold accumulator; the
//! accumulator lives for exactly one run and is never reset mid-run.

use crate::error::{Result, SimError};

/// Threshold-crossing state carried across the horizon.
///
/// `next_threshold` starts at one chamber volume and advances by one
/// chamber volume per emitted pulse, so a large enough inflow in a single
/// step crosses several thresholds and records several pulses at the same
/// second. That multi-pulse-per-step behavior mirrors the meter hardware
/// and is intentional.
#[derive(Debug, Clone)]
pub struct PulseAccumulator {
    cumulative_m3: f64,
    next_threshold_m3: f64,
    chamber_volume_m3: f64,
}

impl PulseAccumulator {
    pub fn new(chamber_volume_m3: f64) -> Result<Self> {
        if !chamber_volume_m3.is_finite() || chamber_volume_m3 <= 0.0 {
            return Err(SimError::Configuration(format!(
                "chamber volume must be a positive finite number, got {chamber_volume_m3}"
            )));
        }
        Ok(Self {
            cumulative_m3: 0.0,
            next_threshold_m3: chamber_volume_m3,
            chamber_volume_m3,
        })
    }

    /// Integrates one second of flow and returns the pulses emitted in
    /// that step.
    pub fn step(&mut self, flow_m3s: f64) -> u32 {
        self.cumulative_m3 += flow_m3s;

        let mut pulses = 0;
        while self.cumulative_m3 >= self.next_threshold_m3 {
            pulses += 1;
            self.next_threshold_m3 += self.chamber_volume_m3;
        }
        pulses
    }

    /// Total volume integrated so far [m³].
    pub fn cumulative_m3(&self) -> f64 {
        self.cumulative_m3
    }
}

/// Integrates a per-second flow series into a per-second pulse-count
/// series.
///
/// Fails on a non-positive chamber volume and on any NaN or negative
/// flow value, reporting the offending index, before a single bad pulse
/// is emitted.
pub fn pulse_counts(flow_m3s: &[f64], chamber_volume_m3: f64) -> Result<Vec<u32>> {
    let mut acc = PulseAccumulator::new(chamber_volume_m3)?;

    for (index, &value) in flow_m3s.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(SimError::NumericAnomaly { index, value });
        }
    }

    Ok(flow_m3s.iter().map(|&flow| acc.step(flow)).collect())
}
