//! Simulation pipeline.
//!
//! Wires the event composer, perturbation model, meter integrator,
//! per-minute aggregation, reconstruction, and smoothing into one batch
//! run over a finite horizon. Everything is computed in a single forward
//! pass; nothing persists across runs.

use crate::config::SimConfig;
use crate::error::Result;
use crate::events::{build_event, EventKind};
use crate::{meter, minutes, perturb, reconstruct, smooth};

/// Per-component flow-rate series kept for diagnostic inspection when
/// superposition is on [m³/s].
#[derive(Debug, Clone)]
pub struct EventSeries {
    pub baseline: Vec<f64>,
    pub burst: Vec<f64>,
    pub cycle: Vec<f64>,
}

/// All series produced by one run. Per-second series have one entry per
/// simulated second; per-minute series one entry per 60 s window.
#[derive(Debug, Clone)]
pub struct SimulationData {
    /// Perturbed total flow rate, per second [m³/s]
    pub flow_m3s: Vec<f64>,
    /// Meter pulses emitted, per second
    pub pulse_counts: Vec<u32>,
    /// Pulses summed per minute window
    pub per_minute_pulses: Vec<u32>,
    /// Reconstructed flow from pulse counting, per minute [m³/min]
    pub observed_m3min: Vec<f64>,
    /// Gaussian-smoothed reconstruction, per minute [m³/min]
    pub smoothed_m3min: Vec<f64>,
    /// Event components, present when superposition was on
    pub events: Option<EventSeries>,
}

impl SimulationData {
    pub fn seconds(&self) -> usize {
        self.flow_m3s.len()
    }

    pub fn minutes(&self) -> usize {
        self.per_minute_pulses.len()
    }

    pub fn total_pulses(&self) -> u64 {
        self.pulse_counts.iter().map(|&c| c as u64).sum()
    }

    /// Volume that passed the meter over the whole horizon [m³].
    pub fn total_volume_m3(&self) -> f64 {
        self.flow_m3s.iter().sum()
    }
}

/// Runs one simulation to completion. Fails fast on invalid
/// configuration or a numeric anomaly in the composed flow; no partial
/// result is returned.
pub fn run_simulation(cfg: &SimConfig) -> Result<SimulationData> {
    cfg.validate()?;

    let (flow_m3s, events) = if cfg.superposition {
        let baseline = build_event(EventKind::Baseline, cfg.duration_s).series(cfg.duration_s);
        let burst = build_event(EventKind::Burst, cfg.duration_s).series(cfg.duration_s);
        let cycle = build_event(EventKind::Cycle, cfg.duration_s).series(cfg.duration_s);

        let combined: Vec<f64> = (0..cfg.duration_s)
            .map(|t| baseline[t] + burst[t] + cycle[t])
            .collect();

        (
            perturb::apply(&combined),
            Some(EventSeries {
                baseline,
                burst,
                cycle,
            }),
        )
    } else {
        (
            perturb::apply_constant(cfg.base_flow_rate_m3s(), cfg.duration_s),
            None,
        )
    };

    let pulse_counts = meter::pulse_counts(&flow_m3s, cfg.chamber_volume_m3)?;
    let per_minute_pulses = minutes::per_minute_sums(&pulse_counts)?;
    let observed_m3min = reconstruct::observed_flow(&per_minute_pulses, cfg.chamber_volume_m3);
    let smoothed_m3min = smooth::gaussian_smooth(&observed_m3min, smooth::SMOOTHING_SIGMA);

    Ok(SimulationData {
        flow_m3s,
        pulse_counts,
        per_minute_pulses,
        observed_m3min,
        smoothed_m3min,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::run_simulation;
    use crate::config::SimConfig;
    use crate::error::SimError;

    #[test]
    fn flat_hour_run_yields_about_130_pulses() {
        // 1.3 m³/h for one hour through a 0.01 m³ chamber. The two
        // perturbation terms integrate to ~0 over whole periods, so the
        // total can fall at most one pulse short of 130.
        let cfg = SimConfig {
            duration_s: 3600,
            chamber_volume_m3: 0.01,
            superposition: false,
            base_flow_rate_m3h: 1.3,
        };

        let data = run_simulation(&cfg).unwrap();
        let total = data.total_pulses();
        assert!(
            (129..=130).contains(&total),
            "expected ~130 pulses, got {total}"
        );
        assert!(data.events.is_none());
    }

    #[test]
    fn superposed_components_are_zero_outside_their_windows() {
        let cfg = SimConfig {
            duration_s: 600,
            superposition: true,
            ..SimConfig::default()
        };

        let data = run_simulation(&cfg).unwrap();
        let events = data.events.expect("superposition keeps event series");

        for (t, &rate) in events.burst.iter().enumerate() {
            let active = (360..480).contains(&t);
            assert_eq!(rate > 0.0, active, "burst at t={t}");
        }

        // period 100, duty 20, starting at 300
        for (t, &rate) in events.cycle.iter().enumerate() {
            let active = t >= 300 && (t - 300) % 100 < 20;
            assert_eq!(rate > 0.0, active, "cycle at t={t}");
        }
    }

    #[test]
    fn zero_chamber_volume_fails_before_any_series() {
        let cfg = SimConfig {
            chamber_volume_m3: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            run_simulation(&cfg),
            Err(SimError::Configuration(_))
        ));
    }

    #[test]
    fn per_minute_totals_match_per_second_totals() {
        let data = run_simulation(&SimConfig::default()).unwrap();

        let per_second: u64 = data.pulse_counts.iter().map(|&c| c as u64).sum();
        let per_minute: u64 = data.per_minute_pulses.iter().map(|&c| c as u64).sum();
        assert_eq!(per_second, per_minute);
        assert_eq!(data.minutes() * 60, data.seconds());
    }

    #[test]
    fn pulse_total_matches_integrated_volume() {
        let cfg = SimConfig::default();
        let data = run_simulation(&cfg).unwrap();

        let chambers = (data.total_volume_m3() / cfg.chamber_volume_m3).floor() as u64;
        assert_eq!(data.total_pulses(), chambers);
    }

    #[test]
    fn runs_are_reproducible() {
        let cfg = SimConfig::default();
        let a = run_simulation(&cfg).unwrap();
        let b = run_simulation(&cfg).unwrap();

        assert_eq!(a.flow_m3s, b.flow_m3s);
        assert_eq!(a.pulse_counts, b.pulse_counts);
        assert_eq!(a.smoothed_m3min, b.smoothed_m3min);
    }
}
