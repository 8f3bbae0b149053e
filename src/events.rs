//! Synthetic flow-rate event sources.
//!
//! Each event models one class of household gas usage as a deterministic
//! flow-rate component over the horizon. Components are additively
//! superposed into the total flow rate before pulse integration.

use crate::config::SECONDS_PER_HOUR;

/// Always-on micro-leak rate [m³/h].
const BASELINE_RATE_M3H: f64 = 0.05;
/// One-off appliance burst rate [m³/h], active on [3D/5, 4D/5).
const BURST_RATE_M3H: f64 = 0.2;
/// Periodic appliance cycle rate [m³/h].
const CYCLE_RATE_M3H: f64 = 1.2;
/// Fraction of each cycle period the appliance is on.
const CYCLE_DUTY: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Baseline,
    Burst,
    Cycle,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Baseline, EventKind::Burst, EventKind::Cycle];

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Baseline => "baseline",
            EventKind::Burst => "burst",
            EventKind::Cycle => "cycle",
        }
    }
}

/// One deterministic flow-rate component, queried per second index.
pub trait FlowEvent {
    /// Flow rate contributed at second `t` [m³/s].
    fn rate_at(&self, t: usize) -> f64;

    fn kind(&self) -> EventKind;

    /// Full component series over the horizon.
    fn series(&self, duration_s: usize) -> Vec<f64> {
        (0..duration_s).map(|t| self.rate_at(t)).collect()
    }
}

/// Constant micro-leak present over the whole horizon.
#[derive(Clone, Debug)]
pub struct BaselineEvent {
    rate_m3s: f64,
}

impl FlowEvent for BaselineEvent {
    fn rate_at(&self, _t: usize) -> f64 {
        self.rate_m3s
    }

    fn kind(&self) -> EventKind {
        EventKind::Baseline
    }
}

/// Single contiguous appliance burst on [start, end).
#[derive(Clone, Debug)]
pub struct BurstEvent {
    rate_m3s: f64,
    start: usize,
    end: usize,
}

impl FlowEvent for BurstEvent {
    fn rate_at(&self, t: usize) -> f64 {
        if t >= self.start && t < self.end {
            self.rate_m3s
        } else {
            0.0
        }
    }

    fn kind(&self) -> EventKind {
        EventKind::Burst
    }
}

/// Appliance cycling on for `active_len` seconds at the head of every
/// `period`-second window, starting at `start`.
#[derive(Clone, Debug)]
pub struct CycleEvent {
    rate_m3s: f64,
    start: usize,
    period: usize,
    active_len: usize,
}

impl FlowEvent for CycleEvent {
    fn rate_at(&self, t: usize) -> f64 {
        if t < self.start {
            return 0.0;
        }
        let phase = (t - self.start) % self.period;
        if phase < self.active_len {
            self.rate_m3s
        } else {
            0.0
        }
    }

    fn kind(&self) -> EventKind {
        EventKind::Cycle
    }
}

/// Builds the event source of the given kind for a horizon of
/// `duration_s` seconds. Window placement scales with the horizon.
pub fn build_event(kind: EventKind, duration_s: usize) -> Box<dyn FlowEvent> {
    match kind {
        EventKind::Baseline => Box::new(BaselineEvent {
            rate_m3s: BASELINE_RATE_M3H / SECONDS_PER_HOUR,
        }),
        EventKind::Burst => Box::new(BurstEvent {
            rate_m3s: BURST_RATE_M3H / SECONDS_PER_HOUR,
            start: 3 * duration_s / 5,
            end: 4 * duration_s / 5,
        }),
        EventKind::Cycle => {
            let period = duration_s / 6;
            assert!(period > 0, "cycle period requires duration_s >= 6");
            Box::new(CycleEvent {
                rate_m3s: CYCLE_RATE_M3H / SECONDS_PER_HOUR,
                start: duration_s / 2,
                period,
                active_len: (CYCLE_DUTY * period as f64) as usize,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_event, EventKind};
    use crate::config::SECONDS_PER_HOUR;

    #[test]
    fn baseline_is_constant_everywhere() {
        let event = build_event(EventKind::Baseline, 600);
        let expected = 0.05 / SECONDS_PER_HOUR;
        assert_eq!(event.rate_at(0), expected);
        assert_eq!(event.rate_at(599), expected);
    }

    #[test]
    fn burst_is_zero_outside_its_window() {
        // duration 600 -> burst active on [360, 480)
        let event = build_event(EventKind::Burst, 600);
        assert_eq!(event.rate_at(359), 0.0);
        assert!(event.rate_at(360) > 0.0);
        assert!(event.rate_at(479) > 0.0);
        assert_eq!(event.rate_at(480), 0.0);
    }

    #[test]
    fn cycle_repeats_with_correct_duty_windows() {
        // duration 600 -> period 100, on-windows [300,320), [400,420), [500,520)
        let event = build_event(EventKind::Cycle, 600);
        let series = event.series(600);
        for (t, &rate) in series.iter().enumerate() {
            let active = t >= 300 && (t - 300) % 100 < 20;
            if active {
                assert!(rate > 0.0, "expected cycle active at t={t}");
            } else {
                assert_eq!(rate, 0.0, "expected cycle idle at t={t}");
            }
        }
    }

    #[test]
    fn series_has_horizon_length() {
        for kind in EventKind::ALL {
            assert_eq!(build_event(kind, 600).series(600).len(), 600);
        }
    }
}
