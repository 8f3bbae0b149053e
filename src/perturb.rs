//! Deterministic flow-rate perturbation.
//!
//! Real meter flow is never perfectly flat; two fixed-frequency terms
//! emulate that variability while keeping runs fully reproducible. There
//! is no random state anywhere in the model.

use std::f64::consts::PI;

/// Slow drift half-period [s].
const LONG_HALF_PERIOD_S: f64 = 1800.0;
/// High-frequency ripple half-period [s].
const SHORT_HALF_PERIOD_S: f64 = 30.0;
const LONG_AMPLITUDE: f64 = 0.03;
const SHORT_AMPLITUDE: f64 = 0.002;

/// Perturbed flow rate at second `t` for the given base rate.
pub fn perturbed_rate(base: f64, t: usize) -> f64 {
    let t = t as f64;
    let long_periodic = LONG_AMPLITUDE * base * (PI * t / LONG_HALF_PERIOD_S).sin();
    let short_periodic = SHORT_AMPLITUDE * base * (PI * t / SHORT_HALF_PERIOD_S).cos();
    base + long_periodic + short_periodic
}

/// Applies the perturbation to a whole series, second index as time.
pub fn apply(base: &[f64]) -> Vec<f64> {
    base.iter()
        .enumerate()
        .map(|(t, &rate)| perturbed_rate(rate, t))
        .collect()
}

/// Applies the perturbation to a constant base rate over `n` seconds.
pub fn apply_constant(base: f64, n: usize) -> Vec<f64> {
    (0..n).map(|t| perturbed_rate(base, t)).collect()
}
