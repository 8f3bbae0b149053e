//! Flow-rate reconstruction from per-minute pulse counts.

/// Flow rate a field device would report for each minute window, based
/// purely on pulse counting [m³/min].
///
/// Zero pulses map to zero flow. That is coarser than the true underlying
/// flow and expresses "no flow detected"; the information loss is the
/// quantization artifact the downstream validation is interested in.
pub fn observed_flow(per_minute_pulses: &[u32], chamber_volume_m3: f64) -> Vec<f64> {
    per_minute_pulses
        .iter()
        .map(|&pulses| chamber_volume_m3 * pulses as f64)
        .collect()
}
