//! Gaussian low-pass smoothing of the reconstructed flow rate.
//!
//! Pulse counting quantizes the flow estimate into stair-steps; a fixed
//! symmetric Gaussian kernel removes that jitter. The filter is pure and
//! stateless. Edges use the reflect policy: index -1 mirrors index 0,
//! index n mirrors index n-1.

/// Kernel spread in minute windows.
pub const SMOOTHING_SIGMA: f64 = 2.0;

/// Kernel support extends to this many sigmas on each side.
const TRUNCATE: f64 = 4.0;

fn kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as usize;
    let mut weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = i as f64 - radius as f64;
            (-0.5 * x * x / (sigma * sigma)).exp()
        })
        .collect();

    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Maps an out-of-range index back into [0, n) by mirroring at both
/// edges, repeatedly for supports wider than the series.
fn reflect(index: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let mut i = index.rem_euclid(period);
    if i >= n {
        i = period - 1 - i;
    }
    i as usize
}

/// Smooths a series with a normalized Gaussian kernel of the given
/// spread, reflect boundary handling.
pub fn gaussian_smooth(values: &[f64], sigma: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let weights = kernel(sigma);
    let radius = weights.len() as isize / 2;
    let n = values.len();

    (0..n as isize)
        .map(|center| {
            weights
                .iter()
                .enumerate()
                .map(|(k, &w)| w * values[reflect(center + k as isize - radius, n)])
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{gaussian_smooth, kernel, reflect, SMOOTHING_SIGMA};
    use approx::assert_relative_eq;

    #[test]
    fn kernel_is_symmetric_and_normalized() {
        let weights = kernel(SMOOTHING_SIGMA);
        assert_eq!(weights.len(), 17);

        let total: f64 = weights.iter().sum();
        assert_relative_eq!(total, 1.0, max_relative = 1e-12);
        for i in 0..weights.len() / 2 {
            assert_eq!(weights[i], weights[weights.len() - 1 - i]);
        }
    }

    #[test]
    fn reflect_mirrors_both_edges() {
        assert_eq!(reflect(-1, 10), 0);
        assert_eq!(reflect(-3, 10), 2);
        assert_eq!(reflect(10, 10), 9);
        assert_eq!(reflect(12, 10), 7);
        assert_eq!(reflect(5, 10), 5);
    }

    #[test]
    fn constant_series_stays_constant() {
        let values = vec![0.42; 40];
        let smoothed = gaussian_smooth(&values, SMOOTHING_SIGMA);

        assert_eq!(smoothed.len(), values.len());
        for &v in &smoothed {
            assert_relative_eq!(v, 0.42, max_relative = 1e-12);
        }
    }

    #[test]
    fn smoothing_preserves_series_mass_away_from_edges() {
        // A centered impulse spreads symmetrically and keeps its mass.
        let mut values = vec![0.0; 41];
        values[20] = 1.0;
        let smoothed = gaussian_smooth(&values, SMOOTHING_SIGMA);

        let mass: f64 = smoothed.iter().sum();
        assert_relative_eq!(mass, 1.0, max_relative = 1e-12);
        for k in 1..=8 {
            assert_relative_eq!(smoothed[20 - k], smoothed[20 + k], max_relative = 1e-12);
        }
        assert!(smoothed[20] > smoothed[21]);
    }

    #[test]
    fn short_series_still_smooths() {
        // Support wider than the series exercises repeated reflection.
        let smoothed = gaussian_smooth(&[1.0, 2.0, 3.0], SMOOTHING_SIGMA);
        assert_eq!(smoothed.len(), 3);
        assert!(smoothed.iter().all(|v| v.is_finite()));
    }
}
