//! Point estimates and bootstrap confidence intervals
//!
//! Repeated runs (different seeds) at the same topic count collapse into one
//! plotted point: the sample mean, with a percentile-bootstrap interval
//! around it.

use rand::rngs::StdRng;
use rand::Rng;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile with linear interpolation between closest ranks.
/// `sorted` must be ascending; `pct` is in [0, 100].
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile-bootstrap interval for the mean of `values`.
///
/// Draws `n_boot` resamples with replacement, takes the mean of each, and
/// returns the `(100 - level) / 2` and `100 - (100 - level) / 2` percentiles.
/// A single sample has no spread and returns `(v, v)`.
pub fn bootstrap_ci(values: &[f64], n_boot: usize, level: f64, rng: &mut StdRng) -> (f64, f64) {
    match values.len() {
        0 => return (f64::NAN, f64::NAN),
        1 => return (values[0], values[0]),
        _ => {}
    }

    let n = values.len();
    let mut boot_means: Vec<f64> = (0..n_boot.max(1))
        .map(|_| {
            let total: f64 = (0..n).map(|_| values[rng.random_range(0..n)]).sum();
            total / n as f64
        })
        .collect();
    boot_means.sort_by(|a, b| a.total_cmp(b));

    let tail = (100.0 - level) / 2.0;
    (percentile(&boot_means, tail), percentile(&boot_means, 100.0 - tail))
}
