//! Metrics primitives: pure functions over collected samples.

use std::time::Duration;

/// Nearest-rank percentile over an ascending-sorted slice.
///
/// `index = ceil(p / 100 * len) - 1`, clamped into the slice; no
/// interpolation. An empty slice yields `T::default()`.
pub fn percentile<T: Copy + Default>(sorted: &[T], p: f64) -> T {
    if sorted.is_empty() {
        return T::default();
    }
    let rank = (p / 100.0 * sorted.len() as f64).ceil() as usize;
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[index]
}

/// Confirmed calls per second over the elapsed wall time.
///
/// Uses the successful count, not total attempted: a run with many failures
/// reports the throughput it actually achieved.
pub fn throughput(succeeded: u64, elapsed: Duration) -> f64 {
    let elapsed_ms = elapsed.as_millis();
    if elapsed_ms == 0 {
        return 0.0;
    }
    succeeded as f64 / elapsed_ms as f64 * 1_000.0
}

/// Arithmetic mean gas per confirmed call, with exact integer accumulation.
///
/// Undefined (`None`) when nothing succeeded; never reported as zero.
pub fn gas_average(total_gas: u128, succeeded: u64) -> Option<u128> {
    if succeeded == 0 {
        None
    } else {
        Some(total_gas / succeeded as u128)
    }
}

/// Signed percentage difference between two gas figures, symmetric under
/// relabeling: swapping `favored` and `baseline` inverts the sign and
/// preserves the magnitude. Positive means the favored target is cheaper.
pub fn relative_difference_pct(favored: u128, baseline: u128) -> f64 {
    let a = favored as f64;
    let b = baseline as f64;
    let mid = (a + b) / 2.0;
    if mid == 0.0 {
        0.0
    } else {
        (b - a) / mid * 100.0
    }
}

/// One-sided discount of the favored target relative to the baseline:
/// `(baseline - favored) / baseline * 100`.
pub fn discount_pct(favored: u128, baseline: u128) -> f64 {
    if baseline == 0 {
        0.0
    } else {
        (baseline as f64 - favored as f64) / baseline as f64 * 100.0
    }
}
