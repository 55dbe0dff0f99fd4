//! Grouping of settled outcomes by finality unit and by time window.
//!
//! Both groupings look only at confirmed calls; failures carry no block or
//! completion data and contribute nothing here.

use omega_bench_core::{
    gas_average, BlockPacking, BlockStats, CallOutcome, Degradation, WindowStats,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Bucket confirmed calls by the block they landed in. Packing density —
/// how much concurrent work the chain folds into one block — is the primary
/// signal when comparing two deployments under contention.
pub fn pack_by_block(outcomes: &[CallOutcome]) -> BlockPacking {
    let mut buckets: BTreeMap<u64, BlockStats> = BTreeMap::new();
    let mut total_gas = 0u128;
    let mut succeeded = 0u64;
    for confirmation in outcomes.iter().filter_map(CallOutcome::confirmation) {
        let stats = buckets.entry(confirmation.block).or_insert(BlockStats {
            block: confirmation.block,
            count: 0,
            gas: 0,
        });
        stats.count += 1;
        stats.gas += confirmation.gas_used;
        total_gas += confirmation.gas_used;
        succeeded += 1;
    }

    let per_block: Vec<BlockStats> = buckets.into_values().collect();
    let avg_calls_per_block = if per_block.is_empty() {
        0.0
    } else {
        succeeded as f64 / per_block.len() as f64
    };
    let max_calls_per_block = per_block.iter().map(|b| b.count).max().unwrap_or(0);
    BlockPacking {
        per_block,
        avg_calls_per_block,
        max_calls_per_block,
        avg_gas_per_call: gas_average(total_gas, succeeded),
    }
}

/// Bucket confirmations into contiguous fixed-width windows covering the run.
///
/// A confirmation at offset `t` lands in window `floor(t / width)`. The final
/// window is clipped to the run duration rather than padded, and anything
/// completing after the run duration (an in-flight call awaited past the
/// deadline) is attributed to that final window.
pub fn window_series(
    outcomes: &[CallOutcome],
    width: Duration,
    run_duration: Duration,
) -> Vec<WindowStats> {
    let width_ms = width.as_millis() as u64;
    let run_ms = run_duration.as_millis() as u64;
    if width_ms == 0 || run_ms == 0 {
        return Vec::new();
    }

    let window_count = (run_ms as usize).div_ceil(width_ms as usize);
    let mut counts = vec![0u64; window_count];
    for confirmation in outcomes.iter().filter_map(CallOutcome::confirmation) {
        let offset_ms = confirmation.completed_at.as_millis() as u64;
        let index = ((offset_ms / width_ms) as usize).min(window_count - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| {
            let start_ms = index as u64 * width_ms;
            let end_ms = (start_ms + width_ms).min(run_ms);
            let window_secs = (end_ms - start_ms) as f64 / 1_000.0;
            WindowStats {
                index,
                start_ms,
                end_ms,
                count,
                throughput: if window_secs > 0.0 {
                    count as f64 / window_secs
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Compare the last window's throughput against the first window's.
///
/// The baseline is the first window only and the comparison is first-vs-last:
/// a dip in the middle that recovers by the end is deliberately not flagged,
/// and a noisy first window skews the result. Known limitation of this
/// check, kept narrow on purpose.
pub fn degradation(windows: &[WindowStats], threshold_pct: f64) -> Degradation {
    let (first, last) = match (windows.first(), windows.last()) {
        (Some(first), Some(last)) if windows.len() >= 2 => (first, last),
        _ => return Degradation::default(),
    };

    let drop_pct = if first.throughput > 0.0 {
        (first.throughput - last.throughput) / first.throughput * 100.0
    } else {
        0.0
    };
    Degradation {
        first_window_tps: first.throughput,
        last_window_tps: last.throughput,
        drop_pct,
        degraded: drop_pct > threshold_pct,
    }
}
