//! Outcome and summary types shared across the dispatcher, aggregator, and
//! report builder. Gas figures are `u128` and serialize as decimal strings so
//! large values survive JSON round-trips intact.

use crate::stats::{gas_average, percentile, throughput};
use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};
use std::time::Duration;

/// Error-message fragments that indicate a sequence/ordering conflict rather
/// than an execution or transport failure.
const NONCE_ERROR_MARKERS: &[&str] = &[
    "nonce too low",
    "nonce too high",
    "invalid nonce",
    "nonce gap",
    "already known",
    "replacement transaction underpriced",
];

/// Classification of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The chain rejected the call over its sequence number.
    NonceConflict,
    /// Everything else: revert, transport error, timeout.
    Other,
}

impl FailureKind {
    /// Classify a failure by its message text.
    pub fn classify(message: &str) -> Self {
        let message = message.to_ascii_lowercase();
        if NONCE_ERROR_MARKERS.iter().any(|m| message.contains(m)) {
            FailureKind::NonceConflict
        } else {
            FailureKind::Other
        }
    }
}

/// The settled result of one dispatched call.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    Confirmed(Confirmation),
    Failed(CallFailure),
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Confirmed(_))
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match self {
            CallOutcome::Confirmed(confirmation) => Some(confirmation),
            CallOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&CallFailure> {
        match self {
            CallOutcome::Confirmed(_) => None,
            CallOutcome::Failed(failure) => Some(failure),
        }
    }
}

/// A confirmed receipt.
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// Submission-to-receipt latency for this call.
    pub elapsed: Duration,
    /// Completion time as an offset from the run start; the input to
    /// time-window grouping.
    pub completed_at: Duration,
    pub gas_used: u128,
    /// Finality unit the call landed in.
    pub block: u64,
}

/// A call that settled as a failure. Recorded, never retried.
#[derive(Debug, Clone)]
pub struct CallFailure {
    pub elapsed: Duration,
    pub reason: String,
    pub kind: FailureKind,
}

/// Latency percentiles over confirmed calls, in milliseconds.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LatencySummary {
    pub min_ms: u64,
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
    pub max_ms: u64,
}

impl LatencySummary {
    pub fn from_samples(samples: &[Duration]) -> Self {
        let mut sorted: Vec<u64> = samples.iter().map(|d| d.as_millis() as u64).collect();
        sorted.sort_unstable();
        Self {
            min_ms: sorted.first().copied().unwrap_or(0),
            p50_ms: percentile(&sorted, 50.0),
            p90_ms: percentile(&sorted, 90.0),
            p99_ms: percentile(&sorted, 99.0),
            max_ms: sorted.last().copied().unwrap_or(0),
        }
    }
}

/// Gas totals over confirmed calls.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasSummary {
    #[serde_as(as = "DisplayFromStr")]
    pub total: u128,
    #[serde_as(as = "DisplayFromStr")]
    pub average: u128,
    #[serde_as(as = "DisplayFromStr")]
    pub min: u128,
    #[serde_as(as = "DisplayFromStr")]
    pub max: u128,
}

impl GasSummary {
    /// `None` when no call confirmed; the average is undefined, not zero.
    pub fn from_outcomes(outcomes: &[CallOutcome]) -> Option<Self> {
        let mut total = 0u128;
        let mut min = u128::MAX;
        let mut max = 0u128;
        let mut succeeded = 0u64;
        for confirmation in outcomes.iter().filter_map(CallOutcome::confirmation) {
            total += confirmation.gas_used;
            min = min.min(confirmation.gas_used);
            max = max.max(confirmation.gas_used);
            succeeded += 1;
        }
        let average = gas_average(total, succeeded)?;
        Some(Self {
            total,
            average,
            min,
            max,
        })
    }
}

/// Per-finality-unit packing figures.
#[serde_as]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BlockStats {
    pub block: u64,
    pub count: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub gas: u128,
}

/// How densely the chain packed a burst into blocks.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct BlockPacking {
    pub per_block: Vec<BlockStats>,
    pub avg_calls_per_block: f64,
    pub max_calls_per_block: u64,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub avg_gas_per_call: Option<u128>,
}

/// One fixed-width throughput window. Windows are contiguous from the run
/// start; the final window is clipped to the actual run duration.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WindowStats {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub count: u64,
    pub throughput: f64,
}

/// First-window-versus-last-window throughput comparison.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Degradation {
    pub first_window_tps: f64,
    pub last_window_tps: f64,
    pub drop_pct: f64,
    pub degraded: bool,
}

/// Per-payload-size figures from the sweep scenario.
#[derive(Debug, Clone, Serialize)]
pub struct SweepTier {
    pub payload_bytes: usize,
    pub throughput: f64,
    pub gas: Option<GasSummary>,
}

/// Sweep extras: the tier series plus the fixed two-tier gas ratio check.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub tiers: Vec<SweepTier>,
    pub ratio_numerator_tier: usize,
    pub ratio_baseline_tier: usize,
    /// gas(numerator tier) / gas(baseline tier); absent if either tier had
    /// no confirmed calls.
    pub gas_ratio: Option<f64>,
    pub max_gas_ratio: f64,
}

/// Per-burst-size gas comparison between the two targets.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct ComparativeSizeRow {
    pub burst_size: usize,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub favored_avg_gas: Option<u128>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub baseline_avg_gas: Option<u128>,
}

/// Aggregated verdict of the comparative scenario.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct ComparativeVerdict {
    pub favored_target: String,
    pub baseline_target: String,
    pub per_size: Vec<ComparativeSizeRow>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub favored_avg_gas: Option<u128>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub baseline_avg_gas: Option<u128>,
    /// Symmetric signed difference; positive means the favored target is
    /// cheaper, and relabeling the targets only flips the sign.
    pub advantage_pct: Option<f64>,
    /// One-sided discount `(baseline - favored) / baseline * 100`.
    pub discount_pct: Option<f64>,
    pub passed: bool,
}

/// The unit of output per (scenario, target) pair, immutable once computed.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub target: String,
    pub attempted: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Failures the chain rejected over sequence numbers, counted separately
    /// as a collision diagnostic.
    pub nonce_conflicts: u64,
    pub elapsed_ms: u64,
    pub throughput: f64,
    pub latency: LatencySummary,
    pub gas: Option<GasSummary>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<BlockPacking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<WindowStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degradation: Option<Degradation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepSummary>,
}

impl ScenarioResult {
    /// Counts, percentiles, and throughput from a settled outcome sequence.
    /// `passed` starts false; the scenario runner applies its own rule.
    pub fn summarize(
        scenario: &str,
        target: &str,
        outcomes: &[CallOutcome],
        elapsed: Duration,
    ) -> Self {
        let attempted = outcomes.len() as u64;
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count() as u64;
        let nonce_conflicts = outcomes
            .iter()
            .filter_map(CallOutcome::failure)
            .filter(|f| f.kind == FailureKind::NonceConflict)
            .count() as u64;
        let latencies: Vec<Duration> = outcomes
            .iter()
            .filter_map(CallOutcome::confirmation)
            .map(|c| c.elapsed)
            .collect();
        Self {
            scenario: scenario.to_string(),
            target: target.to_string(),
            attempted,
            succeeded,
            failed: attempted - succeeded,
            nonce_conflicts,
            elapsed_ms: elapsed.as_millis() as u64,
            throughput: throughput(succeeded, elapsed),
            latency: LatencySummary::from_samples(&latencies),
            gas: GasSummary::from_outcomes(outcomes),
            passed: false,
            blocks: None,
            windows: None,
            degradation: None,
            sweep: None,
        }
    }
}
