use crate::constants::*;
use std::time::Duration;

/// Sequential scenario: burst size 1, repeated, each call fully awaited
/// before the next is issued.
#[derive(Clone, Debug)]
pub struct SequentialConfig {
    pub iterations: usize,
    pub payload_size: usize,
    pub target_tps: f64,
}

impl Default for SequentialConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            payload_size: DEFAULT_PAYLOAD_SIZE,
            target_tps: SEQUENTIAL_TARGET_TPS,
        }
    }
}

/// Concurrent scenario: a single burst fired at once across the pool.
#[derive(Clone, Debug)]
pub struct ConcurrentConfig {
    pub burst_size: usize,
    pub payload_size: usize,
    pub target_tps: f64,
}

impl Default for ConcurrentConfig {
    fn default() -> Self {
        Self {
            burst_size: 20,
            payload_size: DEFAULT_PAYLOAD_SIZE,
            target_tps: CONCURRENT_TARGET_TPS,
        }
    }
}

/// Sustained scenario: sequential issue for a fixed wall-clock duration.
/// The deadline stops new issuance only; in-flight calls are awaited.
#[derive(Clone, Debug)]
pub struct SustainedConfig {
    pub duration: Duration,
    pub window_width: Duration,
    pub payload_size: usize,
    pub target_tps: f64,
    pub degradation_threshold_pct: f64,
}

impl Default for SustainedConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(30),
            window_width: DEFAULT_WINDOW_WIDTH,
            payload_size: DEFAULT_PAYLOAD_SIZE,
            target_tps: SUSTAINED_TARGET_TPS,
            degradation_threshold_pct: DEGRADATION_THRESHOLD_PCT,
        }
    }
}

/// Payload-size sweep: a small sequential burst per tier, informational
/// except for the fixed two-tier gas ratio check. The ratio tiers are
/// configured independently of the sweep list, so the check survives edits
/// to `tiers` as long as both named sizes remain present.
#[derive(Clone, Debug)]
pub struct SweepConfig {
    pub tiers: Vec<usize>,
    pub calls_per_tier: usize,
    pub ratio_numerator_tier: usize,
    pub ratio_baseline_tier: usize,
    pub max_gas_ratio: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            tiers: PAYLOAD_TIERS.to_vec(),
            calls_per_tier: SWEEP_CALLS_PER_TIER,
            ratio_numerator_tier: SWEEP_RATIO_NUMERATOR_TIER,
            ratio_baseline_tier: SWEEP_RATIO_BASELINE_TIER,
            max_gas_ratio: SWEEP_MAX_GAS_RATIO,
        }
    }
}

/// The call pattern a comparative run drives against both targets.
///
/// `Messaging` is storage-bound (cost scales with payload bytes),
/// `ComputeHash` is computation-bound (cost scales with hash rounds, the
/// payload is a single fixed-width argument).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Workload {
    Messaging { payload_size: usize },
    ComputeHash { iterations: u64 },
}

impl Default for Workload {
    fn default() -> Self {
        Workload::Messaging {
            payload_size: DEFAULT_PAYLOAD_SIZE,
        }
    }
}

/// Comparative scenario: the identical dispatch pattern against two deployed
/// targets sharing one interface, at several burst sizes.
#[derive(Clone, Debug)]
pub struct ComparativeConfig {
    pub burst_sizes: Vec<usize>,
    pub workload: Workload,
    /// Minimum one-sided discount `(baseline - favored) / baseline * 100`
    /// the favored target must show to pass.
    pub min_advantage_pct: f64,
}

impl Default for ComparativeConfig {
    fn default() -> Self {
        Self {
            burst_sizes: vec![5, 10, 20],
            workload: Workload::default(),
            min_advantage_pct: COMPARATIVE_MIN_ADVANTAGE_PCT,
        }
    }
}
