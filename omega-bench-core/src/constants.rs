use std::time::Duration;

/// Pass threshold for the sequential scenario, in confirmed calls per second.
pub const SEQUENTIAL_TARGET_TPS: f64 = 2.0;

/// Pass threshold for the single-burst concurrent scenario.
pub const CONCURRENT_TARGET_TPS: f64 = 5.0;

/// Pass threshold for the sustained scenario.
pub const SUSTAINED_TARGET_TPS: f64 = 1.5;

/// Throughput drop between the first and last window beyond which a
/// sustained run is flagged as degraded, in percent.
pub const DEGRADATION_THRESHOLD_PCT: f64 = 20.0;

/// Width of the rolling throughput windows in the sustained scenario.
pub const DEFAULT_WINDOW_WIDTH: Duration = Duration::from_millis(2_500);

/// Message payload size used by scenarios that do not sweep sizes, in bytes.
pub const DEFAULT_PAYLOAD_SIZE: usize = 256;

/// Hash rounds per call in the compute workload.
pub const DEFAULT_COMPUTE_ITERATIONS: u64 = 100;

/// Payload sizes exercised by the payload-size sweep, in bytes.
pub const PAYLOAD_TIERS: [usize; 4] = [64, 256, 1024, 4096];

/// Sequential calls issued per payload tier during the sweep.
pub const SWEEP_CALLS_PER_TIER: usize = 5;

/// Tier whose average gas sits in the numerator of the sweep ratio check.
pub const SWEEP_RATIO_NUMERATOR_TIER: usize = 1_024;

/// Tier whose average gas the numerator tier is compared against.
pub const SWEEP_RATIO_BASELINE_TIER: usize = 64;

/// The sweep fails if gas(numerator tier) / gas(baseline tier) reaches this.
pub const SWEEP_MAX_GAS_RATIO: f64 = 3.0;

/// Minimum aggregated one-sided gas discount (percent) the favored target
/// must show over the baseline target in the comparative scenario.
pub const COMPARATIVE_MIN_ADVANTAGE_PCT: f64 = 20.0;
