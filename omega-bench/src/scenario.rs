//! Scenario runners.
//!
//! Each scenario configures the dispatcher with its own pattern, applies its
//! own pass rule, and returns a [`ScenarioResult`]. The lifecycle is
//! `configured -> running -> completed | aborted`: `Ok` is `completed` (even
//! with a nonzero failure count), `Err` is `aborted` and only a setup-phase
//! failure produces it.

pub mod comparative;
pub mod concurrent;
pub mod payload_sweep;
pub mod sequential;
pub mod sustained;

pub use comparative::ComparativeRun;

pub use omega_bench_core::{
    ComparativeConfig, ConcurrentConfig, ScenarioResult, SequentialConfig, SustainedConfig,
    SweepConfig, Workload,
};
