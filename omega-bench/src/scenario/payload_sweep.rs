//! Payload-size sweep: a small sequential burst per payload tier, recording
//! gas and throughput per size. Informational except for the fixed ratio
//! check between two named tiers.

use crate::accounts::AccountPool;
use crate::client::{Address, ChainClient};
use crate::dispatcher::dispatch_sequential;
use crate::error::HarnessError;
use crate::payload::message_call;
use omega_bench_core::{
    throughput, GasSummary, ScenarioResult, SweepConfig, SweepSummary, SweepTier,
};
use std::time::Instant;
use tracing::{info, instrument};

#[instrument(name = "payload_sweep", skip_all, fields(contract = %target))]
pub async fn run(
    client: &dyn ChainClient,
    pool: &mut AccountPool,
    target: &Address,
    config: &SweepConfig,
) -> Result<ScenarioResult, HarnessError> {
    info!(tiers = ?config.tiers, calls_per_tier = config.calls_per_tier, "running payload sweep");

    let run_start = Instant::now();
    let mut tiers = Vec::with_capacity(config.tiers.len());
    let mut all_outcomes = Vec::new();
    for &payload_bytes in &config.tiers {
        let tier_start = Instant::now();
        let outcomes = dispatch_sequential(client, pool, target, config.calls_per_tier, |i| {
            message_call(i, payload_bytes)
        })
        .await?;
        let tier_elapsed = tier_start.elapsed();

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count() as u64;
        let tier = SweepTier {
            payload_bytes,
            throughput: throughput(succeeded, tier_elapsed),
            gas: GasSummary::from_outcomes(&outcomes),
        };
        info!(
            payload_bytes,
            throughput = tier.throughput,
            avg_gas = ?tier.gas.map(|g| g.average),
            "tier complete"
        );
        tiers.push(tier);
        all_outcomes.extend(outcomes);
    }
    let elapsed = run_start.elapsed();

    let gas_ratio = tier_ratio(&tiers, config.ratio_numerator_tier, config.ratio_baseline_tier);
    let mut result = ScenarioResult::summarize("payload_sweep", &target.0, &all_outcomes, elapsed);
    result.passed = gas_ratio.is_some_and(|ratio| ratio < config.max_gas_ratio);
    info!(?gas_ratio, passed = result.passed, "payload sweep complete");
    result.sweep = Some(SweepSummary {
        tiers,
        ratio_numerator_tier: config.ratio_numerator_tier,
        ratio_baseline_tier: config.ratio_baseline_tier,
        gas_ratio,
        max_gas_ratio: config.max_gas_ratio,
    });
    Ok(result)
}

/// Average-gas ratio between two tiers; absent unless both tiers exist and
/// have confirmed calls.
fn tier_ratio(tiers: &[SweepTier], numerator: usize, baseline: usize) -> Option<f64> {
    let avg_of = |size: usize| {
        tiers
            .iter()
            .find(|t| t.payload_bytes == size)
            .and_then(|t| t.gas)
            .map(|g| g.average)
    };
    let numerator_avg = avg_of(numerator)?;
    let baseline_avg = avg_of(baseline)?;
    if baseline_avg == 0 {
        None
    } else {
        Some(numerator_avg as f64 / baseline_avg as f64)
    }
}
