//! Sustained load: sequential issue for a fixed wall-clock duration, with a
//! rolling-window throughput series and a first-vs-last degradation check.

use crate::accounts::AccountPool;
use crate::aggregate::{degradation, window_series};
use crate::client::{Address, ChainClient};
use crate::dispatcher::{assign_call, fire};
use crate::error::HarnessError;
use crate::payload::message_call;
use omega_bench_core::{ScenarioResult, SustainedConfig};
use std::time::Instant;
use tracing::{info, instrument};

#[instrument(name = "sustained", skip_all, fields(contract = %target))]
pub async fn run(
    client: &dyn ChainClient,
    pool: &mut AccountPool,
    target: &Address,
    config: &SustainedConfig,
) -> Result<ScenarioResult, HarnessError> {
    info!(duration = ?config.duration, "running sustained scenario");
    if pool.is_empty() {
        return Err(HarnessError::EmptyPool);
    }

    pool.snapshot_nonces(client).await?;
    let run_start = Instant::now();
    let deadline = run_start + config.duration;

    // The deadline gates issuance only: once a call is in flight it is
    // always awaited, never interrupted.
    let mut outcomes = Vec::new();
    let mut index = 0usize;
    while Instant::now() < deadline {
        let assignment = assign_call(
            pool,
            target,
            index % pool.len(),
            message_call(index, config.payload_size),
        );
        outcomes.push(fire(client, assignment, run_start).await);
        index += 1;
    }
    let elapsed = run_start.elapsed();

    let windows = window_series(&outcomes, config.window_width, elapsed);
    let degradation = degradation(&windows, config.degradation_threshold_pct);

    let mut result = ScenarioResult::summarize("sustained", &target.0, &outcomes, elapsed);
    result.passed = result.throughput >= config.target_tps && !degradation.degraded;
    info!(
        throughput = result.throughput,
        windows = windows.len(),
        drop_pct = degradation.drop_pct,
        degraded = degradation.degraded,
        passed = result.passed,
        "sustained scenario complete"
    );
    result.windows = Some(windows);
    result.degradation = Some(degradation);
    Ok(result)
}
