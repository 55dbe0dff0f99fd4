//! Sequential baseline: one call at a time, each fully confirmed before the
//! next is issued.

use crate::accounts::AccountPool;
use crate::client::{Address, ChainClient};
use crate::dispatcher::dispatch_sequential;
use crate::error::HarnessError;
use crate::payload::message_call;
use omega_bench_core::{ScenarioResult, SequentialConfig};
use std::time::Instant;
use tracing::{info, instrument};

#[instrument(name = "sequential", skip_all, fields(contract = %target))]
pub async fn run(
    client: &dyn ChainClient,
    pool: &mut AccountPool,
    target: &Address,
    config: &SequentialConfig,
) -> Result<ScenarioResult, HarnessError> {
    info!(iterations = config.iterations, "running sequential scenario");

    let run_start = Instant::now();
    let outcomes = dispatch_sequential(client, pool, target, config.iterations, |i| {
        message_call(i, config.payload_size)
    })
    .await?;
    let elapsed = run_start.elapsed();

    let mut result = ScenarioResult::summarize("sequential", &target.0, &outcomes, elapsed);
    result.passed = result.throughput >= config.target_tps;
    info!(
        throughput = result.throughput,
        succeeded = result.succeeded,
        failed = result.failed,
        passed = result.passed,
        "sequential scenario complete"
    );
    Ok(result)
}
