//! Concurrent burst: a single burst fired at once across the account pool,
//! with block-packing figures derived from where the calls landed.

use crate::accounts::AccountPool;
use crate::aggregate::pack_by_block;
use crate::client::{Address, ChainClient};
use crate::dispatcher::dispatch;
use crate::error::HarnessError;
use crate::payload::message_call;
use omega_bench_core::{ConcurrentConfig, ScenarioResult};
use std::time::Instant;
use tracing::{info, instrument};

#[instrument(name = "concurrent", skip_all, fields(contract = %target))]
pub async fn run(
    client: &dyn ChainClient,
    pool: &mut AccountPool,
    target: &Address,
    config: &ConcurrentConfig,
) -> Result<ScenarioResult, HarnessError> {
    info!(
        burst_size = config.burst_size,
        accounts = pool.len(),
        "running concurrent scenario"
    );

    let run_start = Instant::now();
    let outcomes = dispatch(client, pool, target, config.burst_size, |i| {
        message_call(i, config.payload_size)
    })
    .await?;
    let elapsed = run_start.elapsed();

    let mut result = ScenarioResult::summarize("concurrent", &target.0, &outcomes, elapsed);
    result.blocks = Some(pack_by_block(&outcomes));
    result.passed = result.throughput >= config.target_tps;
    info!(
        throughput = result.throughput,
        nonce_conflicts = result.nonce_conflicts,
        passed = result.passed,
        "concurrent scenario complete"
    );
    Ok(result)
}
