//! Multi-account burst dispatch.
//!
//! The ordering discipline here is the load-bearing invariant of the whole
//! harness: every (account, nonce) pair for a burst is assigned in one
//! single-threaded loop *before* anything is awaited. Once the concurrent
//! await phase starts, no cursor is touched again until the next snapshot.
//!
//! Joins are settle-all: each call folds its own error into a
//! [`CallOutcome`], so one failure never aborts its siblings.

use crate::accounts::AccountPool;
use crate::client::{Address, CallData, CallRequest, ChainClient, ClientError, Receipt};
use crate::error::HarnessError;
use futures::future::join_all;
use omega_bench_core::{CallFailure, CallOutcome, Confirmation, FailureKind};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// One call slotted to an (account, nonce) pair. Built by the assignment
/// loop, consumed by exactly one submission attempt, never retried.
#[derive(Debug, Clone)]
pub struct CallAssignment {
    pub account_index: usize,
    pub request: CallRequest,
}

/// Assign one call to a specific account, taking that account's next free
/// sequence number.
pub fn assign_call(
    pool: &mut AccountPool,
    target: &Address,
    account_index: usize,
    data: CallData,
) -> CallAssignment {
    let nonce = pool.next_nonce(account_index);
    CallAssignment {
        account_index,
        request: CallRequest {
            from: pool.address(account_index).clone(),
            nonce,
            target: target.clone(),
            data,
        },
    }
}

/// Assign `burst_size` calls strict round-robin across the pool: call `i`
/// goes to account `i % K` with that account's next nonce, arguments from
/// `args(i)`. Deterministic in `i`, `K`, and the generator; no load-based
/// rebalancing. With `K > burst_size` the tail accounts simply get nothing,
/// and an empty pool yields no assignments.
pub fn assign_burst<G>(
    pool: &mut AccountPool,
    target: &Address,
    burst_size: usize,
    mut args: G,
) -> Vec<CallAssignment>
where
    G: FnMut(usize) -> CallData,
{
    let accounts = pool.len();
    if accounts == 0 {
        return Vec::new();
    }
    (0..burst_size)
        .map(|i| assign_call(pool, target, i % accounts, args(i)))
        .collect()
}

/// Submit one assignment and wait for its receipt, folding any error into
/// the outcome instead of raising it. `run_start` anchors the completion
/// offset used by time-window grouping.
pub async fn fire(
    client: &dyn ChainClient,
    assignment: CallAssignment,
    run_start: Instant,
) -> CallOutcome {
    let started = Instant::now();
    let result = submit_and_confirm(client, &assignment.request).await;
    let elapsed = started.elapsed();
    match result {
        Ok(receipt) => {
            record_success(elapsed);
            CallOutcome::Confirmed(Confirmation {
                elapsed,
                completed_at: run_start.elapsed(),
                gas_used: receipt.gas_used,
                block: receipt.block,
            })
        }
        Err(err) => {
            let reason = err.to_string();
            let kind = FailureKind::classify(&reason);
            warn!(
                from = %assignment.request.from,
                nonce = assignment.request.nonce,
                ?kind,
                %reason,
                "call failed"
            );
            record_failure(kind);
            CallOutcome::Failed(CallFailure {
                elapsed,
                reason,
                kind,
            })
        }
    }
}

async fn submit_and_confirm(
    client: &dyn ChainClient,
    request: &CallRequest,
) -> Result<Receipt, ClientError> {
    let pending = client.submit_call(request).await?;
    client.await_receipt(pending).await
}

/// Fire a burst: snapshot nonces, assign all calls, then await them all
/// concurrently. Returns every outcome, successes and failures alike.
///
/// A burst of size 0 returns without any chain interaction. Only the nonce
/// snapshot can raise; past it, failures settle as data.
#[instrument(skip_all, fields(contract = %target, burst_size))]
pub async fn dispatch<G>(
    client: &dyn ChainClient,
    pool: &mut AccountPool,
    target: &Address,
    burst_size: usize,
    args: G,
) -> Result<Vec<CallOutcome>, HarnessError>
where
    G: FnMut(usize) -> CallData,
{
    if burst_size == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(HarnessError::EmptyPool);
    }

    pool.snapshot_nonces(client).await?;
    let assignments = assign_burst(pool, target, burst_size, args);
    debug!(accounts = pool.len(), "assignments built, firing burst");

    let run_start = Instant::now();
    let outcomes = join_all(
        assignments
            .into_iter()
            .map(|assignment| fire(client, assignment, run_start)),
    )
    .await;
    Ok(outcomes)
}

/// Issue `count` calls one at a time, each fully awaited before the next.
/// Nonces are snapshotted once up front, not per call.
#[instrument(skip_all, fields(contract = %target, count))]
pub async fn dispatch_sequential<G>(
    client: &dyn ChainClient,
    pool: &mut AccountPool,
    target: &Address,
    count: usize,
    mut args: G,
) -> Result<Vec<CallOutcome>, HarnessError>
where
    G: FnMut(usize) -> CallData,
{
    if count == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(HarnessError::EmptyPool);
    }

    pool.snapshot_nonces(client).await?;
    let run_start = Instant::now();
    let mut outcomes = Vec::with_capacity(count);
    for i in 0..count {
        let assignment = assign_call(pool, target, i % pool.len(), args(i));
        outcomes.push(fire(client, assignment, run_start).await);
    }
    Ok(outcomes)
}

#[cfg(feature = "metrics")]
fn record_success(elapsed: Duration) {
    metrics::counter!("omega_bench.call_success").increment(1);
    metrics::histogram!("omega_bench.call_latency").record(elapsed.as_nanos() as f64);
}

#[cfg(not(feature = "metrics"))]
fn record_success(_elapsed: Duration) {}

#[cfg(feature = "metrics")]
fn record_failure(kind: FailureKind) {
    match kind {
        FailureKind::NonceConflict => {
            metrics::counter!("omega_bench.call_nonce_conflict").increment(1)
        }
        FailureKind::Other => metrics::counter!("omega_bench.call_error").increment(1),
    }
}

#[cfg(not(feature = "metrics"))]
fn record_failure(_kind: FailureKind) {}
