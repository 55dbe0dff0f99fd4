//! In-process simulated chain for exercising the harness without a network.
//!
//! Enforces per-account nonce ordering on submission, charges gas from a
//! per-target profile (base plus per-byte), confirms after a sampled latency,
//! and derives block numbers from wall time and a fixed block interval. A
//! submission log is kept so tests can assert on assignment patterns.

use async_trait::async_trait;
use omega_bench::client::{
    Address, CallData, CallRequest, ChainClient, ClientError, PendingCall, Receipt,
};
use omega_bench::payload::{decode_iterations, COMPUTE_HASH};
use rand::Rng;
use rand_distr::{Distribution, SkewNormal};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Gas charged per call against a registered target. `compute_hash` calls
/// are priced per hash round from the iteration count in the argument word;
/// everything else is priced per payload byte.
#[derive(Debug, Clone, Copy)]
pub struct GasProfile {
    pub base: u128,
    pub per_byte: u128,
    pub per_iteration: u128,
}

impl GasProfile {
    pub fn charge(&self, data: &CallData) -> u128 {
        if data.function == COMPUTE_HASH {
            self.base + self.per_iteration * u128::from(decode_iterations(&data.payload))
        } else {
            self.base + self.per_byte * data.payload.len() as u128
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockChainConfig {
    /// Wall-time width of one block.
    pub block_interval: Duration,
    /// Mean simulated submission-to-receipt latency.
    pub latency_mean: Duration,
    /// Latency spread; sampled from a right-skewed distribution.
    pub latency_std: Duration,
    /// Probability in [0, 1] that an accepted call reverts at confirmation.
    pub failure_rate: f64,
}

impl Default for MockChainConfig {
    fn default() -> Self {
        Self {
            block_interval: Duration::from_millis(250),
            latency_mean: Duration::from_millis(20),
            latency_std: Duration::from_millis(5),
            failure_rate: 0.0,
        }
    }
}

pub struct MockChain {
    config: MockChainConfig,
    genesis: Instant,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    nonces: HashMap<Address, u64>,
    targets: HashMap<Address, GasProfile>,
    pending: HashMap<u64, PendingTx>,
    submissions: Vec<CallRequest>,
    next_id: u64,
}

struct PendingTx {
    gas: u128,
    latency: Duration,
    revert: bool,
}

impl MockChain {
    pub fn new(config: MockChainConfig) -> Self {
        Self {
            config,
            genesis: Instant::now(),
            state: Mutex::new(State::default()),
        }
    }

    /// Deploy a contract: calls against unregistered targets are rejected.
    pub fn register_target(&self, address: Address, profile: GasProfile) {
        self.state.lock().unwrap().targets.insert(address, profile);
    }

    /// Every accepted submission, in acceptance order.
    pub fn submissions(&self) -> Vec<CallRequest> {
        self.state.lock().unwrap().submissions.clone()
    }

    fn current_block(&self) -> u64 {
        let elapsed_ms = self.genesis.elapsed().as_millis() as u64;
        let interval_ms = self.config.block_interval.as_millis().max(1) as u64;
        elapsed_ms / interval_ms + 1
    }

    fn sample_latency(&self) -> Duration {
        let mean = self.config.latency_mean.as_secs_f64();
        let std = self.config.latency_std.as_secs_f64();
        if std <= 0.0 {
            return self.config.latency_mean;
        }
        let skew = SkewNormal::new(mean, std, 10.0).expect("latency distribution");
        Duration::from_secs_f64(skew.sample(&mut rand::thread_rng()).max(0.0))
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new(MockChainConfig::default())
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn pending_nonce(&self, address: &Address) -> Result<u64, ClientError> {
        Ok(*self.state.lock().unwrap().nonces.get(address).unwrap_or(&0))
    }

    async fn submit_call(&self, request: &CallRequest) -> Result<PendingCall, ClientError> {
        let latency = self.sample_latency();
        let revert = self.config.failure_rate > 0.0
            && rand::thread_rng().gen_bool(self.config.failure_rate.clamp(0.0, 1.0));

        let mut state = self.state.lock().unwrap();
        let profile = *state.targets.get(&request.target).ok_or_else(|| {
            ClientError::Rpc(format!("unknown target {}", request.target))
        })?;

        let expected = *state.nonces.get(&request.from).unwrap_or(&0);
        if request.nonce < expected {
            return Err(ClientError::Rpc(format!(
                "nonce too low: expected {expected}, got {}",
                request.nonce
            )));
        }
        if request.nonce > expected {
            return Err(ClientError::Rpc(format!(
                "invalid nonce: gap ahead of {expected}"
            )));
        }
        state.nonces.insert(request.from.clone(), expected + 1);
        state.submissions.push(request.clone());

        state.next_id += 1;
        let id = state.next_id;
        state.pending.insert(
            id,
            PendingTx {
                gas: profile.charge(&request.data),
                latency,
                revert,
            },
        );
        debug!(id, from = %request.from, nonce = request.nonce, "call accepted");
        Ok(PendingCall { id })
    }

    async fn await_receipt(&self, pending: PendingCall) -> Result<Receipt, ClientError> {
        let tx = self
            .state
            .lock()
            .unwrap()
            .pending
            .remove(&pending.id)
            .ok_or_else(|| ClientError::Rpc(format!("unknown handle {}", pending.id)))?;

        tokio::time::sleep(tx.latency).await;
        if tx.revert {
            return Err(ClientError::Reverted("injected failure".to_string()));
        }
        Ok(Receipt {
            gas_used: tx.gas,
            block: self.current_block(),
        })
    }
}
