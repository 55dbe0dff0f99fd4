//! The chain/RPC client seam.
//!
//! The harness never talks to a chain directly; everything goes through
//! [`ChainClient`]. Production code plugs in an RPC-backed implementation,
//! tests plug in `mock-chain`.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Hex-encoded account or contract address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address(pub String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

/// Function descriptor plus encoded arguments for one call.
#[derive(Debug, Clone)]
pub struct CallData {
    pub function: String,
    pub payload: Vec<u8>,
}

impl CallData {
    pub fn new(function: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            function: function.into(),
            payload,
        }
    }
}

/// A fully-specified signed call, ready for a single submission attempt.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub from: Address,
    pub nonce: u64,
    pub target: Address,
    pub data: CallData,
}

/// Opaque handle for an in-flight submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingCall {
    pub id: u64,
}

/// Confirmed execution receipt.
#[derive(Debug, Clone, Copy)]
pub struct Receipt {
    pub gas_used: u128,
    /// The finality unit the call was packed into.
    pub block: u64,
}

/// Errors surfaced by a [`ChainClient`] implementation.
///
/// Failure classification happens on the rendered message (see
/// `FailureKind::classify`), so implementations should keep the chain's
/// original error text in `Rpc`/`Reverted` payloads.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("execution reverted: {0}")]
    Reverted(String),
    #[error("timed out waiting for receipt")]
    Timeout,
}

/// Minimal surface the harness consumes from the chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Sequence number in the "pending" view: includes calls already
    /// broadcast but not yet final.
    async fn pending_nonce(&self, address: &Address) -> Result<u64, ClientError>;

    /// Non-blocking submission; returns a handle to await.
    async fn submit_call(&self, request: &CallRequest) -> Result<PendingCall, ClientError>;

    /// Wait for the receipt of a prior submission. Runs to completion or to
    /// the client's own timeout; the harness never cancels it.
    async fn await_receipt(&self, pending: PendingCall) -> Result<Receipt, ClientError>;
}
