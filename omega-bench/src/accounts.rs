//! Signing identities and their sequence cursors.
//!
//! Each account owns one cursor. Cursors are snapshotted from the chain's
//! pending view at scenario start and mutated only by the dispatcher's
//! single-threaded assignment loop, so a burst can never hand out duplicate
//! or gapped nonces for an account.

use crate::client::{Address, ChainClient};
use crate::error::HarnessError;
use std::fmt;
use tracing::debug;

/// Opaque signing secret. Held for the submission layer; never logged.
#[derive(Clone)]
pub struct SigningKey(String);

impl SigningKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// One signing identity with its next-free sequence number.
#[derive(Debug, Clone)]
pub struct Account {
    pub address: Address,
    pub key: SigningKey,
    nonce: u64,
}

impl Account {
    pub fn new(address: impl Into<Address>, key: SigningKey) -> Self {
        Self {
            address: address.into(),
            key,
            nonce: 0,
        }
    }
}

/// Fixed pool of accounts used for round-robin burst assignment.
#[derive(Debug)]
pub struct AccountPool {
    accounts: Vec<Account>,
}

impl AccountPool {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn address(&self, index: usize) -> &Address {
        &self.accounts[index].address
    }

    pub fn account(&self, index: usize) -> &Account {
        &self.accounts[index]
    }

    /// Re-synchronize every cursor from the chain's pending count.
    ///
    /// Called at scenario start, never mid-burst. Fail-fast: if any query
    /// fails the scenario aborts before a single call is fired, so no burst
    /// ever runs with unknown starting nonces.
    pub async fn snapshot_nonces(&mut self, client: &dyn ChainClient) -> Result<(), HarnessError> {
        for account in &mut self.accounts {
            let nonce = client.pending_nonce(&account.address).await.map_err(|source| {
                HarnessError::Snapshot {
                    address: account.address.to_string(),
                    source,
                }
            })?;
            account.nonce = nonce;
            debug!(address = %account.address, nonce, "snapshotted pending nonce");
        }
        Ok(())
    }

    /// Current cursor value for the account; increments for the next caller.
    /// Never reused and never gapped within a run.
    pub fn next_nonce(&mut self, index: usize) -> u64 {
        let account = &mut self.accounts[index];
        let nonce = account.nonce;
        account.nonce += 1;
        nonce
    }
}
