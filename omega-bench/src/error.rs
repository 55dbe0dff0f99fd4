use crate::client::ClientError;
use thiserror::Error;

/// Setup-phase failures. Anything past setup settles into call outcomes
/// instead of raising.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The pre-dispatch nonce snapshot failed; the scenario aborts before
    /// any call is fired.
    #[error("nonce snapshot failed for {address}: {source}")]
    Snapshot {
        address: String,
        source: ClientError,
    },

    #[error("scenario requires at least one account")]
    EmptyPool,
}
