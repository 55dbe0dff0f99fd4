//! Call argument generation for the two benchmark workloads.
//!
//! The messaging contract's gas cost scales with content size, so scenarios
//! ask for payloads of an exact byte length. Content is deterministic: the
//! same call index and size always produce the same bytes. The compute
//! contract takes a single iteration count instead; its cost scales with
//! hash rounds, not bytes.

use crate::client::CallData;
use omega_bench_core::Workload;

const FILLER: &[u8] = b"omega-bench-payload-";

/// Storage-bound entry point: stores a message of the given content.
pub const SEND_MESSAGE: &str = "send_message";

/// Computation-bound entry point: runs N iterated hash rounds per call.
pub const COMPUTE_HASH: &str = "compute_hash";

/// Deterministic printable payload of exactly `size` bytes.
pub fn payload_of_size(size: usize) -> Vec<u8> {
    FILLER.iter().copied().cycle().take(size).collect()
}

/// Payload of exactly `size` bytes carrying the call index in a readable
/// prefix, so no two calls in a burst are byte-identical. The prefix is
/// truncated if `size` is smaller than it.
pub fn indexed_payload(index: usize, size: usize) -> Vec<u8> {
    let prefix = format!("msg-{index:06}-");
    let mut payload = Vec::with_capacity(size);
    payload.extend_from_slice(prefix.as_bytes());
    payload.extend(FILLER.iter().copied().cycle().take(size.saturating_sub(prefix.len())));
    payload.truncate(size);
    payload
}

/// The standard argument generator: a `send_message` call with an indexed
/// payload of the given size.
pub fn message_call(index: usize, size: usize) -> CallData {
    CallData::new(SEND_MESSAGE, indexed_payload(index, size))
}

/// A `compute_hash` call. The iteration count travels as one 32-byte
/// big-endian word, matching the contract's uint256 argument.
pub fn compute_call(iterations: u64) -> CallData {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&iterations.to_be_bytes());
    CallData::new(COMPUTE_HASH, word.to_vec())
}

/// Arguments for call `index` under the given workload.
pub fn workload_call(workload: &Workload, index: usize) -> CallData {
    match workload {
        Workload::Messaging { payload_size } => message_call(index, *payload_size),
        Workload::ComputeHash { iterations } => compute_call(*iterations),
    }
}

/// Iteration count carried by a `compute_hash` payload: the last 8 bytes of
/// the argument word, big-endian.
pub fn decode_iterations(payload: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    let take = payload.len().min(8);
    bytes[8 - take..].copy_from_slice(&payload[payload.len() - take..]);
    u64::from_be_bytes(bytes)
}
