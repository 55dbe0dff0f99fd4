#[allow(unused)]
use utils::*;

use omega_bench::client::Address;
use omega_bench::dispatcher::{assign_call, dispatch, fire};
use omega_bench::payload::message_call;
use omega_bench_core::FailureKind;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

#[tokio::test]
async fn round_robin_order_across_pool() {
    init();
    let chain = fast_chain();
    let mut pool = pool_of(3);
    let target = Address::new(MESSAGING);

    let outcomes = dispatch(&chain, &mut pool, &target, 5, |i| message_call(i, 64))
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 5);
    assert!(outcomes.iter().all(|o| o.is_success()));

    // Accepted submission order mirrors the assignment order: strict
    // round-robin, lowest index to account 0.
    let senders: Vec<Address> = chain.submissions().iter().map(|s| s.from.clone()).collect();
    let expected: Vec<Address> = [0usize, 1, 2, 0, 1]
        .iter()
        .map(|i| pool.address(*i).clone())
        .collect();
    assert_eq!(senders, expected);
}

#[tokio::test]
async fn burst_nonces_are_unique_and_contiguous() {
    init();
    let chain = fast_chain();
    let mut pool = pool_of(4);
    let target = Address::new(MESSAGING);

    let outcomes = dispatch(&chain, &mut pool, &target, 21, |i| message_call(i, 64))
        .await
        .unwrap();
    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 21);

    let submissions = chain.submissions();
    let pairs: HashSet<(Address, u64)> = submissions
        .iter()
        .map(|s| (s.from.clone(), s.nonce))
        .collect();
    assert_eq!(pairs.len(), 21);

    let mut per_account: HashMap<Address, Vec<u64>> = HashMap::new();
    for submission in &submissions {
        per_account
            .entry(submission.from.clone())
            .or_default()
            .push(submission.nonce);
    }
    for nonces in per_account.values_mut() {
        nonces.sort_unstable();
        let expected: Vec<u64> = (0..nonces.len() as u64).collect();
        assert_eq!(nonces, &expected, "nonce gap within an account's burst range");
    }
}

#[tokio::test]
async fn more_accounts_than_calls_leaves_tail_idle() {
    init();
    let chain = fast_chain();
    let mut pool = pool_of(5);
    let target = Address::new(MESSAGING);

    let outcomes = dispatch(&chain, &mut pool, &target, 3, |i| message_call(i, 64))
        .await
        .unwrap();
    assert!(outcomes.iter().all(|o| o.is_success()));

    let senders: HashSet<Address> = chain.submissions().iter().map(|s| s.from.clone()).collect();
    assert_eq!(senders.len(), 3);
}

#[tokio::test]
async fn stale_snapshot_is_classified_as_nonce_conflict() {
    init();
    let chain = fast_chain();
    let target = Address::new(MESSAGING);

    // Two pools over the same identity: the second snapshots, then goes
    // stale while the first dispatches.
    let mut active = pool_of(1);
    let mut stale = pool_of(1);
    stale.snapshot_nonces(&chain).await.unwrap();

    dispatch(&chain, &mut active, &target, 3, |i| message_call(i, 64))
        .await
        .unwrap();

    let assignment = assign_call(&mut stale, &target, 0, message_call(0, 64));
    let outcome = fire(&chain, assignment, Instant::now()).await;
    let failure = outcome.failure().expect("stale nonce must be rejected");
    assert_eq!(failure.kind, FailureKind::NonceConflict);
}
