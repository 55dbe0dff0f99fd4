#[allow(unused)]
use utils::*;

use omega_bench::prelude::*;
use omega_bench::scenario;

#[tokio::test]
async fn end_to_end_report_round_trips_through_json() -> anyhow::Result<()> {
    init();
    let chain = fast_chain();
    let mut pool = pool_of(4);
    let messaging = Address::new(MESSAGING);
    let messaging_evm = Address::new(MESSAGING_EVM);

    let sequential = scenario::sequential::run(
        &chain,
        &mut pool,
        &messaging,
        &SequentialConfig {
            iterations: 5,
            ..Default::default()
        },
    )
    .await?;
    let concurrent = scenario::concurrent::run(
        &chain,
        &mut pool,
        &messaging,
        &ConcurrentConfig {
            burst_size: 12,
            ..Default::default()
        },
    )
    .await?;
    let comparative = scenario::comparative::run(
        &chain,
        &mut pool,
        &messaging,
        &messaging_evm,
        &ComparativeConfig::default(),
    )
    .await?;

    let report = Report::new()
        .with_result(sequential)
        .with_result(concurrent)
        .with_result(comparative.favored)
        .with_result(comparative.baseline)
        .with_comparative(comparative.verdict);

    let path = std::env::temp_dir().join("omega-bench-report.json");
    report.write_json(&path)?;
    let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    std::fs::remove_file(&path)?;

    assert_eq!(parsed["results"].as_array().map(Vec::len), Some(4));
    assert_eq!(parsed["passed"], serde_json::json!(report.passed));
    assert!(parsed["targets"]
        .as_array()
        .is_some_and(|t| t.iter().any(|v| v == MESSAGING)));

    // Gas figures travel as decimal strings, never JSON numbers.
    let gas = &parsed["results"][0]["gas"];
    assert!(gas["total"].is_string());
    assert!(gas["average"].is_string());
    let verdict = &parsed["comparative"];
    assert!(verdict["favored_avg_gas"].is_string());
    assert!(verdict["advantage_pct"].is_number());

    Ok(())
}

#[tokio::test]
async fn rendered_table_carries_every_scenario_row() -> anyhow::Result<()> {
    init();
    let chain = fast_chain();
    let mut pool = pool_of(2);
    let messaging = Address::new(MESSAGING);

    let sequential = scenario::sequential::run(
        &chain,
        &mut pool,
        &messaging,
        &SequentialConfig {
            iterations: 4,
            ..Default::default()
        },
    )
    .await?;
    let sweep = scenario::payload_sweep::run(
        &chain,
        &mut pool,
        &messaging,
        &SweepConfig {
            calls_per_tier: 2,
            ..Default::default()
        },
    )
    .await?;

    let report = Report::new().with_result(sequential).with_result(sweep);
    let mut out = Vec::new();
    report.render(&mut out)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("sequential"));
    assert!(text.contains("payload_sweep"));
    assert!(text.contains("overall: PASS"));
    Ok(())
}
