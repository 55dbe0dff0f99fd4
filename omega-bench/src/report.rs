//! Report rendering and persistence.
//!
//! One tabular row per (scenario, target) pair, a verdict section for
//! comparative runs, and a machine-readable JSON artifact in which every
//! large gas integer is a decimal string. Writing the artifact is the only
//! side effect in the crate.

use omega_bench_core::{ComparativeVerdict, ScenarioResult};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Unix timestamp in milliseconds at report creation.
    pub generated_at_ms: u64,
    pub targets: Vec<String>,
    pub results: Vec<ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparative: Option<ComparativeVerdict>,
    pub passed: bool,
}

impl Report {
    pub fn new() -> Self {
        let generated_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            generated_at_ms,
            targets: Vec::new(),
            results: Vec::new(),
            comparative: None,
            passed: true,
        }
    }

    pub fn with_result(mut self, result: ScenarioResult) -> Self {
        if !self.targets.contains(&result.target) {
            self.targets.push(result.target.clone());
        }
        self.passed &= result.passed;
        self.results.push(result);
        self
    }

    pub fn with_comparative(mut self, verdict: ComparativeVerdict) -> Self {
        self.passed &= verdict.passed;
        self.comparative = Some(verdict);
        self
    }

    /// Render the human-readable table and verdict section.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{:<14} {:<14} {:>5} {:>5} {:>9} {:>12} {:>10}  {}",
            "scenario", "target", "ok", "fail", "tps", "avg gas", "elapsed", "verdict"
        )?;
        writeln!(out, "{}", "-".repeat(86))?;
        for result in &self.results {
            writeln!(
                out,
                "{:<14} {:<14} {:>5} {:>5} {:>9.2} {:>12} {:>10}  {}",
                result.scenario,
                truncate(&result.target, 14),
                result.succeeded,
                result.failed,
                result.throughput,
                result
                    .gas
                    .map(|g| g.average.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                humantime::format_duration(round_ms(result.elapsed_ms)).to_string(),
                if result.passed { "PASS" } else { "FAIL" },
            )?;
        }

        if let Some(verdict) = &self.comparative {
            writeln!(out)?;
            writeln!(out, "comparative verdict")?;
            writeln!(out, "  favored  {}", verdict.favored_target)?;
            writeln!(out, "  baseline {}", verdict.baseline_target)?;
            for row in &verdict.per_size {
                writeln!(
                    out,
                    "  burst {:>4}: favored {} vs baseline {}",
                    row.burst_size,
                    gas_or_dash(row.favored_avg_gas),
                    gas_or_dash(row.baseline_avg_gas),
                )?;
            }
            match (verdict.advantage_pct, verdict.discount_pct) {
                (Some(advantage), Some(discount)) => writeln!(
                    out,
                    "  advantage {advantage:+.1}% (discount {discount:.1}%) -> {}",
                    if verdict.passed { "PASS" } else { "FAIL" },
                )?,
                _ => writeln!(out, "  advantage undefined (no confirmed calls) -> FAIL")?,
            }
        }

        writeln!(out)?;
        writeln!(out, "overall: {}", if self.passed { "PASS" } else { "FAIL" })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("report serialization is infallible")
    }

    /// Persist the JSON artifact.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        info!(path = %path.display(), "report artifact written");
        Ok(())
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

fn gas_or_dash(gas: Option<u128>) -> String {
    gas.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}..", &s[..max - 2])
    }
}

// humantime renders sub-ms noise verbatim; second-level precision reads
// better in a table.
fn round_ms(elapsed_ms: u64) -> Duration {
    Duration::from_millis(elapsed_ms - elapsed_ms % 100)
}
