//! Load-testing harness for contract endpoints: multi-account burst dispatch
//! with latency, throughput, and gas aggregation.
//!
//! The harness issues signed state-changing calls against one or more
//! deployed contract targets through the [`client::ChainClient`] seam, waits
//! for confirmation, and produces statistical summaries with pass/fail
//! verdicts against fixed performance targets.
//!
//! Concurrency is cooperative: a burst is assigned to (account, nonce) pairs
//! in a single-threaded loop, then every call is fired and awaited together
//! with settle-all semantics. Failures are data, not errors; only a
//! setup-phase failure aborts a scenario.
//!
//! ```no_run
//! use omega_bench::prelude::*;
//!
//! # async fn example(client: &dyn ChainClient, mut pool: AccountPool) -> Result<(), HarnessError> {
//! let target = Address::new("0x11aa...");
//! let result = scenario::concurrent::run(
//!     client,
//!     &mut pool,
//!     &target,
//!     &ConcurrentConfig::default(),
//! )
//! .await?;
//!
//! let report = Report::new().with_result(result);
//! report.render(&mut std::io::stdout()).expect("stdout render");
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod aggregate;
pub mod client;
pub mod dispatcher;
pub mod payload;
pub mod report;
pub mod scenario;

mod error;

pub use error::HarnessError;
pub use omega_bench_core as core;

pub mod prelude {
    pub use crate::accounts::{Account, AccountPool, SigningKey};
    pub use crate::client::{Address, CallData, ChainClient};
    pub use crate::report::Report;
    pub use crate::scenario;
    pub use crate::HarnessError;
    pub use omega_bench_core::{
        ComparativeConfig, ConcurrentConfig, ScenarioResult, SequentialConfig, SustainedConfig,
        SweepConfig, Workload,
    };
}
