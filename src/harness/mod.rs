//! Fixture test harness
//!
//! Runs a program once per numbered fixture pair, feeding the input
//! fixture to its stdin and comparing its stdout byte-for-byte against
//! the expected-output fixture.

mod compare;
mod config;
mod fixture;
mod process;
mod report;
mod runner;
mod stats;

pub use compare::{compare, line_diff, ComparisonResult};
pub use config::*;
pub use fixture::{fixture_name, resolve, TestCase};
pub use process::{Execution, ProcessRunner, RunOutput};
pub use report::{format_secs, round_to, Reporter, DIVIDER};
pub use runner::{Acknowledge, AutoAcknowledge, RunSummary, StdinAcknowledger, TestRunLoop};
pub use stats::{RunStatistics, StatsAccumulator, TestOutcome, Verdict};
