//! Gorpretest - A nutty taste test of running software
//!
//! This library runs an executable against numbered fixture pairs, compares
//! its standard output with the expected output byte-for-byte and reports
//! pass/fail plus timing statistics.

pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use harness::{RunConfig, RunStatistics, TestOutcome, TestRunLoop, Verdict};
