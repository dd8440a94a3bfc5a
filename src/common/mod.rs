//! Common utilities shared by the CLI and the test harness

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, PreflightProblem, Result};
