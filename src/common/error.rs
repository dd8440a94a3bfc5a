//! Error types for gorpretest
//!
//! Mismatching output is not an error: it is a regular test outcome.
//! Everything here either stops the tool before the first test runs
//! (pre-flight problems, bad config) or aborts the run in progress.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gorpretest
#[derive(Error, Debug)]
pub enum Error {
    // === Pre-flight Errors ===
    #[error("{}", format_problems(.0))]
    Preflight(Vec<PreflightProblem>),

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === Run Errors ===
    #[error("TEST #{index}: failed to run '{}': {source}", program.display())]
    Spawn {
        index: u32,
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("TEST #{index}: failed to read fixture '{}': {source}", path.display())]
    Fixture {
        index: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

/// A single failed pre-flight check
///
/// Messages follow the wording users of the tool already know.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreflightProblem {
    #[error("Entered program ({0}) is not a file.")]
    ProgramNotFile(String),

    #[error("This program ({0}) isn't runnable from a Windows console.")]
    NotRunnableOnWindows(String),

    #[error("This program ({0}) isn't runnable from a Bash-like console.")]
    NotRunnableOnUnix(String),

    #[error("Entered path ({0}) is not a directory.")]
    NotADirectory(String),

    #[error("The start number ({start}) is greater than the end number ({end}).")]
    InvertedRange { start: u32, end: u32 },

    #[error("Couldn't find file {file} in /{directory}.")]
    MissingFixture { file: String, directory: String },
}

fn format_problems(problems: &[PreflightProblem]) -> String {
    let mut msg = String::from("Pre-run checks failed:");
    for problem in problems {
        msg.push_str("\n  - ");
        msg.push_str(&problem.to_string());
    }
    msg
}

impl Error {
    /// Create a spawn error for the test at `index`
    pub fn spawn(index: u32, program: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Spawn {
            index,
            program: program.into(),
            source,
        }
    }

    /// Create a fixture read error for the test at `index`
    pub fn fixture(index: u32, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Fixture {
            index,
            path: path.into(),
            source,
        }
    }
}
