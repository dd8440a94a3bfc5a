//! Run configuration handed to the harness
//!
//! A `RunConfig` is only ever built after pre-flight validation, so the
//! harness can take every field at face value.

use std::path::PathBuf;
use std::time::Duration;

/// Default suffix of the stdin fixture, on every platform
pub const DEFAULT_INPUT_SUFFIX: &str = "_in.txt";

/// Default suffix of the expected-output fixture on Windows
pub const WINDOWS_OUTPUT_SUFFIX: &str = "_out_win.txt";

/// Default suffix of the expected-output fixture everywhere else
pub const UNIX_OUTPUT_SUFFIX: &str = "_out.txt";

/// Expected-output suffix for the host platform
pub fn default_output_suffix() -> &'static str {
    if cfg!(windows) {
        WINDOWS_OUTPUT_SUFFIX
    } else {
        UNIX_OUTPUT_SUFFIX
    }
}

/// Everything the run loop needs for one invocation
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Absolute path to the program under test
    pub program: PathBuf,
    /// Directory holding the fixtures
    pub directory: PathBuf,
    /// First test index, inclusive
    pub start: u32,
    /// Last test index, inclusive
    pub end: u32,
    /// Suffix of the stdin fixture
    pub input_suffix: String,
    /// Suffix of the expected-output fixture
    pub output_suffix: String,
    /// Kill a test that runs longer than this; `None` waits forever
    pub timeout: Option<Duration>,
}

impl RunConfig {
    /// Config with the default suffixes and no timeout
    pub fn new(
        program: impl Into<PathBuf>,
        directory: impl Into<PathBuf>,
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            program: program.into(),
            directory: directory.into(),
            start,
            end,
            input_suffix: DEFAULT_INPUT_SUFFIX.to_string(),
            output_suffix: default_output_suffix().to_string(),
            timeout: None,
        }
    }

    /// Replace both fixture suffixes
    pub fn with_suffixes(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.input_suffix = input.into();
        self.output_suffix = output.into();
        self
    }

    /// Set the per-test timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of tests in the range
    pub fn total(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }
}
