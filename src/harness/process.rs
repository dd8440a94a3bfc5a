//! Running the program under test
//!
//! One child process per test: the input fixture becomes its stdin and its
//! stdout is captured in full. Stderr is drained but never compared.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::time::timeout;

use crate::common::{Error, Result};

/// Captured result of a finished child process
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Raw stdout bytes, not decoded
    pub stdout: Vec<u8>,
    /// Wall-clock time from spawn until the child exited and stdout was drained
    pub elapsed: Duration,
    /// Exit code, `None` when killed by a signal
    pub exit_code: Option<i32>,
}

/// How a single execution ended
#[derive(Debug, Clone)]
pub enum Execution {
    Finished(RunOutput),
    /// Killed after exceeding the configured timeout
    TimedOut(Duration),
}

/// Spawns the program under test
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kill children that run longer than `limit`; `None` waits forever
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Run the program with `input` as stdin
    ///
    /// `index` only labels errors. A missing input file or a program that
    /// can't be spawned is an error; a non-zero exit status is not.
    pub async fn run(&self, index: u32, input: &Path) -> Result<Execution> {
        let stdin = std::fs::File::open(input).map_err(|e| Error::fixture(index, input, e))?;

        let mut command = Command::new(&self.program);
        command
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let started = Instant::now();
        let child = command
            .spawn()
            .map_err(|e| Error::spawn(index, &self.program, e))?;
        // Releases the parent's handle on the input fixture
        drop(command);

        let output = match self.timeout {
            None => child.wait_with_output().await,
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(output) => output,
                Err(_) => {
                    tracing::debug!(index, ?limit, "test timed out, child killed");
                    return Ok(Execution::TimedOut(limit));
                }
            },
        }
        .map_err(|e| Error::spawn(index, &self.program, e))?;
        let elapsed = started.elapsed();

        tracing::debug!(
            index,
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            elapsed_secs = elapsed.as_secs_f64(),
            "child exited"
        );
        if !output.status.success() {
            tracing::debug!(index, code = ?output.status.code(), "program exited unsuccessfully");
        }

        Ok(Execution::Finished(RunOutput {
            stdout: output.stdout,
            elapsed,
            exit_code: output.status.code(),
        }))
    }
}
