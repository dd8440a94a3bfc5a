//! Test run loop
//!
//! Runs every index from `start` to `end` in order, one child process at a
//! time. A failed test prints its diff and then blocks until the failure is
//! acknowledged; only then does the next test start. Spawn failures and
//! unreadable fixtures abort the whole run.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::common::{Error, Result};

use super::compare::compare;
use super::config::RunConfig;
use super::fixture::TestCase;
use super::process::{Execution, ProcessRunner};
use super::report::Reporter;
use super::stats::{RunStatistics, StatsAccumulator, TestOutcome, Verdict};

/// Checkpoint the loop waits on after every failed test
#[async_trait]
pub trait Acknowledge: Send {
    /// Return once the failure of test `index` has been acknowledged
    async fn acknowledge(&mut self, index: u32) -> Result<()>;

    /// Whether acknowledging already ends the prompt line (a user pressing Enter)
    fn ends_prompt_line(&self) -> bool {
        true
    }
}

#[async_trait]
impl<'a, T: Acknowledge + ?Sized> Acknowledge for &'a mut T {
    async fn acknowledge(&mut self, index: u32) -> Result<()> {
        (**self).acknowledge(index).await
    }

    fn ends_prompt_line(&self) -> bool {
        (**self).ends_prompt_line()
    }
}

/// Waits for the user to press Enter
///
/// Owns the process's only buffered stdin reader. Every prompt of a run
/// reads through it so no buffered line is dropped between prompts.
pub struct StdinAcknowledger<R = BufReader<Stdin>> {
    reader: R,
}

impl StdinAcknowledger {
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for StdinAcknowledger {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncBufRead + Unpin> StdinAcknowledger<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Read one line into `buf`; returns 0 once input is closed
    pub async fn read_line(&mut self, buf: &mut String) -> Result<usize> {
        Ok(self.reader.read_line(buf).await?)
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Acknowledge for StdinAcknowledger<R> {
    async fn acknowledge(&mut self, index: u32) -> Result<()> {
        let mut line = String::new();
        let read = self.read_line(&mut line).await?;
        if read == 0 {
            tracing::debug!(index, "stdin closed, continuing");
        }
        Ok(())
    }
}

/// Acknowledges every failure immediately, for unattended runs
#[derive(Debug, Default)]
pub struct AutoAcknowledge;

#[async_trait]
impl Acknowledge for AutoAcknowledge {
    async fn acknowledge(&mut self, _index: u32) -> Result<()> {
        Ok(())
    }

    fn ends_prompt_line(&self) -> bool {
        false
    }
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunSummary {
    pub statistics: RunStatistics,
    /// One entry per index, in index order
    pub outcomes: Vec<TestOutcome>,
}

/// Drives the tests of one invocation
pub struct TestRunLoop<'a, W, A> {
    config: &'a RunConfig,
    runner: ProcessRunner,
    reporter: Reporter<W>,
    acknowledger: A,
    stats: StatsAccumulator,
}

impl<'a, W: Write, A: Acknowledge> TestRunLoop<'a, W, A> {
    pub fn new(config: &'a RunConfig, reporter: Reporter<W>, acknowledger: A) -> Self {
        Self {
            config,
            runner: ProcessRunner::new(&config.program).with_timeout(config.timeout),
            reporter,
            acknowledger,
            stats: StatsAccumulator::with_capacity(config.total()),
        }
    }

    /// Run every test in the range and print the final statistics
    pub async fn run(mut self) -> Result<RunSummary> {
        let config = self.config;
        tracing::debug!(
            program = %config.program.display(),
            directory = %config.directory.display(),
            start = config.start,
            end = config.end,
            "starting run"
        );

        self.reporter.divider()?;

        for index in config.start..=config.end {
            let case = TestCase::resolve(
                &config.directory,
                index,
                &config.input_suffix,
                &config.output_suffix,
            );
            let outcome = self.run_case(&case).await?;
            self.stats.record(outcome);
        }

        let statistics = self.stats.finalize();
        self.reporter.summary(&statistics)?;

        Ok(RunSummary {
            statistics,
            outcomes: self.stats.into_outcomes(),
        })
    }

    async fn run_case(&mut self, case: &TestCase) -> Result<TestOutcome> {
        let index = case.index;
        tracing::debug!(
            index,
            input = %case.input.display(),
            expected = %case.expected.display(),
            "running test"
        );
        self.reporter.running(index)?;

        let output = match self.runner.run(index, &case.input).await? {
            Execution::Finished(output) => output,
            Execution::TimedOut(limit) => {
                self.reporter.timed_out_prompt(index, limit)?;
                self.wait_for_acknowledgment(index).await?;
                return Ok(TestOutcome {
                    index,
                    verdict: Verdict::TimedOut,
                    elapsed: limit,
                    diff: None,
                });
            }
        };

        let expected =
            std::fs::read(&case.expected).map_err(|e| Error::fixture(index, &case.expected, e))?;
        let comparison = compare(&output.stdout, &expected);

        if comparison.equal {
            self.reporter.passed(index, output.elapsed)?;
            return Ok(TestOutcome {
                index,
                verdict: Verdict::Passed,
                elapsed: output.elapsed,
                diff: None,
            });
        }

        tracing::debug!(index, "output differs from expected");
        if let Some(lines) = &comparison.diff {
            self.reporter.diff(lines)?;
        }
        self.reporter.failed_prompt(index, output.elapsed)?;
        self.wait_for_acknowledgment(index).await?;

        Ok(TestOutcome {
            index,
            verdict: Verdict::Failed,
            elapsed: output.elapsed,
            diff: comparison.diff,
        })
    }

    async fn wait_for_acknowledgment(&mut self, index: u32) -> Result<()> {
        self.acknowledger.acknowledge(index).await?;
        if !self.acknowledger.ends_prompt_line() {
            self.reporter.end_line()?;
        }
        Ok(())
    }
}
