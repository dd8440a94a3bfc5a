//! Per-test outcomes and run statistics

use std::time::Duration;

/// How a single test ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    /// Killed by the configured timeout; counts as a failure
    TimedOut,
}

/// Recorded result of one test case
#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub index: u32,
    pub verdict: Verdict,
    pub elapsed: Duration,
    /// Annotated diff lines, present only for failures with a diff
    pub diff: Option<Vec<String>>,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Aggregates over a finished run
///
/// Timing aggregates cover passing tests only and are `None` when
/// nothing passed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    pub total: usize,
    pub passed: usize,
    pub average_secs: Option<f64>,
    pub max_secs: Option<f64>,
}

impl RunStatistics {
    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Collects outcomes in the order tests ran
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    outcomes: Vec<TestOutcome>,
}

impl StatsAccumulator {
    pub fn record(&mut self, outcome: TestOutcome) {
        self.outcomes.push(outcome);
    }

    /// Accumulator with room for `capacity` outcomes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub fn finalize(&self) -> RunStatistics {
        let passed: Vec<f64> = self
            .outcomes
            .iter()
            .filter(|o| o.passed())
            .map(TestOutcome::elapsed_secs)
            .collect();

        let average_secs = if passed.is_empty() {
            None
        } else {
            Some(passed.iter().sum::<f64>() / passed.len() as f64)
        };
        let max_secs = passed.iter().copied().reduce(f64::max);

        RunStatistics {
            total: self.outcomes.len(),
            passed: passed.len(),
            average_secs,
            max_secs,
        }
    }

    /// Hand the recorded outcomes over to the caller
    pub fn into_outcomes(self) -> Vec<TestOutcome> {
        self.outcomes
    }
}
