//! Console report
//!
//! With colour off the text is exactly what scripts and scenario tests
//! match against; colour only wraps it in escape codes.

use std::io::Write;
use std::time::Duration;

use colored::{ColoredString, Colorize};

use super::stats::RunStatistics;

/// Separates the header, the tests and the final statistics
pub const DIVIDER: &str = "- ~ - ~ - ~ - ~ - ~ -";

/// Round to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Seconds rounded to `places` decimals, always with a fractional part
pub fn format_secs(secs: f64, places: i32) -> String {
    let text = round_to(secs, places).to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Writes the run report to any sink
pub struct Reporter<W> {
    out: W,
    color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn divider(&mut self) -> std::io::Result<()> {
        let line = self.paint(DIVIDER, |s| s.dimmed());
        writeln!(self.out, "{line}")
    }

    pub fn running(&mut self, index: u32) -> std::io::Result<()> {
        let line = self.paint(&format!(">> Running TEST #{index}..."), |s| s.cyan());
        writeln!(self.out, "\n{line}")?;
        self.out.flush()
    }

    pub fn passed(&mut self, index: u32, elapsed: Duration) -> std::io::Result<()> {
        let secs = format_secs(elapsed.as_secs_f64(), 3);
        let line = self.paint(&format!(">> TEST #{index} done in {secs}s!"), |s| s.green());
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    pub fn diff(&mut self, lines: &[String]) -> std::io::Result<()> {
        for line in lines {
            let painted = match line.as_bytes().first() {
                Some(b'-') => self.paint(line, |s| s.red()),
                Some(b'+') => self.paint(line, |s| s.green()),
                Some(b'?') => self.paint(line, |s| s.yellow()),
                _ => line.clone(),
            };
            write!(self.out, "{painted}")?;
        }
        Ok(())
    }

    /// Prompt shown while waiting for a failure to be acknowledged
    ///
    /// Left unterminated: the acknowledgment ends the line.
    pub fn failed_prompt(&mut self, index: u32, elapsed: Duration) -> std::io::Result<()> {
        let secs = format_secs(elapsed.as_secs_f64(), 3);
        let line = self.paint(&format!(">> TEST {index} ({secs}s) failed!"), |s| s.red().bold());
        write!(self.out, "{line}")?;
        self.out.flush()
    }

    pub fn timed_out_prompt(&mut self, index: u32, limit: Duration) -> std::io::Result<()> {
        let secs = format_secs(limit.as_secs_f64(), 3);
        let line = self.paint(&format!(">> TEST {index} timed out after {secs}s!"), |s| {
            s.red().bold()
        });
        write!(self.out, "{line}")?;
        self.out.flush()
    }

    pub fn end_line(&mut self) -> std::io::Result<()> {
        writeln!(self.out)
    }

    pub fn summary(&mut self, stats: &RunStatistics) -> std::io::Result<()> {
        writeln!(self.out)?;
        self.divider()?;

        let tally = format!("{}/{} TESTS passed!", stats.passed, stats.total);
        let tally = if stats.all_passed() {
            self.paint(&tally, |s| s.green().bold())
        } else {
            self.paint(&tally, |s| s.red().bold())
        };
        writeln!(self.out, "{tally}")?;

        writeln!(self.out, "\nRUNTIME STATISTICS")?;
        match (stats.average_secs, stats.max_secs) {
            (Some(average), Some(max)) => {
                writeln!(self.out, "Average: {} seconds", format_secs(average, 6))?;
                writeln!(self.out, "Max: {} seconds", format_secs(max, 6))?;
            }
            _ => {
                writeln!(self.out, "Average: N/A")?;
                writeln!(self.out, "Max: N/A")?;
            }
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
