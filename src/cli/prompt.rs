//! Last stop before the tests start

use std::io::Write;

use tokio::io::AsyncBufRead;

use crate::common::Result;
use crate::harness::{fixture_name, RunConfig, StdinAcknowledger};

/// One-line description of what is about to run
pub fn describe(config: &RunConfig) -> String {
    format!(
        "About to run {} with files ({} // {}) from /{}.",
        config.program.display(),
        fixture_name(config.start, &config.input_suffix),
        fixture_name(config.end, &config.output_suffix),
        config.directory.display()
    )
}

/// Anything but `n`/`N` goes ahead
pub fn accepts(answer: &str) -> bool {
    !answer
        .trim_end_matches(&['\r', '\n'][..])
        .eq_ignore_ascii_case("n")
}

/// Ask whether to start the run; a closed stdin counts as "no"
pub async fn confirm<R: AsyncBufRead + Unpin>(input: &mut StdinAcknowledger<R>) -> Result<bool> {
    print!("Continue? [Y/n] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    let read = input.read_line(&mut answer).await?;
    if read == 0 {
        tracing::debug!("stdin closed at confirmation prompt");
        println!();
        return Ok(false);
    }
    Ok(accepts(&answer))
}
