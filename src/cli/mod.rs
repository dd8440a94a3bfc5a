//! CLI command handling
//!
//! Resolves settings from flags, the config file and built-in defaults,
//! runs the pre-run checks and hands a validated config to the harness.

pub mod preflight;
pub mod prompt;

use std::time::Duration;

use crate::commands::RunArgs;
use crate::common::config::Config;
use crate::common::Result;
use crate::harness::{
    default_output_suffix, AutoAcknowledge, Reporter, RunConfig, RunStatistics, StdinAcknowledger,
    TestRunLoop, DEFAULT_INPUT_SUFFIX,
};

/// Banner printed before anything else
pub fn banner() -> String {
    format!(
        "Gorpretest [{}] - A nutty taste test of running software.",
        env!("CARGO_PKG_VERSION")
    )
}

/// How an invocation ended, when it didn't fail outright
#[derive(Debug)]
pub enum Dispatch {
    /// The user answered "n" at the confirmation prompt
    Declined,
    Completed(RunStatistics),
}

/// Settings after applying flag > config file > default precedence
#[derive(Debug)]
pub struct Settings {
    pub config: RunConfig,
    pub confirm: bool,
    pub pause_on_failure: bool,
    pub color: bool,
}

/// Merge command-line arguments with the config file
pub fn resolve_settings(args: RunArgs, file: &Config) -> Settings {
    let (input_suffix, output_suffix) = match (args.input_suffix, args.output_suffix) {
        (Some(input), Some(output)) => (input, output),
        _ => (
            file.suffixes
                .input
                .clone()
                .unwrap_or_else(|| DEFAULT_INPUT_SUFFIX.to_string()),
            file.suffixes
                .output
                .clone()
                .unwrap_or_else(|| default_output_suffix().to_string()),
        ),
    };
    let timeout = args
        .timeout
        .or(file.run.timeout_secs)
        .map(Duration::from_secs);

    Settings {
        config: RunConfig::new(args.program, args.directory, args.start, args.end)
            .with_suffixes(input_suffix, output_suffix)
            .with_timeout(timeout),
        confirm: !args.yes && file.run.confirm,
        pause_on_failure: !args.no_pause && file.run.pause_on_failure,
        color: !args.no_color,
    }
}

/// Run the tool for one set of arguments
pub async fn dispatch(args: RunArgs) -> Result<Dispatch> {
    println!("{}", banner());
    println!();

    let file = Config::load()?;
    let settings = resolve_settings(args, &file);
    let config = preflight::validate(settings.config)?;

    println!("PRE-RUN CHECKS complete!");
    println!("{}", prompt::describe(&config));
    let mut stdin = StdinAcknowledger::new();
    if settings.confirm {
        if !prompt::confirm(&mut stdin).await? {
            println!("Aww, goodbye then. ;C");
            return Ok(Dispatch::Declined);
        }
        println!("Yum, yum~ >o<");
    }

    let reporter = Reporter::new(std::io::stdout(), settings.color);
    let summary = if settings.pause_on_failure {
        TestRunLoop::new(&config, reporter, stdin)
            .run()
            .await?
    } else {
        TestRunLoop::new(&config, reporter, AutoAcknowledge)
            .run()
            .await?
    };

    Ok(Dispatch::Completed(summary.statistics))
}
