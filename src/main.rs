//! Gorpretest - A nutty taste test of running software
//!
//! Runs a program against numbered input fixtures and compares its
//! standard output byte-for-byte with the expected output fixtures.

use clap::{ArgAction, Parser};
use gorpretest::cli::{self, Dispatch};
use gorpretest::commands::{RunArgs, FILE_NAME_HELP};
use gorpretest::common::logging;

#[derive(Parser)]
#[command(
    name = "gorpretest",
    about = "A nutty taste test of running software",
    version,
    disable_version_flag = true,
    after_help = FILE_NAME_HELP
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.run.verbose);

    match cli::dispatch(cli.run).await {
        Ok(Dispatch::Declined) => {}
        Ok(Dispatch::Completed(stats)) => {
            if !stats.all_passed() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
