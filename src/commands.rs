//! CLI argument definitions

use clap::Args;
use std::path::PathBuf;

/// Extra help text explaining how fixture files are named
pub const FILE_NAME_HELP: &str = "\
FILE NAME FORMAT
  <DIRECTORY>/<NUMBER ZERO-PADDED TO FOUR><SUFFIX>
  e.g. gorpretest a.out sample 1 11
       sample/0001_in.txt -- sample/0011_out.txt

Defaults can be set in config.toml in the gorpretest config directory:
  [suffixes] input / output, [run] timeout_secs / pause_on_failure / confirm";

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Compiled program (or any other executable) to test
    pub program: PathBuf,

    /// Directory to pull the inputs and expected outputs from
    pub directory: PathBuf,

    /// The number the tests should start at
    pub start: u32,

    /// The number the tests should end at
    pub end: u32,

    /// Suffix of the input files [default: "_in.txt"]
    #[arg(requires = "output_suffix")]
    pub input_suffix: Option<String>,

    /// Suffix of the expected output files [default: "_out_win.txt" on Windows, "_out.txt" elsewhere]
    pub output_suffix: Option<String>,

    /// Skip the "Continue? [Y/n]" confirmation
    #[arg(long, short)]
    pub yes: bool,

    /// Don't wait for Enter after a failed test
    #[arg(long)]
    pub no_pause: bool,

    /// Kill a test after this many seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Log harness internals to stderr
    #[arg(long)]
    pub verbose: bool,
}
