//! Fixture file naming
//!
//! Fixtures live at `<directory>/<index padded to four digits><suffix>`,
//! e.g. `samples/0001_in.txt` and `samples/0001_out.txt`.

use std::path::{Path, PathBuf};

/// File name for fixture `index` with the given suffix
pub fn fixture_name(index: u32, suffix: &str) -> String {
    format!("{index:04}{suffix}")
}

/// Paths of the input and expected-output fixtures for one test
pub fn resolve(
    directory: &Path,
    index: u32,
    input_suffix: &str,
    output_suffix: &str,
) -> (PathBuf, PathBuf) {
    (
        directory.join(fixture_name(index, input_suffix)),
        directory.join(fixture_name(index, output_suffix)),
    )
}

/// One indexed pair of fixtures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub index: u32,
    /// Fed to the program's stdin
    pub input: PathBuf,
    /// Compared against the program's stdout
    pub expected: PathBuf,
}

impl TestCase {
    pub fn resolve(directory: &Path, index: u32, input_suffix: &str, output_suffix: &str) -> Self {
        let (input, expected) = resolve(directory, index, input_suffix, output_suffix);
        Self {
            index,
            input,
            expected,
        }
    }
}
