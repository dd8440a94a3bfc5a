//! Pre-run checks
//!
//! Every check runs, so a single invocation reports all problems at once.
//! Nothing here spawns the program.

use std::path::{Path, PathBuf};

use crate::common::{paths, Error, PreflightProblem, Result};
use crate::harness::{fixture_name, RunConfig};

/// Validate a candidate config and make its program path absolute
pub fn validate(candidate: RunConfig) -> Result<RunConfig> {
    let mut problems = Vec::new();
    let shown = candidate.program.display().to_string();
    let program = resolve_program(&candidate.program);

    if !program.is_file() {
        problems.push(PreflightProblem::ProgramNotFile(shown));
    } else if let Some(problem) = runnable_problem(&program, shown) {
        problems.push(problem);
    }

    let directory = candidate.directory.display().to_string();
    if !candidate.directory.is_dir() {
        problems.push(PreflightProblem::NotADirectory(directory.clone()));
    }

    if candidate.start > candidate.end {
        problems.push(PreflightProblem::InvertedRange {
            start: candidate.start,
            end: candidate.end,
        });
    }

    let first = fixture_name(candidate.start, &candidate.input_suffix);
    if !candidate.directory.join(&first).is_file() {
        problems.push(PreflightProblem::MissingFixture {
            file: first,
            directory: directory.clone(),
        });
    }

    let last = fixture_name(candidate.end, &candidate.output_suffix);
    if !candidate.directory.join(&last).is_file() {
        problems.push(PreflightProblem::MissingFixture {
            file: last,
            directory,
        });
    }

    if !problems.is_empty() {
        tracing::debug!(count = problems.len(), "pre-run checks failed");
        return Err(Error::Preflight(problems));
    }

    Ok(RunConfig {
        program: paths::absolute(&program)?,
        ..candidate
    })
}

/// Look up bare program names on `PATH` unless they name a local file
fn resolve_program(program: &Path) -> PathBuf {
    if program.is_file() || program.components().count() != 1 {
        return program.to_path_buf();
    }
    match which::which(program) {
        Ok(found) => {
            tracing::debug!(
                program = %program.display(),
                found = %found.display(),
                "resolved from PATH"
            );
            found
        }
        Err(_) => program.to_path_buf(),
    }
}

#[cfg(windows)]
fn runnable_problem(program: &Path, shown: String) -> Option<PreflightProblem> {
    if is_exe(program) {
        None
    } else {
        Some(PreflightProblem::NotRunnableOnWindows(shown))
    }
}

#[cfg(unix)]
fn runnable_problem(program: &Path, shown: String) -> Option<PreflightProblem> {
    use std::os::unix::fs::PermissionsExt;

    let executable = std::fs::metadata(program)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false);
    if is_exe(program) || !executable {
        Some(PreflightProblem::NotRunnableOnUnix(shown))
    } else {
        None
    }
}

#[cfg(not(any(unix, windows)))]
fn runnable_problem(_program: &Path, _shown: String) -> Option<PreflightProblem> {
    None
}

fn is_exe(program: &Path) -> bool {
    program
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("exe"))
        .unwrap_or(false)
}
