//! End-to-end tests for the gorpretest binary
//!
//! These tests verify the complete workflow by:
//! 1. Writing numbered fixture pairs into a temporary directory
//! 2. Running gorpretest against `cat`, which echoes stdin unchanged
//! 3. Checking the report, the exit status and the pre-run checks

#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Test context with paths and cleanup
struct TestContext {
    /// Temporary directory for this test, removed on drop
    temp_dir: tempfile::TempDir,
    /// Fixture directory inside `temp_dir`
    fixtures_dir: PathBuf,
    /// Stand-in for HOME and XDG_CONFIG_HOME
    config_dir: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let fixtures_dir = temp_dir.path().join("sample");
        let config_dir = temp_dir.path().join("config");
        fs::create_dir_all(&fixtures_dir).expect("Failed to create fixture dir");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            fixtures_dir,
            config_dir,
        }
    }

    /// Write `<index>_in.txt` and `<index>_out.txt`
    fn fixture(&self, index: u32, input: &str, expected: &str) {
        fs::write(self.fixtures_dir.join(format!("{index:04}_in.txt")), input)
            .expect("Failed to write input fixture");
        fs::write(self.fixtures_dir.join(format!("{index:04}_out.txt")), expected)
            .expect("Failed to write expected fixture");
    }

    /// Create a config file for the test
    fn create_config(&self, content: &str) {
        let config_path = self.config_dir.join("gorpretest").join("config.toml");
        fs::create_dir_all(config_path.parent().unwrap()).expect("Failed to create config dir");
        fs::write(&config_path, content).expect("Failed to write config");
    }

    fn dir(&self) -> &str {
        self.fixtures_dir.to_str().unwrap()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gorpretest"));
        cmd.args(args)
            .current_dir(self.temp_dir.path())
            .env("XDG_CONFIG_HOME", &self.config_dir)
            .env("HOME", &self.config_dir)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run gorpretest with stdin closed
    fn run(&self, args: &[&str]) -> RunOutput {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to run gorpretest");
        RunOutput::from(output)
    }

    /// Run gorpretest feeding `stdin` to it
    fn run_with_stdin(&self, args: &[&str], stdin: &str) -> RunOutput {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn gorpretest");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");
        let output = child.wait_with_output().expect("Failed to wait for gorpretest");
        RunOutput::from(output)
    }
}

/// Output from a gorpretest run
#[derive(Debug)]
struct RunOutput {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

impl From<std::process::Output> for RunOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        }
    }
}

fn unattended<'a>(program: &'a str, dir: &'a str, start: &'a str, end: &'a str) -> Vec<&'a str> {
    vec![program, dir, start, end, "--yes", "--no-pause", "--no-color"]
}

/// Diff report lines carrying `marker`, skipping the divider
fn diff_lines<'a>(stdout: &'a str, marker: &str) -> Vec<&'a str> {
    stdout
        .lines()
        .filter(|l| l.starts_with(marker) && !l.starts_with("- ~"))
        .collect()
}

// ============== Tests ==============

#[test]
fn test_all_cases_pass() {
    let ctx = TestContext::new();
    for i in 1..=3 {
        ctx.fixture(i, &format!("line {i}\nmore\n"), &format!("line {i}\nmore\n"));
    }

    let out = ctx.run(&unattended("cat", ctx.dir(), "1", "3"));

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    for i in 1..=3 {
        assert!(out.stdout.contains(&format!(">> Running TEST #{i}...")));
        assert!(out.stdout.contains(&format!(">> TEST #{i} done in ")));
    }
    assert!(out.stdout.contains("3/3 TESTS passed!"));
    assert!(out.stdout.contains("RUNTIME STATISTICS"));
    assert!(out.stdout.contains("Average: "));
    assert!(out.stdout.contains("Max: "));
    assert!(diff_lines(&out.stdout, "+ ").is_empty());
    assert!(diff_lines(&out.stdout, "- ").is_empty());
}

#[test]
fn test_extra_expected_line_fails_one_case() {
    let ctx = TestContext::new();
    ctx.fixture(1, "a\n", "a\n");
    ctx.fixture(2, "b\n", "b\nonly expected\n");
    ctx.fixture(3, "c\n", "c\n");

    let out = ctx.run(&unattended("cat", ctx.dir(), "1", "3"));

    assert_eq!(out.code, Some(1));
    assert_eq!(diff_lines(&out.stdout, "+ "), vec!["+ only expected"]);
    assert!(out.stdout.contains(">> TEST 2 ("));
    assert!(out.stdout.contains("s) failed!"));
    assert!(out.stdout.contains(">> TEST #3 done in "));
    assert!(out.stdout.contains("2/3 TESTS passed!"));
}

#[test]
fn test_missing_trailing_newline_fails() {
    let ctx = TestContext::new();
    ctx.fixture(1, "no newline", "no newline\n");

    let out = ctx.run(&unattended("cat", ctx.dir(), "1", "1"));

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("0/1 TESTS passed!"));
    assert!(out.stdout.contains("Average: N/A"));
}

#[test]
fn test_inverted_range_runs_nothing() {
    let ctx = TestContext::new();
    ctx.fixture(1, "x\n", "x\n");
    ctx.fixture(3, "x\n", "x\n");

    let out = ctx.run(&unattended("cat", ctx.dir(), "3", "1"));

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("greater than the end number"));
    assert!(!out.stdout.contains("Running TEST"));
}

#[test]
fn test_missing_boundary_fixture_is_reported() {
    let ctx = TestContext::new();
    ctx.fixture(1, "x\n", "x\n");

    let out = ctx.run(&unattended("cat", ctx.dir(), "1", "5"));

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Couldn't find file 0005_out.txt"));
    assert!(!out.stdout.contains("Running TEST"));
}

#[test]
fn test_missing_program_is_reported() {
    let ctx = TestContext::new();
    ctx.fixture(1, "x\n", "x\n");

    let out = ctx.run(&unattended("./no-such-program", ctx.dir(), "1", "1"));

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("is not a file"));
}

#[test]
fn test_custom_suffixes() {
    let ctx = TestContext::new();
    for i in [7, 8] {
        fs::write(ctx.fixtures_dir.join(format!("{i:04}.in")), "same\n").unwrap();
        fs::write(ctx.fixtures_dir.join(format!("{i:04}.ans")), "same\n").unwrap();
    }

    let mut args = unattended("cat", ctx.dir(), "7", "8");
    args.extend([".in", ".ans"]);
    let out = ctx.run(&args);

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("2/2 TESTS passed!"));
}

#[test]
fn test_config_file_suffixes() {
    let ctx = TestContext::new();
    ctx.create_config("[suffixes]\ninput = \".in\"\noutput = \".ans\"\n");
    fs::write(ctx.fixtures_dir.join("0001.in"), "x\n").unwrap();
    fs::write(ctx.fixtures_dir.join("0001.ans"), "x\n").unwrap();

    let out = ctx.run(&unattended("cat", ctx.dir(), "1", "1"));

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("1/1 TESTS passed!"));
}

#[test]
fn test_failure_waits_for_enter() {
    let ctx = TestContext::new();
    ctx.fixture(1, "a\n", "b\n");
    ctx.fixture(2, "c\n", "c\n");

    let out = ctx.run_with_stdin(&["cat", ctx.dir(), "1", "2", "--yes", "--no-color"], "\n");

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains(">> TEST 1 ("));
    assert!(out.stdout.contains(">> TEST #2 done in "));
    assert!(out.stdout.contains("1/2 TESTS passed!"));
}

#[test]
fn test_declining_confirmation_runs_nothing() {
    let ctx = TestContext::new();
    ctx.fixture(1, "x\n", "x\n");

    let out = ctx.run_with_stdin(&["cat", ctx.dir(), "1", "1", "--no-color"], "n\n");

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("PRE-RUN CHECKS complete!"));
    assert!(out.stdout.contains("Continue? [Y/n] "));
    assert!(out.stdout.contains("Aww, goodbye then. ;C"));
    assert!(!out.stdout.contains("Running TEST"));
}

#[test]
fn test_accepting_confirmation_runs_tests() {
    let ctx = TestContext::new();
    ctx.fixture(1, "x\n", "x\n");

    let out = ctx.run_with_stdin(&["cat", ctx.dir(), "1", "1", "--no-color"], "\n");

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Yum, yum~ >o<"));
    assert!(out.stdout.contains("1/1 TESTS passed!"));
}

#[test]
fn test_timeout_flag() {
    let ctx = TestContext::new();
    ctx.fixture(1, "sleep 5\n", "");
    ctx.fixture(2, "echo hi\n", "hi\n");

    let mut args = unattended("sh", ctx.dir(), "1", "2");
    args.extend(["--timeout", "1"]);
    let out = ctx.run(&args);

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains(">> TEST 1 timed out after 1.0s!"));
    assert!(out.stdout.contains("1/2 TESTS passed!"));
}

#[test]
fn test_help_explains_file_names() {
    let ctx = TestContext::new();
    let out = ctx.run(&["--help"]);

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("FILE NAME FORMAT"));
    assert!(out.stdout.contains("<DIRECTORY>"));
}

#[test]
fn test_short_version_flag() {
    let ctx = TestContext::new();
    let out = ctx.run(&["-v"]);

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_input_suffix_alone_is_rejected() {
    let ctx = TestContext::new();
    ctx.fixture(1, "x\n", "x\n");

    let out = ctx.run(&["cat", ctx.dir(), "1", "1", "_in.txt"]);

    assert_eq!(out.code, Some(2));
    assert!(!out.stdout.contains("Running TEST"));
}

#[test]
fn test_fixture_paths_are_relative_to_cwd() {
    let ctx = TestContext::new();
    ctx.fixture(1, "rel\n", "rel\n");

    let out = ctx.run(&unattended("cat", "sample", "1", "1"));

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("with files (0001_in.txt // 0001_out.txt) from /sample."));
}
