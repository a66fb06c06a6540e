//! Test-runner adapter for per-chapter tests and the full-suite script.
//!
//! Every invocation sets the hash-seed environment variable so the external
//! test framework behaves deterministically across runs. Per-chapter runs
//! come in two flavors: passthrough (output shown live, runner gets `-s`)
//! and silent (output captured to `.harness/logs/`).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::io::config::TestConfig;
use crate::io::process::{CommandOutput, run_captured, run_passthrough};

/// Environment variable fixed for every test invocation.
pub const HASH_SEED_VAR: &str = "PYTHONHASHSEED";

/// Parameters for one per-chapter test invocation.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// Book root; the runner executes with this as its working directory.
    pub book_dir: PathBuf,
    /// Test file relative to the book root, e.g. `tests/test_chapter_05.py`.
    pub test_name: String,
    /// Capture output to `log_path` instead of showing it.
    pub silent: bool,
    /// Log file for captured output (silent runs only).
    pub log_path: PathBuf,
}

/// Result of a test invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Pass,
    Fail,
}

/// Abstraction over test-runner backends.
pub trait TestRunner {
    fn run(&self, request: &TestRequest) -> Result<TestOutcome>;
    /// Run the full-suite script at the book root.
    fn run_suite(&self, book_dir: &Path) -> Result<TestOutcome>;
}

/// Runner that spawns the configured commands (`python3 -m pytest` and the
/// suite shell script by default).
pub struct CommandTestRunner {
    runner: Vec<String>,
    suite: Vec<String>,
    hash_seed: String,
    timeout: Duration,
    output_limit_bytes: usize,
}

impl CommandTestRunner {
    pub fn from_config(cfg: &TestConfig) -> Self {
        Self {
            runner: cfg.runner.clone(),
            suite: cfg.suite.clone(),
            hash_seed: cfg.hash_seed.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            output_limit_bytes: cfg.output_limit_bytes,
        }
    }
}

impl TestRunner for CommandTestRunner {
    #[instrument(skip_all, fields(test = %request.test_name, silent = request.silent))]
    fn run(&self, request: &TestRequest) -> Result<TestOutcome> {
        info!(test = %request.test_name, "running chapter tests");

        let mut cmd = Command::new(&self.runner[0]);
        cmd.args(&self.runner[1..]);
        if !request.silent {
            // No capture: let the framework write straight to the terminal.
            cmd.arg("-s");
        }
        cmd.arg(&request.test_name)
            .current_dir(&request.book_dir)
            .env(HASH_SEED_VAR, &self.hash_seed);

        if request.silent {
            let output = run_captured(cmd, self.timeout, self.output_limit_bytes)
                .with_context(|| format!("run tests for {}", request.test_name))?;
            write_test_log(&request.log_path, &output, self.output_limit_bytes)?;
            if output.timed_out {
                warn!(timeout_secs = self.timeout.as_secs(), "test run timed out");
                return Ok(TestOutcome::Fail);
            }
            return Ok(outcome_of(output.status.success()));
        }

        let status = run_passthrough(cmd, self.timeout)
            .with_context(|| format!("run tests for {}", request.test_name))?;
        if status.timed_out {
            warn!(timeout_secs = self.timeout.as_secs(), "test run timed out");
        }
        Ok(outcome_of(status.success()))
    }

    #[instrument(skip_all)]
    fn run_suite(&self, book_dir: &Path) -> Result<TestOutcome> {
        info!(command = %self.suite.join(" "), "running full test suite");

        let mut cmd = Command::new(&self.suite[0]);
        cmd.args(&self.suite[1..])
            .current_dir(book_dir)
            .env(HASH_SEED_VAR, &self.hash_seed);

        let status = run_passthrough(cmd, self.timeout).context("run suite script")?;
        if status.timed_out {
            warn!(timeout_secs = self.timeout.as_secs(), "suite timed out");
        }
        Ok(outcome_of(status.success()))
    }
}

fn outcome_of(success: bool) -> TestOutcome {
    if success {
        TestOutcome::Pass
    } else {
        TestOutcome::Fail
    }
}

fn write_test_log(path: &Path, output: &CommandOutput, output_limit: usize) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create test log dir {}", parent.display()))?;
    }
    let mut buf = String::new();
    buf.push_str("=== stdout ===\n");
    buf.push_str(&String::from_utf8_lossy(&output.stdout));
    buf.push_str(&output.stdout_truncated_notice("tests"));
    buf.push_str("\n=== stderr ===\n");
    buf.push_str(&String::from_utf8_lossy(&output.stderr));
    buf.push_str(&output.stderr_truncated_notice("tests"));
    if output.timed_out {
        buf.push_str("\n[tests timed out]\n");
    }

    if buf.len() > output_limit {
        // Lossy conversion can place a multi-byte char across the limit;
        // cut on the nearest char boundary at or below it.
        let mut cut = output_limit;
        while !buf.is_char_boundary(cut) {
            cut -= 1;
        }
        let truncated = format!("{}\n[truncated {} bytes]\n", &buf[..cut], buf.len() - cut);
        fs::write(path, truncated)
            .with_context(|| format!("write test log {}", path.display()))?;
        return Ok(());
    }

    fs::write(path, buf).with_context(|| format!("write test log {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeBook;

    fn runner_for(book: &FakeBook, tool: &str) -> CommandTestRunner {
        runner_with_limit(book, tool, 10_000)
    }

    fn runner_with_limit(book: &FakeBook, tool: &str, limit: usize) -> CommandTestRunner {
        CommandTestRunner {
            runner: vec![book.tool_path(tool)],
            suite: vec![book.tool_path(tool)],
            hash_seed: "0".to_string(),
            timeout: Duration::from_secs(5),
            output_limit_bytes: limit,
        }
    }

    fn request(book: &FakeBook, silent: bool) -> TestRequest {
        TestRequest {
            book_dir: book.root().to_path_buf(),
            test_name: "tests/test_chapter_01.py".to_string(),
            silent,
            log_path: book.root().join(".harness/logs/test_chapter_01.log"),
        }
    }

    #[test]
    fn passthrough_run_appends_show_output_flag() {
        let book = FakeBook::new().expect("book");
        book.write_tool("pytest", "echo \"$@\" >> test.log\n").expect("tool");

        let outcome = runner_for(&book, "pytest")
            .run(&request(&book, false))
            .expect("run");
        assert_eq!(outcome, TestOutcome::Pass);

        let log = std::fs::read_to_string(book.root().join("test.log")).expect("log");
        assert_eq!(log.trim(), "-s tests/test_chapter_01.py");
    }

    #[test]
    fn silent_run_captures_output_to_log() {
        let book = FakeBook::new().expect("book");
        book.write_tool("pytest", "echo 'collected 3 items'\nexit 1\n")
            .expect("tool");

        let outcome = runner_for(&book, "pytest")
            .run(&request(&book, true))
            .expect("run");
        assert_eq!(outcome, TestOutcome::Fail);

        let log_path = book.root().join(".harness/logs/test_chapter_01.log");
        let log = std::fs::read_to_string(log_path).expect("log");
        assert!(log.contains("collected 3 items"));
    }

    #[test]
    fn silent_log_truncates_past_output_limit() {
        let book = FakeBook::new().expect("book");
        book.write_tool("pytest", "printf 'aaaaaaaaaaaaaaaaaaaa'\n")
            .expect("tool");

        runner_with_limit(&book, "pytest", 32)
            .run(&request(&book, true))
            .expect("run");

        // Full log is 51 bytes (15-byte stdout header + 20 + 16-byte stderr
        // header), so 19 bytes fall past the limit.
        let log_path = book.root().join(".harness/logs/test_chapter_01.log");
        let log = std::fs::read_to_string(log_path).expect("log");
        assert!(log.ends_with("[truncated 19 bytes]\n"));
    }

    #[test]
    fn silent_log_truncation_respects_char_boundaries() {
        let book = FakeBook::new().expect("book");
        book.write_tool("pytest", "printf '\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}'\n")
            .expect("tool");

        // The limit lands one byte into the first two-byte char after the
        // 15-byte stdout header; the cut must back up instead of panicking.
        runner_with_limit(&book, "pytest", 16)
            .run(&request(&book, true))
            .expect("run");

        let log_path = book.root().join(".harness/logs/test_chapter_01.log");
        let log = std::fs::read_to_string(log_path).expect("log");
        assert!(log.starts_with("=== stdout ===\n"));
        assert!(log.contains("[truncated "));
    }

    #[test]
    fn runner_sets_hash_seed_env() {
        let book = FakeBook::new().expect("book");
        book.write_tool("pytest", "echo \"$PYTHONHASHSEED\" > seed.log\n")
            .expect("tool");

        runner_for(&book, "pytest")
            .run(&request(&book, false))
            .expect("run");
        let seed = std::fs::read_to_string(book.root().join("seed.log")).expect("log");
        assert_eq!(seed.trim(), "0");
    }

    #[test]
    fn suite_failure_is_an_outcome_not_an_error() {
        let book = FakeBook::new().expect("book");
        book.write_tool("suite", "exit 2\n").expect("tool");

        let outcome = runner_for(&book, "suite")
            .run_suite(book.root())
            .expect("suite");
        assert_eq!(outcome, TestOutcome::Fail);
    }
}
