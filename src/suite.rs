//! Orchestration for the `test` and `test-chapter` commands.
//!
//! Order is fixed: build the page(s), sync the example-source repository,
//! then run tests. A failed sync aborts before any test executes.

use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::{info, warn};

use crate::build::{build_all, build_chapter};
use crate::io::compiler::DocCompiler;
use crate::io::init::HarnessPaths;
use crate::io::sync::{SourceSync, SyncOutcome};
use crate::io::test_runner::{TestOutcome, TestRequest, TestRunner};

/// Outcome of a test command, mapped to an exit code in `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteOutcome {
    Passed,
    /// The repository-sync step failed; no tests were executed.
    SyncFailed,
    TestsFailed,
}

/// `test`: build everything, sync, then run the full-suite script.
pub fn test_all<C, S, R>(root: &Path, compiler: &C, sync: &S, runner: &R) -> Result<SuiteOutcome>
where
    C: DocCompiler,
    S: SourceSync,
    R: TestRunner,
{
    build_all(root, compiler)?;

    if sync.sync(root)? == SyncOutcome::Failed {
        warn!("source repository sync failed, skipping tests");
        return Ok(SuiteOutcome::SyncFailed);
    }

    match runner.run_suite(root)? {
        TestOutcome::Pass => Ok(SuiteOutcome::Passed),
        TestOutcome::Fail => Ok(SuiteOutcome::TestsFailed),
    }
}

/// `test-chapter N`: build chapter N's page, sync, then run exactly that
/// chapter's test file.
pub fn test_chapter<C, S, R>(
    root: &Path,
    compiler: &C,
    sync: &S,
    runner: &R,
    number: u32,
    silent: bool,
) -> Result<SuiteOutcome>
where
    C: DocCompiler,
    S: SourceSync,
    R: TestRunner,
{
    let doc = build_chapter(root, compiler, number)?;
    let test_name = doc
        .test_name()
        .ok_or_else(|| anyhow!("{} is not a chapter document", doc.source_name()))?;

    let paths = HarnessPaths::new(root);
    if !paths.root.join(&test_name).exists() {
        return Err(anyhow!("missing test file {test_name}"));
    }

    if sync.sync(root)? == SyncOutcome::Failed {
        warn!("source repository sync failed, skipping tests");
        return Ok(SuiteOutcome::SyncFailed);
    }

    info!(test = %test_name, silent, "running chapter test file");
    let outcome = runner.run(&TestRequest {
        book_dir: paths.root.clone(),
        test_name,
        silent,
        log_path: paths.log_path(&format!("test_{}", doc.stem)),
    })?;

    match outcome {
        TestOutcome::Pass => Ok(SuiteOutcome::Passed),
        TestOutcome::Fail => Ok(SuiteOutcome::TestsFailed),
    }
}
