//! Test-only helpers: a fabricated book directory and scripted tool fakes.

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;

use anyhow::{Context, Result};

use crate::core::chapter::SourceDoc;
use crate::io::compiler::{CompileRequest, DocCompiler};
use crate::io::sync::{SourceSync, SyncOutcome};
use crate::io::test_runner::{TestOutcome, TestRequest, TestRunner};

/// Build a [`SourceDoc`] from a bare stem.
pub fn doc(stem: &str) -> SourceDoc {
    SourceDoc::from_file_name(&format!("{stem}.asciidoc")).expect("valid source stem")
}

/// A temporary book directory with chapter sources, test files, and
/// executable fake tools under `tools/`.
pub struct FakeBook {
    temp: tempfile::TempDir,
}

impl FakeBook {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp book dir")?;
        Ok(Self { temp })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Write `chapter_<num>.asciidoc` at the book root.
    pub fn add_chapter(&self, num: &str, contents: &str) -> Result<()> {
        self.add_source(&format!("chapter_{num}"), contents)
    }

    /// Write an arbitrary `<stem>.asciidoc` at the book root.
    pub fn add_source(&self, stem: &str, contents: &str) -> Result<()> {
        let path = self.root().join(format!("{stem}.asciidoc"));
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    /// Write `tests/test_chapter_<num>.py`.
    pub fn add_test(&self, num: &str) -> Result<()> {
        let dir = self.root().join("tests");
        fs::create_dir_all(&dir).context("create tests dir")?;
        let path = dir.join(format!("test_chapter_{num}.py"));
        fs::write(&path, "# chapter test\n").with_context(|| format!("write {}", path.display()))
    }

    /// Write an executable shell script under `tools/` and return nothing;
    /// fetch its path with [`FakeBook::tool_path`]. Scripts run with the book
    /// root as working directory, so relative log paths land there.
    pub fn write_tool(&self, name: &str, body: &str) -> Result<()> {
        let dir = self.root().join("tools");
        fs::create_dir_all(&dir).context("create tools dir")?;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}"))
            .with_context(|| format!("write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .with_context(|| format!("chmod {}", path.display()))?;
        }
        Ok(())
    }

    /// Absolute path of a fake tool as a command string.
    pub fn tool_path(&self, name: &str) -> String {
        self.root().join("tools").join(name).display().to_string()
    }

    /// Backdate a generated page so it reads as stale.
    pub fn age_output(&self, stem: &str) -> Result<()> {
        let path = self.root().join(format!("{stem}.html"));
        let file = fs::File::options()
            .write(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        file.set_modified(SystemTime::UNIX_EPOCH)
            .with_context(|| format!("backdate {}", path.display()))?;
        Ok(())
    }

    /// Install the standard fake tools and a `harness.toml` pointing at them.
    ///
    /// Each tool appends to a log at the book root: `compile.log` (source
    /// name per invocation), `sync.log`, `test.log` (runner args), and
    /// `suite.log`. The fake compiler also writes the expected HTML page.
    pub fn install_fake_tools(&self) -> Result<()> {
        self.write_tool(
            "compile",
            "for last; do :; done\n\
             printf 'compiled\\n' > \"${last%.asciidoc}.html\"\n\
             echo \"$last\" >> compile.log\n",
        )?;
        self.write_tool("sync", "echo sync >> sync.log\n")?;
        self.write_tool("pytest", "echo \"$@\" >> test.log\n")?;
        self.write_tool("suite", "echo suite >> suite.log\n")?;
        self.write_harness_toml()
    }

    fn write_harness_toml(&self) -> Result<()> {
        let contents = format!(
            "[compiler]\ncommand = [\"{compile}\"]\nattributes = []\n\n\
             [sync]\ncommand = [\"{sync}\"]\n\n\
             [tests]\nrunner = [\"{pytest}\"]\nsuite = [\"{suite}\"]\n",
            compile = self.tool_path("compile"),
            sync = self.tool_path("sync"),
            pytest = self.tool_path("pytest"),
            suite = self.tool_path("suite"),
        );
        fs::write(self.root().join("harness.toml"), contents).context("write harness.toml")
    }

    /// Lines of a log file at the book root; empty when the log is absent.
    pub fn log_lines(&self, name: &str) -> Vec<String> {
        match fs::read_to_string(self.root().join(name)) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Compiler fake that writes the output page without spawning anything.
#[derive(Default)]
pub struct TouchCompiler {
    count: AtomicUsize,
}

impl TouchCompiler {
    pub fn invocations(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl DocCompiler for TouchCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        let output = request
            .source_name
            .strip_suffix(".asciidoc")
            .map(|stem| format!("{stem}.html"))
            .unwrap_or_else(|| format!("{}.html", request.source_name));
        fs::write(request.book_dir.join(output), "compiled\n").context("write fake page")?;
        Ok(())
    }
}

/// Sync fake with a predetermined outcome.
pub struct FakeSync {
    outcome: SyncOutcome,
}

impl FakeSync {
    pub fn ok() -> Self {
        Self {
            outcome: SyncOutcome::Synced,
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: SyncOutcome::Failed,
        }
    }
}

impl SourceSync for FakeSync {
    fn sync(&self, _book_dir: &Path) -> Result<SyncOutcome> {
        Ok(self.outcome)
    }
}

/// Test-runner fake that records invocations instead of spawning.
pub struct FakeTestRunner {
    outcome: TestOutcome,
    chapter_runs: Mutex<Vec<String>>,
    suite_runs: AtomicUsize,
}

impl FakeTestRunner {
    pub fn passing() -> Self {
        Self::with_outcome(TestOutcome::Pass)
    }

    pub fn failing() -> Self {
        Self::with_outcome(TestOutcome::Fail)
    }

    fn with_outcome(outcome: TestOutcome) -> Self {
        Self {
            outcome,
            chapter_runs: Mutex::new(Vec::new()),
            suite_runs: AtomicUsize::new(0),
        }
    }

    pub fn chapter_runs(&self) -> Vec<String> {
        self.chapter_runs.lock().expect("chapter runs lock").clone()
    }

    pub fn suite_runs(&self) -> usize {
        self.suite_runs.load(Ordering::SeqCst)
    }
}

impl TestRunner for FakeTestRunner {
    fn run(&self, request: &TestRequest) -> Result<TestOutcome> {
        self.chapter_runs
            .lock()
            .expect("chapter runs lock")
            .push(request.test_name.clone());
        Ok(self.outcome)
    }

    fn run_suite(&self, _book_dir: &Path) -> Result<TestOutcome> {
        self.suite_runs.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome)
    }
}
