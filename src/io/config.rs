//! Harness configuration stored in `harness.toml` at the book root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Harness configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to the conventions of the book repo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct HarnessConfig {
    pub compiler: CompilerConfig,
    pub sync: SyncConfig,
    pub tests: TestConfig,
}

/// Document-to-HTML compiler invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompilerConfig {
    /// Command to execute (e.g. `["asciidoctor"]`).
    pub command: Vec<String>,
    /// Formatting attributes passed as `-a key=value`, one per entry.
    pub attributes: Vec<String>,
    /// Wall-clock budget per page in seconds.
    pub timeout_secs: u64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: vec!["asciidoctor".to_string()],
            attributes: vec!["source-highlighter=coderay".to_string()],
            timeout_secs: 120,
        }
    }
}

/// Source-repository sync step, run before any tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Command to execute (e.g. `["./update_source_repo.py"]`).
    pub command: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            command: vec!["./update_source_repo.py".to_string()],
            timeout_secs: 10 * 60,
        }
    }
}

/// Test runner and suite script invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestConfig {
    /// Per-chapter runner command; the test file path is appended.
    pub runner: Vec<String>,
    /// Full-suite script run by the `test` command.
    pub suite: Vec<String>,
    /// Value for the hash-seed environment variable, for deterministic runs.
    pub hash_seed: String,
    /// Wall-clock budget per test invocation in seconds.
    pub timeout_secs: u64,
    /// Truncate captured test output beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            runner: vec!["python3".to_string(), "-m".to_string(), "pytest".to_string()],
            suite: vec!["./run_all_tests.sh".to_string()],
            hash_seed: "0".to_string(),
            timeout_secs: 30 * 60,
            output_limit_bytes: 1_000_000,
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        validate_command("compiler.command", &self.compiler.command)?;
        validate_command("sync.command", &self.sync.command)?;
        validate_command("tests.runner", &self.tests.runner)?;
        validate_command("tests.suite", &self.tests.suite)?;
        if self.compiler.timeout_secs == 0 {
            return Err(anyhow!("compiler.timeout_secs must be > 0"));
        }
        if self.sync.timeout_secs == 0 {
            return Err(anyhow!("sync.timeout_secs must be > 0"));
        }
        if self.tests.timeout_secs == 0 {
            return Err(anyhow!("tests.timeout_secs must be > 0"));
        }
        if self.tests.output_limit_bytes == 0 {
            return Err(anyhow!("tests.output_limit_bytes must be > 0"));
        }
        if self.tests.hash_seed.trim().is_empty() {
            return Err(anyhow!("tests.hash_seed must be non-empty"));
        }
        Ok(())
    }
}

fn validate_command(field: &str, command: &[String]) -> Result<()> {
    if command.is_empty() || command[0].trim().is_empty() {
        return Err(anyhow!("{field} must be a non-empty array"));
    }
    Ok(())
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `HarnessConfig::default()`.
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    if !path.exists() {
        let cfg = HarnessConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HarnessConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &HarnessConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
