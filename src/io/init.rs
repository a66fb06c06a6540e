//! Harness layout under the book root, plus `init`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::io::config::{HarnessConfig, write_config};

/// Well-known paths relative to the book root.
#[derive(Debug, Clone)]
pub struct HarnessPaths {
    pub root: PathBuf,
    /// Human-edited configuration, `harness.toml`.
    pub config_path: PathBuf,
    /// Harness-owned state directory, `.harness/`.
    pub harness_dir: PathBuf,
    /// Captured tool output, `.harness/logs/`.
    pub logs_dir: PathBuf,
    /// Chapter test files, `tests/`.
    pub tests_dir: PathBuf,
}

impl HarnessPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_path: root.join("harness.toml"),
            harness_dir: root.join(".harness"),
            logs_dir: root.join(".harness/logs"),
            tests_dir: root.join("tests"),
            root,
        }
    }

    /// Log file for one tool invocation, e.g. `.harness/logs/test_chapter_05.log`.
    pub fn log_path(&self, name: &str) -> PathBuf {
        self.logs_dir.join(format!("{name}.log"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Overwrite an existing config file.
    pub force: bool,
}

/// Create `harness.toml` and the `.harness/` directory if missing.
pub fn init_harness(root: &Path, options: &InitOptions) -> Result<()> {
    let paths = HarnessPaths::new(root);

    fs::create_dir_all(&paths.harness_dir).context("create .harness directory")?;
    ensure_gitignore(&paths.harness_dir.join(".gitignore"))?;

    if options.force || !paths.config_path.exists() {
        write_config(&paths.config_path, &HarnessConfig::default())
            .context("write harness.toml")?;
    }

    Ok(())
}

fn ensure_gitignore(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, "logs/\n").with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
