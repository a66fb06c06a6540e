//! Source-repository sync adapter.
//!
//! Chapter tests run against an example-source repository that a script
//! brings up to date. The script runs before any test and its failure aborts
//! the whole run.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};
use wait_timeout::ChildExt;

use crate::io::config::SyncConfig;

/// Result of the sync step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    Failed,
}

/// Abstraction over the repository-sync step.
pub trait SourceSync {
    fn sync(&self, book_dir: &Path) -> Result<SyncOutcome>;
}

/// Sync step that spawns the configured script with inherited stdio.
pub struct ScriptSync {
    command: Vec<String>,
    timeout: Duration,
}

impl ScriptSync {
    pub fn from_config(cfg: &SyncConfig) -> Self {
        Self {
            command: cfg.command.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

impl SourceSync for ScriptSync {
    #[instrument(skip_all)]
    fn sync(&self, book_dir: &Path) -> Result<SyncOutcome> {
        info!(command = %self.command.join(" "), "syncing source repository");

        let mut child = Command::new(&self.command[0])
            .args(&self.command[1..])
            .current_dir(book_dir)
            .stdin(Stdio::null())
            .spawn()
            .with_context(|| format!("spawn sync command {}", self.command.join(" ")))?;

        let status = match child.wait_timeout(self.timeout).context("wait for sync")? {
            Some(status) => status,
            None => {
                warn!(timeout_secs = self.timeout.as_secs(), "sync timed out");
                child.kill().context("kill sync")?;
                child.wait().context("wait sync after kill")?;
                return Ok(SyncOutcome::Failed);
            }
        };

        if status.success() {
            Ok(SyncOutcome::Synced)
        } else {
            warn!(exit_code = ?status.code(), "sync failed");
            Ok(SyncOutcome::Failed)
        }
    }
}
