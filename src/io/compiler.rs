//! Document-compiler adapter.
//!
//! The compiler (asciidoctor by default) is consumed as a black box: the
//! harness supplies the source file name plus fixed formatting attributes
//! and checks the exit status. The [`DocCompiler`] trait decouples build
//! orchestration from the real tool so tests can use scripted compilers.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument, warn};

use crate::io::config::CompilerConfig;
use crate::io::process::run_captured;

/// Parameters for one page compilation.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Book root; the compiler runs with this as its working directory.
    pub book_dir: PathBuf,
    /// Source file name relative to the book root, e.g. `chapter_05.asciidoc`.
    pub source_name: String,
}

/// Abstraction over document-compiler backends.
pub trait DocCompiler {
    /// Compile one source into its HTML page next to it. Must fail on a
    /// non-zero compiler exit.
    fn compile(&self, request: &CompileRequest) -> Result<()>;
}

/// Compiler that spawns the configured command (asciidoctor by default).
pub struct CommandCompiler {
    command: Vec<String>,
    attributes: Vec<String>,
    timeout: Duration,
    output_limit_bytes: usize,
}

impl CommandCompiler {
    pub fn from_config(cfg: &CompilerConfig) -> Self {
        Self {
            command: cfg.command.clone(),
            attributes: cfg.attributes.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            output_limit_bytes: 100_000,
        }
    }
}

impl DocCompiler for CommandCompiler {
    #[instrument(skip_all, fields(source = %request.source_name))]
    fn compile(&self, request: &CompileRequest) -> Result<()> {
        info!(source = %request.source_name, "compiling page");

        let mut cmd = Command::new(&self.command[0]);
        cmd.args(&self.command[1..]);
        for attribute in &self.attributes {
            cmd.arg("-a").arg(attribute);
        }
        cmd.arg(&request.source_name).current_dir(&request.book_dir);

        let output = run_captured(cmd, self.timeout, self.output_limit_bytes)
            .with_context(|| format!("run compiler for {}", request.source_name))?;

        if output.timed_out {
            warn!(timeout_secs = self.timeout.as_secs(), "compiler timed out");
            return Err(anyhow!(
                "compiler timed out after {:?} on {}",
                self.timeout,
                request.source_name
            ));
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(exit_code = ?output.status.code(), "compiler failed");
            return Err(anyhow!(
                "compiler failed on {} (status {:?}): {}",
                request.source_name,
                output.status.code(),
                stderr.trim()
            ));
        }

        debug!("page compiled");
        Ok(())
    }
}
