//! Orchestration for the `build` command.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::chapter::SourceDoc;
use crate::core::plan::{BuildReason, plan_build};
use crate::io::compiler::{CompileRequest, DocCompiler};
use crate::io::discover::{discover_sources, find_chapter, observe_times};

/// What one `build` invocation did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    /// Pages recompiled, in build order.
    pub built: Vec<String>,
    /// Pages whose output was already up to date.
    pub skipped: Vec<String>,
}

/// Build every stale page in the book root.
pub fn build_all<C: DocCompiler>(root: &Path, compiler: &C) -> Result<BuildReport> {
    let docs = discover_sources(root)?;
    build_docs(root, compiler, &docs)
}

/// Build one chapter's page (if stale). Errors when the chapter source is
/// missing.
pub fn build_chapter<C: DocCompiler>(root: &Path, compiler: &C, number: u32) -> Result<SourceDoc> {
    let doc = find_chapter(root, number)?
        .ok_or_else(|| anyhow!("no source file for chapter {number}"))?;
    build_docs(root, compiler, std::slice::from_ref(&doc))?;
    Ok(doc)
}

fn build_docs<C: DocCompiler>(
    root: &Path,
    compiler: &C,
    docs: &[SourceDoc],
) -> Result<BuildReport> {
    let times = observe_times(root, docs)?;
    let plan = plan_build(&times);
    debug!(
        to_build = plan.jobs.len(),
        up_to_date = plan.skipped.len(),
        "planned build"
    );

    let mut report = BuildReport {
        skipped: plan.skipped,
        ..BuildReport::default()
    };
    for job in plan.jobs {
        let reason = match job.reason {
            BuildReason::MissingOutput => "missing output",
            BuildReason::Stale => "stale output",
        };
        info!(page = %job.doc.output_name(), reason, "building page");
        compiler
            .compile(&CompileRequest {
                book_dir: root.to_path_buf(),
                source_name: job.doc.source_name(),
            })
            .with_context(|| format!("build {}", job.doc.output_name()))?;
        report.built.push(job.doc.stem);
    }
    Ok(report)
}
