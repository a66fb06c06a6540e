//! Filesystem discovery of chapter sources and their timestamps.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::chapter::SourceDoc;
use crate::core::plan::DocTimes;

/// List all buildable source documents in the book root, sorted by file name.
pub fn discover_sources(root: &Path) -> Result<Vec<SourceDoc>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("read book root {}", root.display()))?;

    let mut docs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", root.display()))?;
        if !entry.file_type().context("entry file type")?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(doc) = SourceDoc::from_file_name(name) {
            docs.push(doc);
        }
    }
    docs.sort_by(|a, b| a.stem.cmp(&b.stem));
    debug!(count = docs.len(), "discovered source documents");
    Ok(docs)
}

/// Find the chapter document with the given number, if present.
pub fn find_chapter(root: &Path, number: u32) -> Result<Option<SourceDoc>> {
    let docs = discover_sources(root)?;
    Ok(docs.into_iter().find(|doc| doc.chapter == Some(number)))
}

/// Observe source and output timestamps for each document.
///
/// A missing source is an error (discovery just saw it); a missing output is
/// recorded as `None` so planning schedules a rebuild.
pub fn observe_times(root: &Path, docs: &[SourceDoc]) -> Result<Vec<DocTimes>> {
    let mut out = Vec::with_capacity(docs.len());
    for doc in docs {
        let source_path = root.join(doc.source_name());
        let source_mtime = fs::metadata(&source_path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("stat source {}", source_path.display()))?;

        let output_path = root.join(doc.output_name());
        let output_mtime = match fs::metadata(&output_path) {
            Ok(meta) => Some(
                meta.modified()
                    .with_context(|| format!("mtime of {}", output_path.display()))?,
            ),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                return Err(err).with_context(|| format!("stat output {}", output_path.display()));
            }
        };

        out.push(DocTimes {
            doc: doc.clone(),
            source_mtime,
            output_mtime,
        });
    }
    Ok(out)
}
