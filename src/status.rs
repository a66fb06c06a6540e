//! Orchestration for the `status` command.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::core::plan::needs_rebuild;
use crate::io::discover::{discover_sources, observe_times};

/// Freshness report for one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocStatus {
    pub stem: String,
    pub chapter: Option<u32>,
    /// True when the generated page exists and is at least as new as the source.
    pub fresh: bool,
    /// True when a companion test file exists under `tests/`.
    pub has_test: bool,
}

/// Report every discovered source with page freshness and test presence.
pub fn status(root: &Path) -> Result<Vec<DocStatus>> {
    let docs = discover_sources(root)?;
    let times = observe_times(root, &docs)?;

    let mut out = Vec::with_capacity(times.len());
    for entry in &times {
        let has_test = entry
            .doc
            .test_name()
            .is_some_and(|name| root.join(name).exists());
        out.push(DocStatus {
            stem: entry.doc.stem.clone(),
            chapter: entry.doc.chapter,
            fresh: needs_rebuild(entry).is_none(),
            has_test,
        });
    }
    Ok(out)
}
