//! Orchestration for the `clean` command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::io::discover::discover_sources;

/// Remove every generated HTML page whose source is present. Sources are
/// never touched; pages without a matching source are left alone.
///
/// Returns the removed page names.
pub fn clean(root: &Path) -> Result<Vec<String>> {
    let docs = discover_sources(root)?;
    let mut removed = Vec::new();
    for doc in docs {
        let output = root.join(doc.output_name());
        if !output.exists() {
            continue;
        }
        fs::remove_file(&output).with_context(|| format!("remove {}", output.display()))?;
        info!(page = %doc.output_name(), "removed generated page");
        removed.push(doc.output_name());
    }
    Ok(removed)
}
