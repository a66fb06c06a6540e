//! Build planning over observed file timestamps.
//!
//! Standard build-tool semantics: a page is rebuilt when its output is
//! missing or strictly older than its source. Planning is pure; the caller
//! stats the filesystem and hands in [`DocTimes`].

use std::time::SystemTime;

use crate::core::chapter::SourceDoc;

/// Timestamps observed for one source document.
#[derive(Debug, Clone)]
pub struct DocTimes {
    pub doc: SourceDoc,
    pub source_mtime: SystemTime,
    /// `None` when the output file does not exist.
    pub output_mtime: Option<SystemTime>,
}

/// Why a page is scheduled for recompilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildReason {
    MissingOutput,
    Stale,
}

/// One scheduled compiler invocation.
#[derive(Debug, Clone)]
pub struct BuildJob {
    pub doc: SourceDoc,
    pub reason: BuildReason,
}

/// Full plan for one `build` invocation.
#[derive(Debug, Clone, Default)]
pub struct BuildPlan {
    pub jobs: Vec<BuildJob>,
    /// Stems whose output is already up to date.
    pub skipped: Vec<String>,
}

/// Decide whether a single page needs recompiling.
pub fn needs_rebuild(times: &DocTimes) -> Option<BuildReason> {
    match times.output_mtime {
        None => Some(BuildReason::MissingOutput),
        Some(out) if out < times.source_mtime => Some(BuildReason::Stale),
        Some(_) => None,
    }
}

/// Plan a build over all observed documents, preserving input order.
pub fn plan_build(docs: &[DocTimes]) -> BuildPlan {
    let mut plan = BuildPlan::default();
    for times in docs {
        match needs_rebuild(times) {
            Some(reason) => plan.jobs.push(BuildJob {
                doc: times.doc.clone(),
                reason,
            }),
            None => plan.skipped.push(times.doc.stem.clone()),
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::doc;
    use std::time::Duration;

    fn times(stem: &str, source: SystemTime, output: Option<SystemTime>) -> DocTimes {
        DocTimes {
            doc: doc(stem),
            source_mtime: source,
            output_mtime: output,
        }
    }

    #[test]
    fn missing_output_is_rebuilt() {
        let now = SystemTime::now();
        let plan = plan_build(&[times("chapter_01", now, None)]);
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.jobs[0].reason, BuildReason::MissingOutput);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn older_output_is_stale() {
        let now = SystemTime::now();
        let earlier = now - Duration::from_secs(60);
        let plan = plan_build(&[times("chapter_01", now, Some(earlier))]);
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.jobs[0].reason, BuildReason::Stale);
    }

    #[test]
    fn fresh_output_is_skipped() {
        let now = SystemTime::now();
        let later = now + Duration::from_secs(60);
        let plan = plan_build(&[
            times("chapter_01", now, Some(later)),
            times("chapter_02", now, Some(now)),
        ]);
        assert!(plan.jobs.is_empty());
        assert_eq!(plan.skipped, vec!["chapter_01", "chapter_02"]);
    }

    #[test]
    fn plan_preserves_input_order() {
        let now = SystemTime::now();
        let plan = plan_build(&[
            times("chapter_02", now, None),
            times("chapter_01", now, None),
        ]);
        let stems: Vec<&str> = plan.jobs.iter().map(|job| job.doc.stem.as_str()).collect();
        assert_eq!(stems, vec!["chapter_02", "chapter_01"]);
    }
}
