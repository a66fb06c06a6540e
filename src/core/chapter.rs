//! Naming rules relating chapter sources, generated pages, and test files.
//!
//! The whole data model is a fixed filename convention:
//! `chapter_N.asciidoc` → `chapter_N.html`, paired with
//! `tests/test_chapter_N.py`. The digit text is preserved verbatim so
//! zero-padded names (`chapter_05`) keep their padding in derived names.

use std::sync::LazyLock;

use regex::Regex;

/// Extension of book source documents.
pub const SOURCE_EXT: &str = "asciidoc";
/// Extension of generated pages.
pub const OUTPUT_EXT: &str = "html";

static CHAPTER_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^chapter_(\d+)$").expect("chapter stem regex"));

/// One buildable source document in the book root.
///
/// Any `*.asciidoc` file is buildable; chapter-numbered ones additionally
/// pair with a test file under `tests/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDoc {
    /// File name without extension, e.g. `chapter_05`.
    pub stem: String,
    /// Chapter number parsed from the stem, if this is a chapter document.
    pub chapter: Option<u32>,
}

impl SourceDoc {
    /// Classify a source file name (`chapter_05.asciidoc`). Returns `None`
    /// for files that are not book sources.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(&format!(".{SOURCE_EXT}"))?;
        if stem.is_empty() {
            return None;
        }
        let chapter = CHAPTER_STEM
            .captures(stem)
            .and_then(|caps| caps[1].parse::<u32>().ok());
        Some(Self {
            stem: stem.to_string(),
            chapter,
        })
    }

    /// Source file name, e.g. `chapter_05.asciidoc`.
    pub fn source_name(&self) -> String {
        format!("{}.{SOURCE_EXT}", self.stem)
    }

    /// Generated page name, e.g. `chapter_05.html`.
    pub fn output_name(&self) -> String {
        format!("{}.{OUTPUT_EXT}", self.stem)
    }

    /// Companion test file name relative to the book root, e.g.
    /// `tests/test_chapter_05.py`. `None` for non-chapter documents.
    pub fn test_name(&self) -> Option<String> {
        self.chapter?;
        Some(format!("tests/test_{}.py", self.stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_chapter_source() {
        let doc = SourceDoc::from_file_name("chapter_05.asciidoc").expect("source doc");
        assert_eq!(doc.stem, "chapter_05");
        assert_eq!(doc.chapter, Some(5));
        assert_eq!(doc.output_name(), "chapter_05.html");
        assert_eq!(doc.test_name().as_deref(), Some("tests/test_chapter_05.py"));
    }

    #[test]
    fn classifies_non_chapter_source() {
        let doc = SourceDoc::from_file_name("appendix_forms.asciidoc").expect("source doc");
        assert_eq!(doc.chapter, None);
        assert_eq!(doc.output_name(), "appendix_forms.html");
        assert_eq!(doc.test_name(), None);
    }

    #[test]
    fn unpadded_chapter_number_keeps_its_text() {
        let doc = SourceDoc::from_file_name("chapter_7.asciidoc").expect("source doc");
        assert_eq!(doc.chapter, Some(7));
        assert_eq!(doc.test_name().as_deref(), Some("tests/test_chapter_7.py"));
    }

    #[test]
    fn rejects_other_extensions_and_empty_stems() {
        assert_eq!(SourceDoc::from_file_name("chapter_01.html"), None);
        assert_eq!(SourceDoc::from_file_name("notes.txt"), None);
        assert_eq!(SourceDoc::from_file_name(".asciidoc"), None);
    }

    #[test]
    fn chapter_requires_exact_stem_shape() {
        let doc = SourceDoc::from_file_name("chapter_01_old.asciidoc").expect("source doc");
        assert_eq!(doc.chapter, None);
    }
}
