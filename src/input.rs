use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static CID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(cid:\d+\)").unwrap());
static HYPHEN_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-\n").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionStatus {
    Success,
    Error,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Success => "SUCCESS",
            ExtractionStatus::Error => "ERROR",
        }
    }
}

/// Per-document output of the extraction step: ordered recognized lines
/// with their page numbers, plus metadata. `line_count` is the raw
/// recognized-line metric; grouping may still drop lines that normalize
/// to nothing.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub source_name: String,
    pub page_count: u32,
    pub line_count: usize,
    pub lines: Vec<(String, u32)>,
    pub status: ExtractionStatus,
    pub error: Option<String>,
}

/// Seam for the external extraction collaborator (OCR, PDF text layer).
/// Owned by the caller; the per-document pipeline only sees its output.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> DocumentInput;
}

/// Reads plain-text dumps the OCR stage writes: one file per document,
/// form-feed page breaks. A failed read yields an error-status input
/// instead of aborting the batch.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> DocumentInput {
        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                return DocumentInput {
                    source_name,
                    page_count: 0,
                    line_count: 0,
                    lines: Vec::new(),
                    status: ExtractionStatus::Error,
                    error: Some(e.to_string()),
                }
            }
        };

        let cleaned = clean_text(&raw);
        let mut lines = Vec::new();
        let mut page_count = 0;
        for (page_idx, page) in cleaned.split('\u{000C}').enumerate() {
            if page.trim().is_empty() {
                continue;
            }
            page_count = page_idx as u32 + 1;
            for line in page.lines() {
                if line.trim().is_empty() {
                    continue;
                }
                lines.push((line.to_string(), page_idx as u32 + 1));
            }
        }

        DocumentInput {
            source_name,
            page_count,
            line_count: lines.len(),
            lines,
            status: ExtractionStatus::Success,
            error: None,
        }
    }
}

/// OCR/text-layer cleanup carried over from the extraction side: CID
/// artifacts out, line endings normalized, hyphenated line breaks joined.
pub fn clean_text(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = CID_RE.replace_all(&text, "");
    HYPHEN_BREAK_RE.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_cid_artifacts() {
        assert_eq!(clean_text("FIR(cid:12) No(cid:3)"), "FIR No");
    }

    #[test]
    fn clean_joins_hyphenated_breaks() {
        assert_eq!(clean_text("complain-\nant"), "complainant");
    }

    #[test]
    fn clean_normalizes_line_endings() {
        assert_eq!(clean_text("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn extractor_reads_fixture_with_page_breaks() {
        let doc = PlainTextExtractor.extract(Path::new("tests/fixtures/sample_fir.txt"));
        assert_eq!(doc.status, ExtractionStatus::Success);
        assert_eq!(doc.source_name, "sample_fir.txt");
        assert_eq!(doc.page_count, 2);
        assert!(doc.line_count > 0);
        assert!(doc.lines.iter().any(|(_, page)| *page == 2));
    }

    #[test]
    fn missing_file_yields_error_status() {
        let doc = PlainTextExtractor.extract(Path::new("tests/fixtures/no_such_file.txt"));
        assert_eq!(doc.status, ExtractionStatus::Error);
        assert!(doc.error.is_some());
        assert!(doc.lines.is_empty());
    }
}
