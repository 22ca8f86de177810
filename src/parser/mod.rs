pub mod assemble;
pub mod grouper;
pub mod lines;
pub mod matcher;

use crate::input::{DocumentInput, ExtractionStatus};
use crate::vocab::HeadingVocabulary;
use assemble::DocumentRecord;

/// Per-document pipeline: raw lines → normalized lines → sections → record.
/// Side-effect free; safe to run across documents in parallel.
pub fn process_document(input: &DocumentInput, vocab: &HeadingVocabulary) -> DocumentRecord {
    if input.status == ExtractionStatus::Error {
        return assemble::error_record(input);
    }
    let lines = lines::build_lines(&input.lines);
    let sections = grouper::group_sections(&lines, vocab);
    assemble::assemble(&sections, input, vocab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::input::{PlainTextExtractor, TextExtractor};

    #[test]
    fn sample_fir_fixture_end_to_end() {
        let vocab = HeadingVocabulary::default_fir().unwrap();
        let doc = PlainTextExtractor.extract(Path::new("tests/fixtures/sample_fir.txt"));
        let record = process_document(&doc, &vocab);

        assert_eq!(record.status, ExtractionStatus::Success);
        assert_eq!(record.pages, 2);
        let fields = record.field_map();
        assert_eq!(fields.get("District").copied(), Some("Nagpur"));
        assert_eq!(fields.get("Police Station").copied(), Some("ABC Nagar"));
        assert_eq!(fields.get("FIR No").copied(), Some("0123/2023"));
        assert!(fields.get("FIR Contents").is_some());
        // Accused repeats across both pages and must merge in order.
        assert_eq!(fields.get("Accused").copied(), Some("John | Doe"));
    }

    #[test]
    fn noisy_fixture_survives_ocr_artifacts() {
        let vocab = HeadingVocabulary::default_fir().unwrap();
        let doc = PlainTextExtractor.extract(Path::new("tests/fixtures/noisy_fir.txt"));
        let record = process_document(&doc, &vocab);

        assert_eq!(record.status, ExtractionStatus::Success);
        let fields = record.field_map();
        assert_eq!(fields.get("FIR No").copied(), Some("45/2022"));
        assert_eq!(fields.get("Complainant").copied(), Some("Ramesh Kulkarni"));
    }

    #[test]
    fn error_input_produces_error_record() {
        let vocab = HeadingVocabulary::default_fir().unwrap();
        let doc = PlainTextExtractor.extract(Path::new("tests/fixtures/does_not_exist.txt"));
        let record = process_document(&doc, &vocab);
        assert_eq!(record.status, ExtractionStatus::Error);
        assert!(record.fields.is_empty());
    }

    #[test]
    fn processing_is_idempotent() {
        let vocab = HeadingVocabulary::default_fir().unwrap();
        let doc = PlainTextExtractor.extract(Path::new("tests/fixtures/sample_fir.txt"));
        assert_eq!(
            process_document(&doc, &vocab),
            process_document(&doc, &vocab)
        );
    }
}
