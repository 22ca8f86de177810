use std::collections::BTreeSet;

use crate::parser::assemble::DocumentRecord;
use crate::vocab::HeadingVocabulary;

pub const METADATA_COLUMNS: [&str; 5] = ["source", "pages", "lines", "status", "error"];

/// Batch result: ordered rows over a stable column set. Heading columns
/// grow as documents introduce them, but stay in vocabulary order, so the
/// output shape does not depend on processing order. Single-writer: the
/// orchestrator funnels all pushes through one reduce step.
#[derive(Debug)]
pub struct Dataset {
    headings: Vec<String>,
    seen: BTreeSet<usize>,
    rows: Vec<DocumentRecord>,
}

impl Dataset {
    pub fn new(vocab: &HeadingVocabulary) -> Self {
        Dataset {
            headings: vocab
                .entries()
                .iter()
                .map(|e| e.canonical.clone())
                .collect(),
            seen: BTreeSet::new(),
            rows: Vec::new(),
        }
    }

    /// Append a record; any heading it carries that the schema has not
    /// seen yet becomes a column for all prior and future rows.
    pub fn push(&mut self, record: DocumentRecord) {
        for field in &record.fields {
            self.seen.insert(field.pos);
        }
        self.rows.push(record);
    }

    /// Metadata columns first, then every heading seen so far in
    /// vocabulary order.
    pub fn columns(&self) -> Vec<String> {
        METADATA_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.seen.iter().map(|pos| self.headings[*pos].clone()))
            .collect()
    }

    /// Render one complete row per record over the final column set;
    /// absent heading values render empty, never as a missing cell.
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(|r| {
            let mut row = vec![
                r.source.clone(),
                r.pages.to_string(),
                r.lines.to_string(),
                r.status.as_str().to_string(),
                r.error.clone().unwrap_or_default(),
            ];
            for pos in &self.seen {
                row.push(r.value(*pos).unwrap_or_default().to_string());
            }
            row
        })
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.rows
    }

    /// Number of heading columns currently in the schema.
    pub fn heading_column_count(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{DocumentInput, ExtractionStatus};
    use crate::parser::process_document;
    use crate::vocab::HeadingEntry;

    fn vocab() -> HeadingVocabulary {
        HeadingVocabulary::new(
            ["District", "FIR No", "Accused"]
                .iter()
                .map(|n| HeadingEntry {
                    canonical: n.to_string(),
                    aliases: vec![],
                })
                .collect(),
        )
        .unwrap()
    }

    fn doc(name: &str, texts: &[&str]) -> DocumentInput {
        DocumentInput {
            source_name: name.to_string(),
            page_count: 1,
            line_count: texts.len(),
            lines: texts.iter().map(|t| (t.to_string(), 1)).collect(),
            status: ExtractionStatus::Success,
            error: None,
        }
    }

    #[test]
    fn schema_union_stays_in_vocabulary_order() {
        let v = vocab();
        let mut ds = Dataset::new(&v);
        // Document A introduces District + FIR No, B later introduces Accused.
        ds.push(process_document(
            &doc("a.txt", &["District: Pune", "FIR No: 7/2023"]),
            &v,
        ));
        ds.push(process_document(&doc("b.txt", &["Accused: Doe"]), &v));

        assert_eq!(
            ds.columns(),
            vec!["source", "pages", "lines", "status", "error", "District", "FIR No", "Accused"]
        );

        let rows: Vec<Vec<String>> = ds.rows().collect();
        // Row A has an empty Accused cell, row B empty District/FIR No.
        assert_eq!(rows[0][5], "Pune");
        assert_eq!(rows[0][7], "");
        assert_eq!(rows[1][5], "");
        assert_eq!(rows[1][7], "Doe");
    }

    #[test]
    fn discovery_order_does_not_change_columns() {
        let v = vocab();
        let mut ds = Dataset::new(&v);
        ds.push(process_document(&doc("b.txt", &["Accused: Doe"]), &v));
        ds.push(process_document(&doc("a.txt", &["District: Pune"]), &v));
        // Accused was discovered first but District precedes it in the vocabulary.
        assert_eq!(
            ds.columns()[5..],
            ["District".to_string(), "Accused".to_string()]
        );
    }

    #[test]
    fn unseen_headings_stay_out_of_the_schema() {
        let v = vocab();
        let mut ds = Dataset::new(&v);
        ds.push(process_document(&doc("a.txt", &["District: Pune"]), &v));
        assert_eq!(ds.heading_column_count(), 1);
        assert!(!ds.columns().contains(&"FIR No".to_string()));
    }

    #[test]
    fn error_document_renders_full_row() {
        let v = vocab();
        let mut ds = Dataset::new(&v);
        ds.push(process_document(&doc("a.txt", &["District: Pune"]), &v));
        let mut bad = doc("bad.txt", &[]);
        bad.status = ExtractionStatus::Error;
        bad.error = Some("ocr failed".to_string());
        ds.push(process_document(&bad, &v));

        let rows: Vec<Vec<String>> = ds.rows().collect();
        assert_eq!(rows[1].len(), ds.columns().len());
        assert_eq!(rows[1][3], "ERROR");
        assert_eq!(rows[1][4], "ocr failed");
        assert_eq!(rows[1][5], "");
    }

    #[test]
    fn empty_document_yields_metadata_only_row() {
        let v = vocab();
        let mut ds = Dataset::new(&v);
        ds.push(process_document(&doc("empty.txt", &[]), &v));
        assert_eq!(ds.columns().len(), METADATA_COLUMNS.len());
        let rows: Vec<Vec<String>> = ds.rows().collect();
        assert_eq!(rows[0][3], "SUCCESS");
    }
}
