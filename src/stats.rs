use crate::input::ExtractionStatus;
use crate::parser::assemble::DocumentRecord;

/// Per-run counters, tallied in the sequential reduce step.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
    pub fields_extracted: usize,
    pub preamble_only: usize,
}

impl RunSummary {
    pub fn record(&mut self, record: &DocumentRecord) {
        self.total += 1;
        match record.status {
            ExtractionStatus::Success => self.ok += 1,
            ExtractionStatus::Error => self.errors += 1,
        }
        self.fields_extracted += record.fields.len();
        if record.fields.is_empty() && record.status == ExtractionStatus::Success {
            self.preamble_only += 1;
        }
    }

    pub fn print(&self, heading_columns: usize) {
        println!(
            "Processed {} documents ({} ok, {} errors).",
            self.total, self.ok, self.errors
        );
        println!(
            "Extracted {} field values across {} heading columns.",
            self.fields_extracted, heading_columns
        );
        if self.preamble_only > 0 {
            println!(
                "{} documents matched no headings (preamble only).",
                self.preamble_only
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::assemble::FieldValue;

    fn record(status: ExtractionStatus, fields: usize) -> DocumentRecord {
        DocumentRecord {
            source: "x.txt".to_string(),
            pages: 1,
            lines: 1,
            status,
            error: None,
            fields: (0..fields)
                .map(|pos| FieldValue {
                    pos,
                    heading: format!("H{}", pos),
                    value: "v".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn tallies_status_and_fields() {
        let mut s = RunSummary::default();
        s.record(&record(ExtractionStatus::Success, 3));
        s.record(&record(ExtractionStatus::Success, 0));
        s.record(&record(ExtractionStatus::Error, 0));
        assert_eq!(s.total, 3);
        assert_eq!(s.ok, 2);
        assert_eq!(s.errors, 1);
        assert_eq!(s.fields_extracted, 3);
        assert_eq!(s.preamble_only, 1);
    }
}
