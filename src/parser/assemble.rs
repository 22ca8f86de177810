use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::input::{DocumentInput, ExtractionStatus};
use crate::parser::grouper::Section;
use crate::vocab::HeadingVocabulary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    pub pos: usize,
    pub heading: String,
    pub value: String,
}

/// One flat record per document: fixed metadata plus one assembled value
/// per distinct heading encountered, sorted by vocabulary position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub source: String,
    pub pages: u32,
    pub lines: usize,
    pub status: ExtractionStatus,
    pub error: Option<String>,
    pub fields: Vec<FieldValue>,
}

impl DocumentRecord {
    pub fn value(&self, pos: usize) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.pos == pos)
            .map(|f| f.value.as_str())
    }

    pub fn field_map(&self) -> BTreeMap<&str, &str> {
        self.fields
            .iter()
            .map(|f| (f.heading.as_str(), f.value.as_str()))
            .collect()
    }
}

/// Fold a document's closed sections into one record. Pure: the same
/// section list always produces a byte-identical record. Section content
/// lines are joined with a single space; repeated headings concatenate
/// their instances with " | " in document order.
pub fn assemble(
    sections: &[Section],
    input: &DocumentInput,
    vocab: &HeadingVocabulary,
) -> DocumentRecord {
    let mut values: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for section in sections {
        if let Some(pos) = section.pos {
            values
                .entry(pos)
                .or_default()
                .push(section.lines.join(" ").trim().to_string());
        }
    }

    let fields = values
        .into_iter()
        .map(|(pos, texts)| FieldValue {
            pos,
            heading: vocab.canonical(pos).to_string(),
            value: texts.iter().filter(|t| !t.is_empty()).join(" | "),
        })
        .collect();

    DocumentRecord {
        source: input.source_name.clone(),
        pages: input.page_count,
        lines: input.line_count,
        status: input.status,
        error: input.error.clone(),
        fields,
    }
}

/// Record for a document whose extraction failed: metadata and the error
/// survive, heading fields stay empty. Never aborts the batch.
pub fn error_record(input: &DocumentInput) -> DocumentRecord {
    DocumentRecord {
        source: input.source_name.clone(),
        pages: input.page_count,
        lines: input.line_count,
        status: input.status,
        error: input.error.clone(),
        fields: Vec::new(),
    }
}
