use std::collections::{HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::parser::lines::normalize;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("vocabulary has no entries")]
    Empty,
    #[error("duplicate canonical heading: {0}")]
    Duplicate(String),
    #[error("heading normalizes to an empty string: {0:?}")]
    Blank(String),
    #[error("failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse vocabulary file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid heading pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadingEntry {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// One normalized form (canonical or alias) a line can be matched against.
#[derive(Debug)]
pub struct Form {
    pub norm: String,
    /// Position of the owning entry in the vocabulary.
    pub pos: usize,
    /// Anchored prefix pattern over the raw line: the form's tokens joined
    /// by `\s+`, then a run of separator characters (`.`, `:`, `-`,
    /// whitespace), then the rest.
    pub pattern: Regex,
}

/// Ordered, immutable heading vocabulary with a precomputed lookup index.
/// Entry order defines the column order of the final dataset.
#[derive(Debug)]
pub struct HeadingVocabulary {
    entries: Vec<HeadingEntry>,
    forms: Vec<Form>,
    exact: HashMap<String, usize>,
}

impl HeadingVocabulary {
    pub fn new(entries: Vec<HeadingEntry>) -> Result<Self, VocabError> {
        if entries.is_empty() {
            return Err(VocabError::Empty);
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut forms = Vec::new();
        let mut exact = HashMap::new();

        for (pos, entry) in entries.iter().enumerate() {
            let canon_norm = normalize(&entry.canonical);
            if canon_norm.is_empty() {
                return Err(VocabError::Blank(entry.canonical.clone()));
            }
            if !seen.insert(canon_norm) {
                return Err(VocabError::Duplicate(entry.canonical.clone()));
            }

            for raw_form in std::iter::once(&entry.canonical).chain(entry.aliases.iter()) {
                let norm = normalize(raw_form);
                if norm.is_empty() {
                    return Err(VocabError::Blank(raw_form.clone()));
                }
                // Earlier entries win on identical forms (alias shadowing).
                exact.entry(norm.clone()).or_insert(pos);
                forms.push(Form {
                    pattern: build_pattern(&norm)?,
                    norm,
                    pos,
                });
            }
        }

        Ok(HeadingVocabulary {
            entries,
            forms,
            exact,
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, VocabError> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<HeadingEntry> = serde_json::from_str(&raw)?;
        Self::new(entries)
    }

    /// The standard FIR field inventory, with aliases for the spellings
    /// OCR output actually contains.
    pub fn default_fir() -> Result<Self, VocabError> {
        let entries = [
            ("District", vec![]),
            ("Police Station", vec!["P.S.", "PS Name", "Station"]),
            ("FIR No", vec!["FIR Number", "F.I.R. No", "First Information Report No"]),
            ("FIR Date", vec!["Date of FIR", "Date"]),
            ("Year", vec![]),
            ("Acts", vec!["Act"]),
            ("Sections", vec!["Section", "U/S"]),
            ("Occurrence Date", vec!["Date of Occurrence"]),
            ("Occurrence Time", vec!["Time of Occurrence"]),
            ("GD Entry No", vec!["G.D. Entry No", "GD No", "General Diary Reference"]),
            ("Information Type", vec!["Type of Information"]),
            ("Place of Occurrence", vec![]),
            ("Direction and Distance from PS", vec!["Distance from PS"]),
            ("Address of Occurrence", vec![]),
            ("Complainant", vec!["Complainant Name", "Informant", "Name of Complainant"]),
            ("Father's Name", vec!["Father Name"]),
            ("Date of Birth", vec!["DOB"]),
            ("Nationality", vec![]),
            ("Mobile Number", vec!["Mobile No", "Phone"]),
            ("Present Address", vec![]),
            ("Permanent Address", vec![]),
            ("Accused", vec!["Accused Persons", "Details of Accused"]),
            ("FIR Contents", vec!["Brief Facts", "Complaint Details", "Contents"]),
            ("Investigating Officer", vec!["I.O. Name", "IO Name"]),
            ("Rank", vec![]),
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(canonical, aliases)| HeadingEntry {
                    canonical: canonical.to_string(),
                    aliases: aliases.into_iter().map(str::to_string).collect(),
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn canonical(&self, pos: usize) -> &str {
        &self.entries[pos].canonical
    }

    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    /// Exact lookup over normalized forms; earliest vocabulary position wins.
    pub fn exact_pos(&self, norm: &str) -> Option<usize> {
        self.exact.get(norm).copied()
    }
}

fn build_pattern(norm: &str) -> Result<Regex, regex::Error> {
    let body = norm
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    // A trailing word boundary stops "FIR No" from matching inside
    // "FIR Nothing...". Forms ending in punctuation skip it.
    let boundary = if norm.ends_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    // The separator run also consumes dots, so dotted spellings like
    // "FIR No.: 123" or "P.S. Ramnagar" leave a clean trailing value.
    Regex::new(&format!(r"(?i)^{}{}[\s.:\-]*(.*)$", body, boundary))
}
