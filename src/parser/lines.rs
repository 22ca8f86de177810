/// One recognized line of a document, carrying both the original-case text
/// (used for content assembly) and the normalized comparison form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub raw: String,
    pub norm: String,
    pub page: u32,
    pub index: usize,
}

/// Comparison form: trimmed, internal whitespace collapsed, lowercased,
/// trailing `:`/`-`/`.` stripped.
pub fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '.'))
        .to_lowercase()
}

/// Build comparison lines from the extraction output. Lines whose
/// normalized form is empty are dropped here; the raw recognized-line
/// count stays with the document metadata.
pub fn build_lines(raw_lines: &[(String, u32)]) -> Vec<Line> {
    raw_lines
        .iter()
        .enumerate()
        .filter_map(|(index, (text, page))| {
            let norm = normalize(text);
            if norm.is_empty() {
                return None;
            }
            Some(Line {
                raw: text.trim().to_string(),
                norm,
                page: *page,
                index,
            })
        })
        .collect()
}
