use crate::parser::lines::Line;
use crate::parser::matcher::match_heading;
use crate::vocab::HeadingVocabulary;

/// A contiguous run of content lines attributed to one heading. `heading`
/// is `None` for the preamble (content before any heading was seen).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: Option<String>,
    /// Vocabulary position of the heading; `None` for the preamble.
    pub pos: Option<usize>,
    pub lines: Vec<String>,
}

impl Section {
    fn preamble() -> Self {
        Section {
            heading: None,
            pos: None,
            lines: Vec::new(),
        }
    }

    pub fn is_preamble(&self) -> bool {
        self.heading.is_none()
    }
}

/// Two-state grouping machine: starts in the preamble, and every matched
/// heading closes the open section and opens a new one. A heading seen a
/// second time opens a fresh section instance; instances are merged later
/// at assembly. The preamble section is always first, even when empty.
pub fn group_sections(lines: &[Line], vocab: &HeadingVocabulary) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::preamble();

    for line in lines {
        match match_heading(line, vocab) {
            Some(m) => {
                sections.push(std::mem::replace(
                    &mut current,
                    Section {
                        heading: Some(m.canonical),
                        pos: Some(m.pos),
                        lines: m.inline.into_iter().collect(),
                    },
                ));
            }
            None => current.lines.push(line.raw.clone()),
        }
    }

    sections.push(current);
    sections
}
