use crate::parser::lines::Line;
use crate::vocab::{Form, HeadingVocabulary};

/// A line recognized as a section heading, possibly with a value carried
/// on the same line ("Police Station : ABC Nagar").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Vocabulary position of the matched entry.
    pub pos: usize,
    pub canonical: String,
    pub inline: Option<String>,
}

/// Deterministic rule matching against the vocabulary, in order:
/// exact normalized equality, then anchored prefix with a separator.
/// Ties go to the longest matched form, then the earlier vocabulary entry,
/// so "FIR No" never shadows "FIR Number".
pub fn match_heading(line: &Line, vocab: &HeadingVocabulary) -> Option<HeadingMatch> {
    if let Some(pos) = vocab.exact_pos(&line.norm) {
        return Some(HeadingMatch {
            pos,
            canonical: vocab.canonical(pos).to_string(),
            inline: None,
        });
    }

    let mut best: Option<(&Form, String)> = None;
    for form in vocab.forms() {
        let Some(caps) = form.pattern.captures(&line.raw) else {
            continue;
        };
        let rest = caps[1].trim().to_string();
        let better = match &best {
            None => true,
            Some((held, _)) => {
                form.norm.len() > held.norm.len()
                    || (form.norm.len() == held.norm.len() && form.pos < held.pos)
            }
        };
        if better {
            best = Some((form, rest));
        }
    }

    best.map(|(form, rest)| HeadingMatch {
        pos: form.pos,
        canonical: vocab.canonical(form.pos).to_string(),
        inline: if rest.is_empty() { None } else { Some(rest) },
    })
}
