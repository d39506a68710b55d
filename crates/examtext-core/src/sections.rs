//! Section splitting for generated exam documents.
//!
//! A document may carry up to three headed sections (questions, answer key,
//! references) in any order. Headers are whole lines; each section runs from
//! its header to the next recognized header or the end of the document.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static QUESTIONS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:questions|exam questions)\b").expect("valid regex"));
static ANSWERS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:answers|answer key)\b").expect("valid regex"));
static REFERENCES_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:references|sources)\b").expect("valid regex"));

/// The three recognized sections of an exam document plus the trimmed input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSections {
    pub questions: String,
    pub answers: String,
    pub references: String,
    /// Always the full trimmed input.
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Questions,
    Answers,
    References,
}

/// Split a document into its headed sections.
///
/// Never fails. When no header line is present the whole trimmed input is
/// treated as the questions section and the other sections are empty.
pub fn split_sections(text: &str) -> DocumentSections {
    let raw = text.trim().to_string();
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.lines().collect();

    let mut found: Vec<(usize, SectionKind)> = [
        (&*QUESTIONS_HEADER, SectionKind::Questions),
        (&*ANSWERS_HEADER, SectionKind::Answers),
        (&*REFERENCES_HEADER, SectionKind::References),
    ]
    .into_iter()
    .filter_map(|(pattern, kind)| {
        lines
            .iter()
            .position(|line| pattern.is_match(line.trim()))
            .map(|idx| (idx, kind))
    })
    .collect();

    if found.is_empty() {
        tracing::debug!("no section headers found, treating whole document as questions");
        return DocumentSections {
            questions: raw.clone(),
            answers: String::new(),
            references: String::new(),
            raw,
        };
    }

    found.sort_by_key(|(idx, _)| *idx);

    let mut sections = DocumentSections {
        raw,
        ..Default::default()
    };

    for (i, (start, kind)) in found.iter().enumerate() {
        let end = found.get(i + 1).map_or(lines.len(), |(next, _)| *next);
        let body = lines[start + 1..end].join("\n").trim().to_string();
        match kind {
            SectionKind::Questions => sections.questions = body,
            SectionKind::Answers => sections.answers = body,
            SectionKind::References => sections.references = body,
        }
    }

    sections
}
