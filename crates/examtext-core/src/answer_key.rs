//! Answer-key merging.
//!
//! Answer-key lines look like `3) B — explanation` for multiple-choice
//! questions or `3) free text answer` otherwise. Each line is attached to the
//! question with the matching id.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{OptionKey, Question, QuestionKind};

static ANSWER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\)\s+(.*)$").expect("valid regex"));
static CHOICE_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-D])\s*—\s*(.*)$").expect("valid regex"));

/// A single decoded answer-key entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerEntry {
    pub id: u32,
    /// Present when the entry names an option letter.
    pub option: Option<OptionKey>,
    pub answer: String,
}

/// Decode one answer-key line, or `None` if it is not an answer entry.
pub fn parse_answer_line(line: &str) -> Option<AnswerEntry> {
    let caps = ANSWER_LINE.captures(line.trim())?;
    let id = caps[1].parse::<u32>().ok()?;
    let rest = caps[2].trim();

    let choice = CHOICE_ANSWER
        .captures(rest)
        .and_then(|c| Some((c[1].parse::<OptionKey>().ok()?, c[2].trim().to_string())));

    Some(match choice {
        Some((option, answer)) => AnswerEntry {
            id,
            option: Some(option),
            answer,
        },
        None => AnswerEntry {
            id,
            option: None,
            answer: rest.to_string(),
        },
    })
}

/// Attach answer-key entries to `questions` in place.
///
/// Entries for unknown ids are dropped. When several entries name the same
/// id the last one wins. With duplicate question ids only the first question
/// carrying that id is updated. Returns the number of entries applied.
pub fn merge_answers(text: &str, questions: &mut [Question]) -> usize {
    let mut by_id: HashMap<u32, usize> = HashMap::new();
    for (idx, q) in questions.iter().enumerate() {
        by_id.entry(q.id).or_insert(idx);
    }

    let mut applied = 0;
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let Some(entry) = parse_answer_line(line) else {
            continue;
        };
        let Some(&idx) = by_id.get(&entry.id) else {
            tracing::debug!(id = entry.id, "answer key entry has no matching question");
            continue;
        };
        apply_entry(&mut questions[idx], entry);
        applied += 1;
    }
    applied
}

fn apply_entry(question: &mut Question, entry: AnswerEntry) {
    question.correct_answer = entry.answer;
    if let Some(option) = entry.option {
        // Text questions have nowhere to store a letter; the answer text is kept.
        if let QuestionKind::Mcq { correct_option, .. } = &mut question.kind {
            *correct_option = Some(option);
        }
    }
}
