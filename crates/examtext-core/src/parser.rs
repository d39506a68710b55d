//! Question section parser.
//!
//! Walks the questions section line by line. A numbered stem (`3. ...`)
//! opens a question; lettered lines (`A) ...`) directly beneath it become its
//! options. Whether a question is multiple-choice is decided only by the
//! presence of those option lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ChoiceOption, OptionKey, Question};

static STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").expect("valid regex"));
static OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ABCD])\)\s+(.*)$").expect("valid regex"));

/// Parse the questions section into questions in authored order.
///
/// Returned questions carry no answer-key data yet. Returns `None` when not
/// a single numbered stem is found. Ids are taken verbatim: duplicates and
/// out-of-order numbering pass through untouched.
pub fn parse_questions(text: &str) -> Option<Vec<Question>> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut questions = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = lines[cursor].trim();
        cursor += 1;

        let Some((id, prompt)) = parse_stem(line) else {
            if !line.is_empty() {
                tracing::debug!(line, "skipping line outside any question");
            }
            continue;
        };

        let mut options = Vec::new();
        while cursor < lines.len() {
            let candidate = lines[cursor].trim();
            if candidate.is_empty() {
                cursor += 1;
                break;
            }
            match parse_option(candidate) {
                Some(option) => {
                    options.push(option);
                    cursor += 1;
                }
                None => break,
            }
        }

        questions.push(if options.is_empty() {
            Question::text(id, prompt)
        } else {
            Question::mcq(id, prompt, options)
        });
    }

    if questions.is_empty() {
        None
    } else {
        Some(questions)
    }
}

fn parse_stem(line: &str) -> Option<(u32, &str)> {
    let caps = STEM.captures(line)?;
    let id = match caps[1].parse::<u32>() {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(line, "question number out of range: {e}");
            return None;
        }
    };
    let prompt = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some((id, prompt))
}

fn parse_option(line: &str) -> Option<ChoiceOption> {
    let caps = OPTION.captures(line)?;
    let key = caps[1].parse::<OptionKey>().ok()?;
    Some(ChoiceOption {
        key,
        text: caps[2].trim().to_string(),
    })
}
