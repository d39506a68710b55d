//! Core data model types for examtext.
//!
//! A parsed exam is an ordered list of questions. Each question is either
//! multiple-choice or free-text, decided purely by whether option lines were
//! found under its stem.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::answer_key::merge_answers;
use crate::parser::parse_questions;
use crate::sections::{split_sections, DocumentSections};

/// Learner answers keyed by question id.
///
/// MCQ answers hold the selected option letter, text answers hold free text.
pub type AnswerMap = HashMap<u32, String>;

/// Label of a multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    /// All keys in display order.
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = String;

    /// Parses an uppercase letter exactly; `"b"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionKey::A),
            "B" => Ok(OptionKey::B),
            "C" => Ok(OptionKey::C),
            "D" => Ok(OptionKey::D),
            other => Err(format!("unknown option key: {other}")),
        }
    }
}

/// A single lettered option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub key: OptionKey,
    pub text: String,
}

/// The kind-specific part of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum QuestionKind {
    /// Multiple choice. `options` is never empty for parsed questions.
    Mcq {
        options: Vec<ChoiceOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correct_option: Option<OptionKey>,
    },
    /// Free text, graded by keyword overlap when keywords are known.
    Text {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        keywords: Vec<String>,
    },
}

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Numeric label as authored. Not renumbered or deduplicated.
    pub id: u32,
    /// Trimmed question stem.
    pub prompt: String,
    /// Points available. Scoring treats anything below 1 as 1.
    #[serde(default = "default_points")]
    pub points: f64,
    /// Correct answer text from the answer key; empty if none was found.
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

fn default_points() -> f64 {
    1.0
}

impl Question {
    /// A free-text question with default points and no answer attached.
    pub fn text(id: u32, prompt: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            points: default_points(),
            correct_answer: String::new(),
            explanation: None,
            kind: QuestionKind::Text {
                keywords: Vec::new(),
            },
        }
    }

    /// A multiple-choice question with default points and no answer attached.
    pub fn mcq(id: u32, prompt: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            points: default_points(),
            correct_answer: String::new(),
            explanation: None,
            kind: QuestionKind::Mcq {
                options,
                correct_option: None,
            },
        }
    }

    pub fn is_mcq(&self) -> bool {
        matches!(self.kind, QuestionKind::Mcq { .. })
    }

    /// Options in authored order; empty for text questions.
    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            QuestionKind::Mcq { options, .. } => options,
            QuestionKind::Text { .. } => &[],
        }
    }

    pub fn correct_option(&self) -> Option<OptionKey> {
        match &self.kind {
            QuestionKind::Mcq { correct_option, .. } => *correct_option,
            QuestionKind::Text { .. } => None,
        }
    }

    /// Grading keywords; empty for MCQ questions.
    pub fn keywords(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Text { keywords } => keywords,
            QuestionKind::Mcq { .. } => &[],
        }
    }

    /// Points actually used for grading.
    pub fn effective_points(&self) -> f64 {
        self.points.max(1.0)
    }
}

/// An ordered, parsed exam.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamModel {
    pub questions: Vec<Question>,
}

impl ExamModel {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Build a model from a raw exam document.
    ///
    /// Runs section splitting, question parsing, and answer-key merging.
    /// Returns `None` when the question section has no numbered stems, in
    /// which case callers should show the raw section text instead.
    pub fn from_text(text: &str) -> Option<Self> {
        ParsedExam::parse(text).model
    }

    /// Build a model from already-split sections.
    pub fn from_sections(sections: &DocumentSections) -> Option<Self> {
        let mut questions = parse_questions(&sections.questions)?;
        merge_answers(&sections.answers, &mut questions);
        Some(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// First question carrying `id`, in parse order.
    pub fn get(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Sum of effective points across all questions.
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(Question::effective_points).sum()
    }
}

/// A document split into sections plus its structured model, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedExam {
    pub sections: DocumentSections,
    /// `None` when no numbered stems were found.
    pub model: Option<ExamModel>,
}

impl ParsedExam {
    pub fn parse(text: &str) -> Self {
        let sections = split_sections(text);
        let model = ExamModel::from_sections(&sections);
        if model.is_none() {
            tracing::debug!("no numbered questions found, falling back to raw section text");
        }
        Self { sections, model }
    }

    /// Whether parsing fell back to raw text.
    pub fn is_fallback(&self) -> bool {
        self.model.is_none()
    }
}
