//! Advisory checks over a parsed exam.
//!
//! Nothing here rejects a model; the warnings only point at things a grader
//! would likely want to fix before handing the exam out.

use std::collections::HashSet;

use crate::model::{ExamModel, QuestionKind};

/// A warning from exam validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate an exam model for common issues.
pub fn validate_model(model: &ExamModel) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if model.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "exam has no questions".into(),
        });
        return warnings;
    }

    let mut seen_ids = HashSet::new();
    for q in &model.questions {
        if !seen_ids.insert(q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: format!("duplicate question id: {}", q.id),
            });
        }
    }

    for q in &model.questions {
        match &q.kind {
            QuestionKind::Mcq {
                options,
                correct_option,
            } => {
                if correct_option.is_none() {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id),
                        message: "multiple-choice question has no correct option".into(),
                    });
                } else if !options.iter().any(|o| Some(o.key) == *correct_option) {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id),
                        message: "correct option is not among the listed options".into(),
                    });
                }
            }
            QuestionKind::Text { keywords } => {
                if q.correct_answer.trim().is_empty() {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id),
                        message: "free-text question has no answer key entry".into(),
                    });
                }
                if keywords.is_empty() {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id),
                        message: "no keywords; answers will receive fallback credit".into(),
                    });
                }
            }
        }
    }

    warnings
}
