//! Generation endpoint payloads.
//!
//! The exam generator returns raw exam text and, optionally, an already
//! structured `examJson`. The structured form is preferred when it is
//! well-formed; the text parser is the fallback.

use serde::{Deserialize, Serialize};

use crate::error::ExamError;
use crate::model::{ChoiceOption, ExamModel, OptionKey, ParsedExam, Question, QuestionKind};
use crate::sections::split_sections;

/// Request body sent to the exam generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub material_ids: Vec<i64>,
    pub count: u32,
    pub difficulty: String,
    pub exam_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<i64>,
}

/// A citation back to a source material chunk. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub source_no: u32,
    pub chunk_id: i64,
    pub material_title: String,
    #[serde(default)]
    pub page_start: Option<u32>,
    #[serde(default)]
    pub page_end: Option<u32>,
}

impl Reference {
    /// Human-readable page range, e.g. `p. 4` or `pp. 4-7`.
    pub fn page_label(&self) -> Option<String> {
        match (self.page_start, self.page_end) {
            (Some(start), Some(end)) if end != start => Some(format!("pp. {start}-{end}")),
            (Some(page), _) | (None, Some(page)) => Some(format!("p. {page}")),
            (None, None) => None,
        }
    }
}

/// Response body from the exam generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub exam: String,
    #[serde(default)]
    pub exam_json: Option<ExamJson>,
    pub conversation_id: i64,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// Structured exam as emitted by the generator. Fields are loosely typed on
/// the wire and checked before use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamJson {
    #[serde(default)]
    pub questions: Vec<ExamJsonQuestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamJsonQuestion {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default, alias = "question")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub options: Vec<ExamJsonOption>,
    #[serde(default)]
    pub correct_option: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamJsonOption {
    pub key: String,
    pub text: String,
}

impl ExamJsonQuestion {
    /// Convert to a model question, or `None` if a required field is missing
    /// or an option letter is not A-D.
    fn to_question(&self) -> Option<Question> {
        let id = self.id.filter(|&id| id > 0)?;
        let prompt = self.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty())?;

        let kind = if self.options.is_empty() {
            QuestionKind::Text {
                keywords: self.keywords.clone(),
            }
        } else {
            let options = self
                .options
                .iter()
                .map(|o| {
                    Some(ChoiceOption {
                        key: o.key.trim().parse::<OptionKey>().ok()?,
                        text: o.text.trim().to_string(),
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            let correct_option = match self.correct_option.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(letter) => Some(letter.parse::<OptionKey>().ok()?),
            };
            QuestionKind::Mcq {
                options,
                correct_option,
            }
        };

        Some(Question {
            id,
            prompt: prompt.to_string(),
            points: self.points.filter(|p| *p > 0.0).unwrap_or(1.0),
            correct_answer: self.correct_answer.clone().unwrap_or_default(),
            explanation: self.explanation.clone(),
            kind,
        })
    }
}

impl ExamJson {
    /// Convert every question, or `None` if the list is empty or any entry
    /// is malformed.
    pub fn to_model(&self) -> Option<ExamModel> {
        if self.questions.is_empty() {
            return None;
        }
        self.questions
            .iter()
            .map(ExamJsonQuestion::to_question)
            .collect::<Option<Vec<_>>>()
            .map(ExamModel::new)
    }
}

impl GenerationResponse {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self, ExamError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Build the exam model, preferring the structured payload.
    pub fn to_model(&self) -> Option<ExamModel> {
        self.to_parsed().model
    }

    /// Split the exam text and attach the best available model.
    pub fn to_parsed(&self) -> ParsedExam {
        if let Some(json) = &self.exam_json {
            match json.to_model() {
                Some(model) => {
                    return ParsedExam {
                        sections: split_sections(&self.exam),
                        model: Some(model),
                    };
                }
                None => tracing::warn!(
                    conversation_id = self.conversation_id,
                    "examJson present but malformed, parsing exam text instead"
                ),
            }
        }
        ParsedExam::parse(&self.exam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_ONLY: &str = r#"{
        "exam": "Questions\n1. What is 2+2?\nA) 3\nB) 4\n\nAnswers\n1) B — four",
        "conversationId": 42,
        "references": [
            {"sourceNo": 1, "chunkId": 900, "materialTitle": "Arithmetic", "pageStart": 3, "pageEnd": 5}
        ]
    }"#;

    #[test]
    fn text_only_response_is_parsed() {
        let response = GenerationResponse::from_json(TEXT_ONLY).unwrap();
        assert_eq!(response.conversation_id, 42);
        assert!(response.exam_json.is_none());
        assert_eq!(response.references[0].material_title, "Arithmetic");

        let model = response.to_model().unwrap();
        assert_eq!(model.questions[0].correct_option(), Some(OptionKey::B));
    }

    #[test]
    fn structured_payload_is_preferred() {
        let body = r#"{
            "exam": "1. Text version",
            "examJson": {"questions": [
                {"id": 1, "prompt": "Capital of France?", "points": 2,
                 "options": [{"key": "A", "text": "Paris"}, {"key": "B", "text": "Rome"}],
                 "correctOption": "A", "correctAnswer": "Paris"},
                {"id": 2, "question": "Define osmosis", "keywords": ["water", "membrane"]}
            ]},
            "conversationId": 7
        }"#;
        let response = GenerationResponse::from_json(body).unwrap();
        let model = response.to_model().unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.questions[0].prompt, "Capital of France?");
        assert_eq!(model.questions[0].points, 2.0);
        assert_eq!(model.questions[0].correct_option(), Some(OptionKey::A));
        assert_eq!(model.questions[1].keywords(), ["water", "membrane"]);
    }

    #[test]
    fn malformed_structured_payload_falls_back_to_text() {
        let body = r#"{
            "exam": "1. Text version",
            "examJson": {"questions": [{"id": 1, "prompt": "Bad", "options": [{"key": "Z", "text": "?"}]}]},
            "conversationId": 7
        }"#;
        let response = GenerationResponse::from_json(body).unwrap();
        let model = response.to_model().unwrap();
        assert_eq!(model.questions[0].prompt, "Text version");
    }

    #[test]
    fn empty_structured_payload_falls_back() {
        let body = r#"{"exam": "", "examJson": {"questions": []}, "conversationId": 1}"#;
        let parsed = GenerationResponse::from_json(body).unwrap().to_parsed();
        assert!(parsed.is_fallback());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = GenerationResponse::from_json("{not json").unwrap_err();
        assert!(matches!(err, ExamError::InvalidResponse(_)));
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerationRequest {
            material_ids: vec![1, 2],
            count: 10,
            difficulty: "medium".into(),
            exam_type: "mixed".into(),
            conversation_id: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["materialIds"], serde_json::json!([1, 2]));
        assert_eq!(value["examType"], "mixed");
        assert!(value.get("conversationId").is_none());
    }

    #[test]
    fn reference_page_labels() {
        let mut r = Reference {
            source_no: 1,
            chunk_id: 1,
            material_title: "T".into(),
            page_start: Some(4),
            page_end: Some(7),
        };
        assert_eq!(r.page_label().as_deref(), Some("pp. 4-7"));
        r.page_end = Some(4);
        assert_eq!(r.page_label().as_deref(), Some("p. 4"));
        r.page_start = None;
        r.page_end = None;
        assert_eq!(r.page_label(), None);
    }
}
