//! examtext-core — Exam text parsing, answer-key merging, and scoring.
//!
//! This crate turns a semi-structured exam document (questions, answer key,
//! references) into a typed model and grades a learner's answers against it.
//! Nothing in here performs I/O except the config loader.

pub mod answer_key;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod response;
pub mod scoring;
pub mod sections;
pub mod validate;

pub use error::ExamError;
pub use model::{AnswerMap, ExamModel, ParsedExam, Question, QuestionKind};
pub use scoring::{grade, score, GradeReport, ScoreSummary};
pub use sections::{split_sections, DocumentSections};
