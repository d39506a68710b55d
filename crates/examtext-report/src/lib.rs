//! examtext-report — presentation of parsed and graded exams.
//!
//! Renderers only read the core's output types; they never parse or grade.

pub mod html;
pub mod markdown;
