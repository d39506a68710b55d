//! The `examtext validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examtext_core::model::ParsedExam;
use examtext_core::validate::validate_model;

use super::read_input;

pub fn execute(input: PathBuf) -> Result<()> {
    let text = read_input(&input)?;
    let parsed = ParsedExam::parse(&text);

    let Some(model) = &parsed.model else {
        println!("Exam: {} (no numbered questions)", input.display());
        println!("  WARNING: questions could not be parsed; learners will see raw text");
        println!("\n1 warning(s) found.");
        return Ok(());
    };

    println!("Exam: {} ({} questions)", input.display(), model.len());

    let warnings = validate_model(model);
    for w in &warnings {
        let prefix = w
            .question_id
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Exam valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
