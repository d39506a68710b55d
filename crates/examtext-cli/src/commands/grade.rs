//! The `examtext grade` command.

use std::path::PathBuf;

use anyhow::Result;

use examtext_core::config::{load_config_from, OutputFormat};
use examtext_core::model::ExamModel;
use examtext_core::scoring::{grade_with, GradeReport};

use super::{load_answers, read_input, resolve_format};

pub fn execute(
    input: PathBuf,
    answers_path: PathBuf,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = resolve_format(format.as_deref(), config.default_format)?;

    let text = read_input(&input)?;
    let Some(model) = ExamModel::from_text(&text) else {
        anyhow::bail!(
            "no numbered questions found in {}; nothing to grade",
            input.display()
        );
    };
    let answers = load_answers(&answers_path)?;

    let unknown = answers
        .keys()
        .filter(|id| model.get(**id).is_none())
        .count();
    if unknown > 0 {
        tracing::warn!("{unknown} answer(s) refer to questions not in the exam");
    }

    let report = grade_with(&config.scoring, &model, &answers);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_summary(&report),
    }

    Ok(())
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Verdict", "Earned", "Points", "Keywords"]);

    for o in &report.outcomes {
        table.add_row(vec![
            Cell::new(o.id),
            Cell::new(o.verdict),
            Cell::new(o.earned),
            Cell::new(o.points),
            Cell::new(o.matched_keywords.join(", ")),
        ]);
    }

    println!("{table}");
    println!(
        "Score: {} / {} ({}%)",
        report.summary.earned, report.summary.total, report.summary.percent
    );
}
