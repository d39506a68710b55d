//! The `examtext render` command.

use std::path::PathBuf;

use anyhow::Result;

use examtext_core::config::load_config_from;
use examtext_core::model::ExamModel;
use examtext_core::scoring::grade_with;
use examtext_report::html::write_html;

use super::{load_answers, read_input};

pub fn execute(
    input: PathBuf,
    output: Option<PathBuf>,
    answers_path: Option<PathBuf>,
    title: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let text = read_input(&input)?;
    let Some(model) = ExamModel::from_text(&text) else {
        anyhow::bail!(
            "no numbered questions found in {}; nothing to render",
            input.display()
        );
    };

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "exam".to_string());
    let title = title.unwrap_or_else(|| stem.clone());
    let output = output.unwrap_or_else(|| config.output_dir.join(format!("{stem}.html")));

    let report = match answers_path {
        Some(path) => {
            let answers = load_answers(&path)?;
            Some(grade_with(&config.scoring, &model, &answers))
        }
        None => None,
    };

    write_html(&title, &model, report.as_ref(), &output)?;
    eprintln!("HTML exam: {}", output.display());

    Ok(())
}
