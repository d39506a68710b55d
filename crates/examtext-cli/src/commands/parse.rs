//! The `examtext parse` and `examtext sections` commands.

use std::path::PathBuf;

use anyhow::Result;

use examtext_core::config::{load_config_from, OutputFormat};
use examtext_core::model::{ParsedExam, Question};
use examtext_core::sections::split_sections;
use examtext_report::markdown::generate_markdown;

use super::{read_input, resolve_format};

pub fn sections(input: PathBuf) -> Result<()> {
    let text = read_input(&input)?;
    let sections = split_sections(&text);
    println!("{}", serde_json::to_string_pretty(&sections)?);
    Ok(())
}

pub fn execute(input: PathBuf, format: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = resolve_format(format.as_deref(), config.default_format)?;

    let text = read_input(&input)?;
    let parsed = ParsedExam::parse(&text);

    if format == OutputFormat::Markdown {
        let title = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Exam".to_string());
        print!("{}", generate_markdown(&title, &parsed, None));
        return Ok(());
    }

    let Some(model) = &parsed.model else {
        eprintln!("Warning: no numbered questions found, showing raw questions section.");
        println!("{}", parsed.sections.questions);
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(model)?),
        _ => {
            println!("{} question(s)", model.len());
            for q in &model.questions {
                println!("{}", describe(q));
            }
        }
    }

    Ok(())
}

fn describe(q: &Question) -> String {
    let answer = match (q.correct_option(), q.correct_answer.is_empty()) {
        (Some(key), _) => format!("answer {key}"),
        (None, false) => "answer given".to_string(),
        (None, true) => "no answer".to_string(),
    };
    if q.is_mcq() {
        format!(
            "  {}. [mcq, {} options, {answer}] {}",
            q.id,
            q.options().len(),
            q.prompt
        )
    } else {
        format!("  {}. [text, {answer}] {}", q.id, q.prompt)
    }
}
