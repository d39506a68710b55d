//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};

use examtext_core::config::OutputFormat;
use examtext_core::model::AnswerMap;
use examtext_core::ExamError;

pub mod grade;
pub mod ingest;
pub mod init;
pub mod parse;
pub mod render;
pub mod validate;

/// Read a UTF-8 input file.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|source| ExamError::Io {
            path: path.to_path_buf(),
            source,
        })
        .context("failed to load exam input")
}

/// Load a learner answers file: a JSON object keyed by question id.
pub fn load_answers(path: &Path) -> Result<AnswerMap> {
    let content = read_input(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}

/// Resolve `--format`, falling back to the configured default.
pub fn resolve_format(format: Option<&str>, default: OutputFormat) -> Result<OutputFormat> {
    match format {
        Some(f) => f.parse().map_err(|e: String| anyhow::anyhow!("{}", e)),
        None => Ok(default),
    }
}
