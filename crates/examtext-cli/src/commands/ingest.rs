//! The `examtext ingest` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use examtext_core::response::GenerationResponse;

use super::read_input;

pub fn execute(response_path: PathBuf) -> Result<()> {
    let body = read_input(&response_path)?;
    let response = GenerationResponse::from_json(&body)
        .with_context(|| format!("failed to decode {}", response_path.display()))?;

    tracing::info!(
        conversation_id = response.conversation_id,
        references = response.references.len(),
        "loaded generation response"
    );

    let parsed = response.to_parsed();
    match &parsed.model {
        Some(model) => println!("{}", serde_json::to_string_pretty(model)?),
        None => {
            eprintln!("Warning: no structured questions available, showing raw questions section.");
            println!("{}", parsed.sections.questions);
        }
    }

    if !response.references.is_empty() {
        eprintln!("References:");
        for r in &response.references {
            match r.page_label() {
                Some(pages) => eprintln!("  [{}] {}, {}", r.source_no, r.material_title, pages),
                None => eprintln!("  [{}] {}", r.source_no, r.material_title),
            }
        }
    }

    Ok(())
}
