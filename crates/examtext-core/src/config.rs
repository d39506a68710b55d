//! examtext configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringPolicy;

/// Output format for CLI commands that print a model or grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

/// Top-level examtext configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamtextConfig {
    /// Free-text grading thresholds.
    #[serde(default)]
    pub scoring: ScoringPolicy,
    /// Format used when a command is not given `--format`.
    #[serde(default = "default_format")]
    pub default_format: OutputFormat,
    /// Where rendered files go when no explicit output path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./examtext-output")
}

impl Default for ExamtextConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringPolicy::default(),
            default_format: default_format(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `examtext.toml` in the current directory
/// 2. `~/.config/examtext/config.toml`
///
/// Environment variable override: `EXAMTEXT_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamtextConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examtext.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamtextConfig::default(),
    };

    if let Ok(dir) = std::env::var("EXAMTEXT_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Parse a TOML config string, expanding `${VAR}` in `output_dir`.
pub fn parse_config_str(content: &str) -> Result<ExamtextConfig> {
    let mut config: ExamtextConfig = toml::from_str(content)?;
    let output_dir = resolve_env_vars(&config.output_dir.to_string_lossy());
    config.output_dir = PathBuf::from(output_dir);

    let s = &config.scoring;
    if !(0.0..=1.0).contains(&s.partial_credit_ratio)
        || !(0.0..=1.0).contains(&s.full_credit_ratio)
        || s.partial_credit_ratio > s.full_credit_ratio
    {
        return Err(crate::error::ExamError::Config(
            "scoring ratios must satisfy 0 <= partial_credit_ratio <= full_credit_ratio <= 1"
                .into(),
        )
        .into());
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examtext"))
}
