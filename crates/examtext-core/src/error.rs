//! Error types for examtext.
//!
//! Parsing and scoring never fail. These errors only cover the boundaries
//! where external data enters: generation responses, files, and config.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading exam inputs.
#[derive(Debug, Error)]
pub enum ExamError {
    /// A generation response could not be decoded.
    #[error("invalid generation response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was present but unusable.
    #[error("invalid config: {0}")]
    Config(String),
}
