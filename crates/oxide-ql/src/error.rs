//! Error types for the command-line tool.

use std::path::PathBuf;

use oxide_ql_core::ParseError;

/// Errors that can occur while inspecting a batch.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path of the input, `-` for stdin.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The batch is not valid SQL.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The scanner hit input it could not tokenize.
    #[error("Scan error at {start}..{end}: {message}")]
    Scan {
        /// Error message from the scanner.
        message: String,
        /// Start of the offending bytes.
        start: usize,
        /// End of the offending bytes.
        end: usize,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
