//! Session settings shared by the subcommands.

use std::io::Read;
use std::path::{Path, PathBuf};

use oxide_ql_core::lexer::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use oxide_ql_core::{MemTracker, MemTrackerPtr, ParseContext};
use tracing::Level;

use crate::error::{CliError, Result};

/// Settings for one parse of the input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum bytes of statement text held by live parse trees.
    pub mem_limit: Option<usize>,
    /// Mark the statement as issued internally.
    pub internal: bool,
    /// Mark the parse as a reparse attempt.
    pub reparsed: bool,
    /// Bytes the scanner requests per read.
    pub chunk_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mem_limit: None,
            internal: false,
            reparsed: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SessionConfig {
    /// Creates the memory tracker for the session.
    #[must_use]
    pub fn mem_tracker(&self) -> MemTrackerPtr {
        match self.mem_limit {
            Some(limit) => MemTracker::with_limit("oxide-ql", limit),
            None => MemTracker::new("oxide-ql"),
        }
    }

    /// Creates a parse context owning `stmt`.
    #[must_use]
    pub fn context(&self, stmt: impl Into<String>, mem_tracker: &MemTrackerPtr) -> ParseContext {
        ParseContext::new(stmt, self.reparsed, mem_tracker, self.internal)
    }
}

/// Parses `--chunk-size`, which must be between 1 and [`MAX_CHUNK_SIZE`].
///
/// # Errors
///
/// Returns a message for clap when the value is not a number or out of range.
pub fn parse_chunk_size(value: &str) -> std::result::Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a byte count"))?;
    if (1..=MAX_CHUNK_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("chunk size must be between 1 and {MAX_CHUNK_SIZE}"))
    }
}

/// Maps the number of `-v` flags to the maximum log level.
///
/// Scan and parse tracing start at three.
#[must_use]
pub const fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Reads the batch from `path`, or from stdin when no path (or `-`) is given.
///
/// # Errors
///
/// Returns `CliError::Io` if the input cannot be read.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let mut input = String::new();
    match path {
        Some(path) if path != Path::new("-") => {
            input = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        _ => {
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| CliError::Io {
                    path: PathBuf::from("-"),
                    source,
                })?;
        }
    }
    Ok(input)
}
