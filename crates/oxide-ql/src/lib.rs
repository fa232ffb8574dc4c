//! Inspect SQL statement batches.
//!
//! `oxide-ql` parses a batch of `;`-separated statements with
//! [`oxide_ql_core`] and reports the position given to every bind variable,
//! or dumps the token stream the scanner produces.
//!
//! # CLI Usage
//!
//! ```bash
//! # List the bind variables of each statement
//! echo "INSERT INTO t VALUES (?, ?); SELECT * FROM t WHERE id = ?" | oxide-ql binds
//!
//! # Same, as JSON
//! oxide-ql -f batch.sql binds --json
//!
//! # Dump tokens with scanner and parser traces
//! oxide-ql -vvv -f batch.sql tokens
//! ```

pub mod config;
pub mod error;
pub mod report;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{SessionConfig, log_level, parse_chunk_size, read_input};
    pub use crate::error::{CliError, Result};
    pub use crate::report::{
        BindVarReport, BindsReport, StatementReport, TokenReport, collect_tokens,
    };
}
