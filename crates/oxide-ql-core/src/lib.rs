//! # oxide-ql-core
//!
//! Parse context and grammar driver for batches of SQL statements with bind
//! variables.
//!
//! A [`ParseContext`] owns the statement text of one parse attempt. The
//! [`Lexer`] pulls that text through [`ParseContext::read`] in bounded
//! chunks, and the [`Parser`] registers every bind variable it meets with the
//! context. Once a statement is complete its bind variables are drained and
//! numbered; positions keep counting across the statements of a batch.
//!
//! ```rust
//! use oxide_ql_core::{MemTracker, ParseContext, Parser};
//!
//! let tracker = MemTracker::new("session");
//! let mut ctx = ParseContext::new(
//!     "INSERT INTO t (a, b) VALUES (?, ?); SELECT * FROM t WHERE a = ?",
//!     false,
//!     &tracker,
//!     false,
//! );
//! let batch = Parser::new(&mut ctx).parse_batch().unwrap();
//!
//! let positions: Vec<_> = batch
//!     .iter()
//!     .flat_map(|stmt| stmt.bind_vars.iter().map(|var| var.pos()))
//!     .collect();
//! assert_eq!(positions, vec![Some(0), Some(1), Some(2)]);
//! ```
//!
//! ## Placeholders
//!
//! `?`, `:name` and `@name` take the next position of the batch. `?N` and
//! `$N` pin position `N - 1`, but still use up a position of the batch.

pub mod ast;
pub mod context;
pub mod lexer;
pub mod mem;
pub mod parser;

pub use ast::{Expr, ParsedStatement, Statement};
pub use context::{BindVar, BindVarRef, ParseContext, ParseTree};
pub use lexer::{Lexer, ScanSource, Token, TokenKind};
pub use mem::{MemTracker, MemTrackerPtr, MemoryLimitExceeded};
pub use parser::{ParseError, Parser, parse_batch};
