//! Reports produced by the subcommands.
//!
//! Reports serialize with `serde` for `--json` output and implement
//! `Display` for the plain text listing.

use std::fmt;

use oxide_ql_core::lexer::Lexer;
use oxide_ql_core::{BindVar, ParseContext, ParsedStatement, Parser, TokenKind};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// A bind variable and the position it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindVarReport {
    /// Position in the batch.
    pub pos: Option<usize>,
    /// Name for `:name` and `@name` placeholders.
    pub name: Option<String>,
    /// Placeholder text as written.
    pub text: String,
    /// Byte offset of the placeholder.
    pub start: usize,
    /// Byte offset just past the placeholder.
    pub end: usize,
}

impl BindVarReport {
    fn new(var: &BindVar, stmt: &str) -> Self {
        let span = var.span();
        Self {
            pos: var.pos(),
            name: var.name().map(str::to_owned),
            text: span.text(stmt).unwrap_or_default().to_owned(),
            start: span.start,
            end: span.end,
        }
    }
}

/// One statement of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementReport {
    /// Statement keyword.
    pub kind: &'static str,
    /// Statement text.
    pub text: String,
    /// Bind variables in the order they appear.
    pub bind_vars: Vec<BindVarReport>,
}

impl StatementReport {
    fn new(parsed: &ParsedStatement, stmt: &str) -> Self {
        Self {
            kind: parsed.statement.kind(),
            text: parsed.span.text(stmt).unwrap_or_default().to_owned(),
            bind_vars: parsed
                .bind_vars
                .iter()
                .map(|var| BindVarReport::new(var, stmt))
                .collect(),
        }
    }
}

/// Bind variables of every statement in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindsReport {
    /// Statements in batch order.
    pub statements: Vec<StatementReport>,
    /// Positions handed out over the whole batch.
    pub bind_count: usize,
    /// Whether the batch was parsed as a reparse attempt.
    pub reparsed: bool,
}

impl BindsReport {
    /// Parses the batch owned by `ctx` and collects its bind variables.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Parse` if the batch does not parse.
    pub fn collect(ctx: &mut ParseContext, chunk_size: usize) -> Result<Self> {
        let batch = Parser::with_chunk_size(ctx, chunk_size).parse_batch()?;
        let stmt = ctx.stmt();
        let report = Self {
            statements: batch
                .iter()
                .map(|parsed| StatementReport::new(parsed, stmt))
                .collect(),
            bind_count: ctx.bind_pos(),
            reparsed: ctx.reparsed(),
        };
        info!(
            statements = report.statements.len(),
            bind_count = report.bind_count,
            "collected bind variables"
        );
        Ok(report)
    }
}

impl fmt::Display for BindsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            writeln!(f, "[{i}] {}: {}", stmt.kind, stmt.text)?;
            for var in &stmt.bind_vars {
                let pos = var.pos.map_or_else(|| String::from("-"), |pos| pos.to_string());
                write!(f, "    {pos:>3}  {}", var.text)?;
                if let Some(name) = &var.name {
                    write!(f, "  ({name})")?;
                }
                writeln!(f, "  @{}..{}", var.start, var.end)?;
            }
        }
        write!(f, "{} bind variable(s)", self.bind_count)
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenReport {
    /// Token kind as debug text.
    pub kind: String,
    /// Byte offset of the token.
    pub start: usize,
    /// Byte offset just past the token.
    pub end: usize,
}

/// Scans the statement owned by `ctx` into a token listing, without EOF.
///
/// # Errors
///
/// Returns `CliError::Scan` at the first token the scanner rejects.
pub fn collect_tokens(ctx: &mut ParseContext, chunk_size: usize) -> Result<Vec<TokenReport>> {
    let trace = ctx.trace_scanning();
    let mut lexer = Lexer::new(ctx).with_chunk_size(chunk_size).with_trace(trace);

    let mut tokens = vec![];
    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Eof => break,
            TokenKind::Error(message) => {
                return Err(CliError::Scan {
                    message,
                    start: token.span.start,
                    end: token.span.end,
                });
            }
            kind => tokens.push(TokenReport {
                kind: format!("{kind:?}"),
                start: token.span.start,
                end: token.span.end,
            }),
        }
    }
    debug!(tokens = tokens.len(), "scanned statement");
    Ok(tokens)
}
