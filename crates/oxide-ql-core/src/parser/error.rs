//! Errors reported by the grammar.

use std::fmt;

use crate::lexer::{Span, TokenKind};
use crate::mem::MemoryLimitExceeded;

/// Why a statement could not be parsed, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    /// What the grammar would have accepted at `span`.
    pub expected: Option<String>,
    /// The token that was there instead.
    pub found: Option<TokenKind>,
}

impl ParseError {
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Reports `found` where `expected` was wanted. A scan error token
    /// carries its own reason, which becomes the message.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected = expected.into();
        let message = match &found {
            TokenKind::Error(reason) => reason.clone(),
            other => format!("Unexpected {other}: expected {expected}"),
        };
        Self {
            message,
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }
}

impl From<MemoryLimitExceeded> for ParseError {
    fn from(err: MemoryLimitExceeded) -> Self {
        Self::new(err.to_string(), Span::default())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Span { start, end } = self.span;
        write!(f, "{} at {start}..{end}", self.message)
    }
}

impl std::error::Error for ParseError {}
