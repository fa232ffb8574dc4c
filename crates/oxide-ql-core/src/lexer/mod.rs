//! Statement lexer
//!
//! A hand-written lexer that pulls statement text from a [`ScanSource`] in
//! bounded chunks and produces a stream of tokens.

mod source;
mod span;
mod token;
mod tokenizer;

pub use source::ScanSource;
pub use span::Span;
pub use token::{Keyword, Op, Token, TokenKind};
pub use tokenizer::{DEFAULT_CHUNK_SIZE, Lexer, MAX_CHUNK_SIZE};
