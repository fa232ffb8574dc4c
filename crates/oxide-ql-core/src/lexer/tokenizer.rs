//! Statement tokenizer.
//!
//! The lexer does not see the statement as a whole. It keeps a growing byte
//! buffer and pulls the next chunk from its [`ScanSource`] whenever a
//! character is needed past the end of that buffer. Multi-byte characters may
//! straddle chunk boundaries.

use std::borrow::Cow;

use super::{Keyword, Op, ScanSource, Span, Token, TokenKind};

/// Default number of bytes requested from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Largest number of bytes requested from the source per read.
pub const MAX_CHUNK_SIZE: usize = 1 << 20;

/// A lexer that tokenizes statement text pulled from a [`ScanSource`].
pub struct Lexer<S> {
    source: S,
    /// Bytes read so far; offsets into it are offsets into the statement.
    buf: Vec<u8>,
    /// Maximum number of bytes requested per read.
    chunk_size: usize,
    /// Set once the source returned 0.
    exhausted: bool,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Emit every token as a trace event.
    trace: bool,
}

/// Returns the byte length of a UTF-8 sequence from its lead byte.
///
/// Bytes that cannot start a sequence count as one byte.
const fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

impl<S: ScanSource> Lexer<S> {
    /// Creates a new lexer reading from `source`.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            buf: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            exhausted: false,
            pos: 0,
            start: 0,
            trace: false,
        }
    }

    /// Sets the number of bytes requested per read, clamped to
    /// `1..=MAX_CHUNK_SIZE`.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, MAX_CHUNK_SIZE);
        self
    }

    /// Enables or disables token tracing.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Returns the source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Pulls the next chunk from the source. Returns false at end of input.
    fn fill(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let len = self.buf.len();
        self.buf.resize(len + self.chunk_size, 0);
        let n = self.source.read(&mut self.buf[len..]);
        self.buf.truncate(len + n);
        if n == 0 {
            self.exhausted = true;
        }
        n > 0
    }

    /// Decodes the character starting at byte `at`, reading more input if
    /// needed. Invalid bytes decode as U+FFFD of width one.
    fn decode_at(&mut self, at: usize) -> Option<(char, usize)> {
        loop {
            if let Some(&lead) = self.buf.get(at) {
                let width = utf8_width(lead);
                if let Some(bytes) = self.buf.get(at..at + width) {
                    let decoded = core::str::from_utf8(bytes)
                        .ok()
                        .and_then(|s| s.chars().next());
                    return Some(decoded.map_or((char::REPLACEMENT_CHARACTER, 1), |c| (c, width)));
                }
            }
            if !self.fill() {
                // Truncated sequence at end of input.
                return self
                    .buf
                    .get(at)
                    .map(|_| (char::REPLACEMENT_CHARACTER, 1));
            }
        }
    }

    /// Returns the current character without advancing.
    fn peek(&mut self) -> Option<char> {
        self.decode_at(self.pos).map(|(c, _)| c)
    }

    /// Returns the next character without advancing.
    fn peek_next(&mut self) -> Option<char> {
        let (_, width) = self.decode_at(self.pos)?;
        self.decode_at(self.pos + width).map(|(c, _)| c)
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (c, width) = self.decode_at(self.pos)?;
        self.pos += width;
        Some(c)
    }

    /// Returns the text between two byte offsets of the buffer.
    fn slice(&self, start: usize, end: usize) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buf[start..end])
    }

    /// Skips whitespace, `-- line` comments and `/* block */` comments.
    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.advance();
                }
                (Some('-'), Some('-')) => while self.advance().is_some_and(|c| c != '\n') {},
                (Some('/'), Some('*')) => {
                    self.pos += 2;
                    let mut prev = '\0';
                    while let Some(c) = self.advance() {
                        if prev == '*' && c == '/' {
                            break;
                        }
                        prev = c;
                    }
                }
                _ => return,
            }
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        let matched = self.peek() == Some(expected);
        if matched {
            self.advance();
        }
        matched
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Scans a keyword or an identifier.
    fn word(&mut self) -> TokenKind {
        self.eat_while(|c| c.is_alphanumeric() || c == '_');
        let word = self.slice(self.start, self.pos);
        Keyword::lookup(&word).map_or_else(|| TokenKind::Ident(word.into_owned()), TokenKind::Keyword)
    }

    /// Scans the body of a quoted string or identifier, where a doubled
    /// quote stands for itself. Returns `None` if the input ends first.
    fn quoted(&mut self, quote: char) -> Option<String> {
        let mut text = String::new();
        loop {
            let c = self.advance()?;
            if c == quote && !self.eat(quote) {
                return Some(text);
            }
            text.push(c);
        }
    }

    fn number(&mut self) -> TokenKind {
        let digit = |c: char| c.is_ascii_digit();
        self.eat_while(digit);
        let mut float = false;
        if self.peek() == Some('.') && self.peek_next().is_some_and(digit) {
            float = true;
            self.advance();
            self.eat_while(digit);
        }
        if self.eat('e') || self.eat('E') {
            float = true;
            let _ = self.eat('+') || self.eat('-');
            self.eat_while(digit);
        }

        let text = self.slice(self.start, self.pos);
        if float {
            text.parse::<f64>()
                .map_or_else(|e| TokenKind::Error(format!("Invalid float: {e}")), TokenKind::Float)
        } else {
            text.parse::<i64>()
                .map_or_else(|e| TokenKind::Error(format!("Invalid integer: {e}")), TokenKind::Int)
        }
    }

    /// Scans the number of a `?N` or `$N` placeholder.
    fn numbered(&mut self) -> TokenKind {
        let digits = self.pos;
        self.eat_while(|c| c.is_ascii_digit());
        self.slice(digits, self.pos).parse::<u32>().map_or_else(
            |e| TokenKind::Error(format!("Invalid parameter number: {e}")),
            TokenKind::Numbered,
        )
    }

    /// Scans the hex digits of an `X'..'` literal.
    fn blob(&mut self) -> TokenKind {
        self.advance();
        let mut nibbles = Vec::new();
        loop {
            match self.advance() {
                Some('\'') => break,
                Some(c) => match c.to_digit(16) {
                    Some(nibble) => nibbles.push(nibble),
                    None => return TokenKind::Error(String::from("Invalid character in blob literal")),
                },
                None => return TokenKind::Error(String::from("Unterminated blob literal")),
            }
        }
        if nibbles.len() % 2 != 0 {
            return TokenKind::Error(String::from("Odd number of hex digits in blob literal"));
        }
        let bytes = nibbles
            .chunks_exact(2)
            .map(|pair| u8::try_from((pair[0] << 4) | pair[1]).unwrap_or_default())
            .collect();
        TokenKind::Blob(bytes)
    }

    /// Scans an operator whose first character `c` is consumed.
    fn operator(&mut self, c: char) -> Option<Op> {
        let op = match c {
            '+' => Op::Plus,
            '-' => Op::Minus,
            '*' => Op::Star,
            '/' => Op::Slash,
            '%' => Op::Percent,
            '=' => Op::Eq,
            '<' if self.eat('=') => Op::LtEq,
            '<' if self.eat('>') => Op::NotEq,
            '<' => Op::Lt,
            '>' if self.eat('=') => Op::GtEq,
            '>' => Op::Gt,
            '!' if self.eat('=') => Op::NotEq,
            '|' if self.eat('|') => Op::Concat,
            _ => return None,
        };
        Some(op)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.start = self.pos;
        let kind = self.scan_kind();
        let token = Token::new(kind, Span::new(self.start, self.pos));
        if self.trace {
            tracing::trace!(
                target: "oxide_ql_core::scan",
                kind = ?token.kind,
                start = token.span.start,
                end = token.span.end,
                "token"
            );
        }
        token
    }

    fn scan_kind(&mut self) -> TokenKind {
        let Some(c) = self.advance() else {
            return TokenKind::Eof;
        };
        match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            '@' => TokenKind::At,
            '?' | '$' if self.peek().is_some_and(|d| d.is_ascii_digit()) => self.numbered(),
            '?' => TokenKind::Question,
            '\'' => self.quoted(c).map_or_else(
                || TokenKind::Error(String::from("Unterminated string literal")),
                TokenKind::Str,
            ),
            '"' | '`' => self.quoted(c).map_or_else(
                || TokenKind::Error(String::from("Unterminated quoted identifier")),
                TokenKind::Ident,
            ),
            'x' | 'X' if self.peek() == Some('\'') => self.blob(),
            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.word(),
            c => self
                .operator(c)
                .map_or_else(|| TokenKind::Error(format!("Unexpected character: {c}")), TokenKind::Op),
        }
    }

    /// Scans the rest of the input, up to and including the EOF token.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = vec![self.next_token()];
        while !tokens.last().is_some_and(Token::is_eof) {
            tokens.push(self.next_token());
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        kinds_chunked(input, DEFAULT_CHUNK_SIZE)
    }

    fn kinds_chunked(input: &str, chunk_size: usize) -> Vec<TokenKind> {
        Lexer::new(input.as_bytes())
            .with_chunk_size(chunk_size)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Ident(String::from(name))
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds(" \n\t -- only a comment"), vec![TokenKind::Eof]);
        assert_eq!(kinds("/* unterminated"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_words() {
        assert_eq!(
            kinds("select Users \"two words\" `a``b` _x1"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                ident("Users"),
                ident("two words"),
                ident("a`b"),
                ident("_x1"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds("7 0.5 1e3 'it''s' x'00fF'"),
            vec![
                TokenKind::Int(7),
                TokenKind::Float(0.5),
                TokenKind::Float(1000.0),
                TokenKind::Str(String::from("it's")),
                TokenKind::Blob(vec![0x00, 0xFF]),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bad_literals() {
        for input in ["'open", "\"open", "X'ABC'", "X'0G'", "99999999999999999999"] {
            assert!(
                matches!(kinds(input)[0], TokenKind::Error(_)),
                "{input} should not scan"
            );
        }
    }

    #[test]
    fn test_operators() {
        let ops: Vec<_> = kinds("+ - * / % = != <> < <= > >= ||")
            .into_iter()
            .filter_map(|kind| match kind {
                TokenKind::Op(op) => Some(op.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            ops,
            vec!["+", "-", "*", "/", "%", "=", "!=", "!=", "<", "<=", ">", ">=", "||"]
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            kinds("? ?1 $12 :a @b"),
            vec![
                TokenKind::Question,
                TokenKind::Numbered(1),
                TokenKind::Numbered(12),
                TokenKind::Colon,
                ident("a"),
                TokenKind::At,
                ident("b"),
                TokenKind::Eof,
            ]
        );
        assert!(matches!(&kinds("$x")[0], TokenKind::Error(msg) if msg.contains("Unexpected character")));
        assert!(matches!(kinds("?99999999999")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new(&b"SELECT  ?2 -- x"[..]).tokenize();
        let spans: Vec<_> = tokens.iter().map(|t| (t.span.start, t.span.end)).collect();
        assert_eq!(spans, vec![(0, 6), (8, 10), (15, 15)]);
    }

    #[test]
    fn test_chunk_size_does_not_change_tokens() {
        let sql = "SELECT \"naïve\", 'héllo' /* ü */ FROM t WHERE a >= ?2 -- end";
        let expected = kinds(sql);
        for chunk_size in [1, 2, 3, 5, 7, 64] {
            assert_eq!(kinds_chunked(sql, chunk_size), expected, "chunk {chunk_size}");
        }
    }

    #[test]
    fn test_chunk_size_is_clamped() {
        assert_eq!(kinds_chunked("SELECT ?", 0), kinds("SELECT ?"));
        assert_eq!(kinds_chunked("SELECT ?", usize::MAX), kinds("SELECT ?"));
        let lexer = Lexer::new(&b""[..]).with_chunk_size(usize::MAX);
        assert_eq!(lexer.chunk_size, MAX_CHUNK_SIZE);
    }

    #[test]
    fn test_invalid_utf8_is_error_token() {
        let bytes: &[u8] = &[b'a', b' ', 0xFF, b' ', b'b'];
        let kinds: Vec<_> = Lexer::new(bytes).tokenize().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], ident("a"));
        assert!(matches!(&kinds[1], TokenKind::Error(_)));
        assert_eq!(kinds[2], ident("b"));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new(&b"x"[..]);
        assert!(!lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
    }
}
