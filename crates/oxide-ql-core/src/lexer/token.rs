//! Token types for the statement scanner.

use core::fmt;

use super::Span;

/// Declares the keyword enum together with its spelling table.
macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// Reserved words of the grammar.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Looks up a word, ignoring ASCII case.
            #[must_use]
            pub fn lookup(word: &str) -> Option<Self> {
                $(if word.eq_ignore_ascii_case($text) {
                    return Some(Self::$variant);
                })*
                None
            }

            /// Returns the upper-case spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    Select => "SELECT",
    Distinct => "DISTINCT",
    As => "AS",
    From => "FROM",
    Where => "WHERE",
    Order => "ORDER",
    By => "BY",
    Asc => "ASC",
    Desc => "DESC",
    Nulls => "NULLS",
    First => "FIRST",
    Last => "LAST",
    Limit => "LIMIT",
    Offset => "OFFSET",
    Insert => "INSERT",
    Into => "INTO",
    Values => "VALUES",
    Update => "UPDATE",
    Set => "SET",
    Delete => "DELETE",
    And => "AND",
    Or => "OR",
    Not => "NOT",
    Is => "IS",
    In => "IN",
    Between => "BETWEEN",
    Like => "LIKE",
    Null => "NULL",
    True => "TRUE",
    False => "FALSE",
}

/// Operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    /// `!=` or `<>`
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `||`
    Concat,
}

impl Op {
    /// Returns the symbol as written (`<>` renders as `!=`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
        }
    }
}

/// What a token is, with its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    /// Plain or quoted identifier, quotes removed.
    Ident(String),
    Int(i64),
    Float(f64),
    /// String literal, quotes removed and `''` unescaped.
    Str(String),
    /// `X'..'` literal.
    Blob(Vec<u8>),
    Op(Op),
    LParen,
    RParen,
    Comma,
    Semicolon,
    Dot,

    /// `?`
    Question,
    /// `?N` or `$N`, with `N` as written.
    Numbered(u32),
    /// `:` before a parameter name.
    Colon,
    /// `@` before a parameter name.
    At,

    Eof,
    /// Input the scanner rejected, with the reason.
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(kw) => f.write_str(kw.as_str()),
            Self::Ident(name) => write!(f, "identifier '{name}'"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(_) => f.write_str("string literal"),
            Self::Blob(_) => f.write_str("blob literal"),
            Self::Op(op) => write!(f, "'{}'", op.as_str()),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Dot => f.write_str("'.'"),
            Self::Question => f.write_str("'?'"),
            Self::Numbered(n) => write!(f, "'?{n}'"),
            Self::Colon => f.write_str("':'"),
            Self::At => f.write_str("'@'"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(reason) => f.write_str(reason),
        }
    }
}

/// A token and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_ignores_case() {
        assert_eq!(Keyword::lookup("select"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("NuLLs"), Some(Keyword::Nulls));
        assert_eq!(Keyword::lookup("users"), None);
        for kw in [Keyword::Between, Keyword::Offset, Keyword::False] {
            assert_eq!(Keyword::lookup(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Op(Op::NotEq).to_string(), "'!='");
        assert_eq!(TokenKind::Numbered(3).to_string(), "'?3'");
        assert_eq!(TokenKind::Ident(String::from("t")).to_string(), "identifier 't'");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }

    #[test]
    fn test_as_keyword() {
        let from = Token::new(TokenKind::Keyword(Keyword::From), Span::new(0, 4));
        let comma = Token::new(TokenKind::Comma, Span::new(4, 5));
        assert_eq!(from.as_keyword(), Some(Keyword::From));
        assert_eq!(comma.as_keyword(), None);
        assert!(!comma.is_eof());
    }
}
