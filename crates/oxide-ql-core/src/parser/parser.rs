//! Grammar driver.
//!
//! The parser pulls tokens from a [`Lexer`] that reads the statement through
//! the [`ParseContext`], and registers every bind variable it builds with the
//! same context. After each statement of a batch it drains the context, which
//! fixes the positions of that statement's bind variables.

use std::rc::Rc;

use tracing::{debug, trace};

use super::error::ParseError;
use super::pratt::{binary_op, is_predicate_start, unary_op};
use crate::ast::{
    Assignment, BinaryOp, COMPARISON_PRECEDENCE, Delete, Expr, Insert, Literal, NullsOrder,
    ParsedStatement, Select, SelectItem, SortKey, SortOrder, Statement, TableName, UnaryOp, Update,
};
use crate::context::{BindVar, ParseContext};
use crate::lexer::{DEFAULT_CHUNK_SIZE, Keyword, Lexer, Op, Span, Token, TokenKind};
use crate::mem::MemTracker;

/// Recursive-descent parser over the statement text of a [`ParseContext`].
pub struct Parser<'c> {
    lexer: Lexer<&'c mut ParseContext>,
    current: Token,
    /// Span of the last token consumed.
    last_span: Span,
    trace: bool,
}

impl<'c> Parser<'c> {
    #[must_use]
    pub fn new(ctx: &'c mut ParseContext) -> Self {
        Self::with_chunk_size(ctx, DEFAULT_CHUNK_SIZE)
    }

    /// Creates a parser whose lexer reads at most `chunk_size` bytes at a
    /// time from `ctx`. The size is clamped to
    /// `1..=`[`MAX_CHUNK_SIZE`](crate::lexer::MAX_CHUNK_SIZE).
    #[must_use]
    pub fn with_chunk_size(ctx: &'c mut ParseContext, chunk_size: usize) -> Self {
        let trace = ctx.trace_parsing();
        let trace_scanning = ctx.trace_scanning();
        let mut lexer = Lexer::new(ctx)
            .with_chunk_size(chunk_size)
            .with_trace(trace_scanning);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            last_span: Span::default(),
            trace,
        }
    }

    pub fn context(&mut self) -> &mut ParseContext {
        self.lexer.source_mut()
    }

    /// Parses every statement of the batch.
    ///
    /// Statements are separated by semicolons and empty statements are
    /// skipped. The bind variables of each statement are drained as soon as
    /// the statement is complete, so positions continue across statements.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid statement, on two statements without a
    /// semicolon between them, or when the parse tree's memory tracker is
    /// over its limit.
    pub fn parse_batch(&mut self) -> Result<Vec<ParsedStatement>, ParseError> {
        self.context()
            .parse_tree()
            .mem_tracker()
            .check_limit()?;

        let mut statements = vec![];
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.current.is_eof() {
                break;
            }
            statements.push(self.parse_next()?);
            if !self.at(&TokenKind::Semicolon) && !self.current.is_eof() {
                return Err(self.unexpected("';' or end of input"));
            }
        }

        let ctx = self.context();
        debug!(
            statements = statements.len(),
            bind_variables = ctx.bind_pos(),
            reparsed = ctx.reparsed(),
            internal = ctx.internal(),
            "parsed batch"
        );
        Ok(statements)
    }

    /// Parses the next statement and drains its bind variables.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a valid statement.
    pub fn parse_next(&mut self) -> Result<ParsedStatement, ParseError> {
        let start = self.current.span;
        let statement = self.parse_statement()?;
        let span = start.to(self.last_span);

        let mut bind_vars = vec![];
        self.context().get_bind_variables(&mut bind_vars);

        if self.trace {
            trace!(
                target: "oxide_ql_core::parse",
                kind = statement.kind(),
                bind_variables = bind_vars.len(),
                start = span.start,
                end = span.end,
                "statement"
            );
        }
        Ok(ParsedStatement {
            statement,
            bind_vars,
            span,
        })
    }

    /// Parses one statement. Its bind variables stay registered with the
    /// context until it is drained.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current.as_keyword() {
            Some(Keyword::Select) => self.select().map(Statement::Select),
            Some(Keyword::Insert) => self.insert().map(Statement::Insert),
            Some(Keyword::Update) => self.update().map(Statement::Update),
            Some(Keyword::Delete) => self.delete().map(Statement::Delete),
            _ => Err(self.unexpected("SELECT, INSERT, UPDATE or DELETE")),
        }
    }

    fn select(&mut self) -> Result<Select, ParseError> {
        self.expect_keyword(Keyword::Select)?;
        let distinct = self.eat_keyword(Keyword::Distinct);
        let items = self.comma_separated(Self::select_item)?;
        let from = if self.eat_keyword(Keyword::From) {
            Some(self.table_name()?)
        } else {
            None
        };
        let filter = self.clause(Keyword::Where)?;
        let order_by = if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.comma_separated(Self::sort_key)?
        } else {
            vec![]
        };
        let limit = self.clause(Keyword::Limit)?;
        let offset = self.clause(Keyword::Offset)?;
        Ok(Select {
            distinct,
            items,
            from,
            filter,
            order_by,
            limit,
            offset,
        })
    }

    fn select_item(&mut self) -> Result<SelectItem, ParseError> {
        let expr = self.expression()?;
        let alias = self.alias()?;
        Ok(SelectItem { expr, alias })
    }

    fn sort_key(&mut self) -> Result<SortKey, ParseError> {
        let expr = self.expression()?;
        let order = match self.current.as_keyword() {
            Some(Keyword::Asc) => {
                self.bump();
                SortOrder::Asc
            }
            Some(Keyword::Desc) => {
                self.bump();
                SortOrder::Desc
            }
            _ => SortOrder::default(),
        };
        let nulls = if self.eat_keyword(Keyword::Nulls) {
            if self.eat_keyword(Keyword::First) {
                Some(NullsOrder::First)
            } else {
                self.expect_keyword(Keyword::Last)?;
                Some(NullsOrder::Last)
            }
        } else {
            None
        };
        Ok(SortKey { expr, order, nulls })
    }

    fn insert(&mut self) -> Result<Insert, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.table_name()?;
        let columns = if self.at(&TokenKind::LParen) {
            self.parenthesized(Self::ident)?
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::Values)?;
        let rows = self.comma_separated(|p| p.parenthesized(Self::expression))?;
        Ok(Insert {
            table,
            columns,
            rows,
        })
    }

    fn update(&mut self) -> Result<Update, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.table_name()?;
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.comma_separated(|p| {
            let column = p.ident()?;
            p.expect(&TokenKind::Op(Op::Eq))?;
            let value = p.expression()?;
            Ok(Assignment { column, value })
        })?;
        let filter = self.clause(Keyword::Where)?;
        Ok(Update {
            table,
            assignments,
            filter,
        })
    }

    fn delete(&mut self) -> Result<Delete, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.table_name()?;
        let filter = self.clause(Keyword::Where)?;
        Ok(Delete { table, filter })
    }

    fn table_name(&mut self) -> Result<TableName, ParseError> {
        let first = self.ident()?;
        let (schema, name) = if self.eat(&TokenKind::Dot) {
            (Some(first), self.ident()?)
        } else {
            (None, first)
        };
        let alias = self.alias()?;
        Ok(TableName {
            schema,
            name,
            alias,
        })
    }

    /// `AS name`, or a bare identifier.
    fn alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.ident().map(Some);
        }
        match &self.current.kind {
            TokenKind::Ident(_) => self.ident().map(Some),
            _ => Ok(None),
        }
    }

    /// An expression introduced by `keyword`, if the keyword is there.
    fn clause(&mut self, keyword: Keyword) -> Result<Option<Expr>, ParseError> {
        if self.eat_keyword(keyword) {
            self.expression().map(Some)
        } else {
            Ok(None)
        }
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.expr(0)
    }

    /// Parses operators that bind at least as tightly as `min`.
    fn expr(&mut self, min: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.prefix()?;
        loop {
            if is_predicate_start(&self.current.kind) {
                if COMPARISON_PRECEDENCE < min {
                    break;
                }
                lhs = self.predicate(lhs)?;
                continue;
            }
            let Some(op) = binary_op(&self.current.kind) else {
                break;
            };
            let precedence = op.precedence();
            if precedence < min {
                break;
            }
            self.bump();
            let rhs = self.expr(precedence + 1)?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    /// `IS [NOT] NULL`, `[NOT] IN (..)`, `[NOT] BETWEEN .. AND ..` and
    /// `NOT LIKE ..` after `operand`.
    fn predicate(&mut self, operand: Expr) -> Result<Expr, ParseError> {
        let operand = Box::new(operand);
        if self.eat_keyword(Keyword::Is) {
            let negated = self.eat_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Null)?;
            return Ok(Expr::IsNull { operand, negated });
        }

        let negated = self.eat_keyword(Keyword::Not);
        if self.at_keyword(Keyword::In) {
            self.bump();
            let items = self.parenthesized(Self::expression)?;
            Ok(Expr::InList {
                operand,
                items,
                negated,
            })
        } else if self.eat_keyword(Keyword::Between) {
            let low = Box::new(self.expr(COMPARISON_PRECEDENCE + 1)?);
            self.expect_keyword(Keyword::And)?;
            let high = Box::new(self.expr(COMPARISON_PRECEDENCE + 1)?);
            Ok(Expr::Between {
                operand,
                low,
                high,
                negated,
            })
        } else if negated && self.eat_keyword(Keyword::Like) {
            let pattern = self.expr(COMPARISON_PRECEDENCE + 1)?;
            let like = Expr::Binary(operand, BinaryOp::Like, Box::new(pattern));
            Ok(Expr::Unary(UnaryOp::Not, Box::new(like)))
        } else {
            Err(self.unexpected("IN, BETWEEN or LIKE"))
        }
    }

    fn prefix(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = unary_op(&self.current.kind) {
            self.bump();
            let operand = self.expr(op.operand_precedence())?;
            return Ok(Expr::Unary(op, Box::new(operand)));
        }
        if let Some(literal) = self.literal() {
            return Ok(Expr::Literal(literal));
        }
        match &self.current.kind {
            TokenKind::Question | TokenKind::Numbered(_) | TokenKind::Colon | TokenKind::At => {
                self.placeholder()
            }
            TokenKind::Op(Op::Star) => {
                self.bump();
                Ok(Expr::Wildcard(None))
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen)?;
                Ok(Expr::Nested(Box::new(inner)))
            }
            TokenKind::Ident(_) => self.name_expr(),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn literal(&mut self) -> Option<Literal> {
        let literal = match &self.current.kind {
            TokenKind::Int(v) => Literal::Int(*v),
            TokenKind::Float(v) => Literal::Float(*v),
            TokenKind::Str(s) => Literal::Str(s.clone()),
            TokenKind::Blob(bytes) => Literal::Blob(bytes.clone()),
            TokenKind::Keyword(Keyword::Null) => Literal::Null,
            TokenKind::Keyword(Keyword::True) => Literal::Bool(true),
            TokenKind::Keyword(Keyword::False) => Literal::Bool(false),
            _ => return None,
        };
        self.bump();
        Some(literal)
    }

    /// A column, `qualifier.column`, `qualifier.*` or a function call.
    fn name_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span;
        let name = self.ident()?;
        if self.eat(&TokenKind::LParen) {
            let args = if self.at(&TokenKind::RParen) {
                vec![]
            } else {
                self.comma_separated(Self::expression)?
            };
            self.expect(&TokenKind::RParen)?;
            return Ok(Expr::Call { name, args });
        }
        if !self.eat(&TokenKind::Dot) {
            return Ok(Expr::Column {
                qualifier: None,
                name,
                span: start,
            });
        }
        if self.eat(&TokenKind::Op(Op::Star)) {
            return Ok(Expr::Wildcard(Some(name)));
        }
        let column = self.ident()?;
        Ok(Expr::Column {
            qualifier: Some(name),
            name: column,
            span: start.to(self.last_span),
        })
    }

    /// Builds a bind variable from a placeholder and registers it with the
    /// context.
    fn placeholder(&mut self) -> Result<Expr, ParseError> {
        let token = self.bump();
        let (pos, name) = match token.kind {
            TokenKind::Numbered(n) => {
                let pos = n
                    .checked_sub(1)
                    .and_then(|pos| usize::try_from(pos).ok())
                    .ok_or_else(|| ParseError::new("Parameter numbers start at 1", token.span))?;
                (Some(pos), None)
            }
            TokenKind::Colon | TokenKind::At => (None, Some(self.parameter_name()?)),
            _ => (None, None),
        };
        let span = token.span.to(self.last_span);
        let var = Rc::new(match pos {
            Some(pos) => BindVar::with_pos(pos, name, span),
            None => BindVar::new(name, span),
        });
        self.context().add_bind_variable(Rc::clone(&var));
        Ok(Expr::Parameter(var))
    }

    /// The name after `:` or `@`. Keywords are accepted and lowercased.
    fn parameter_name(&mut self) -> Result<String, ParseError> {
        if let Some(keyword) = self.current.as_keyword() {
            self.bump();
            return Ok(keyword.as_str().to_ascii_lowercase());
        }
        self.ident()
    }

    fn ident(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = &mut self.current.kind {
            let name = std::mem::take(name);
            self.bump();
            return Ok(name);
        }
        Err(self.unexpected("identifier"))
    }

    fn parenthesized<T>(
        &mut self,
        item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let items = self.comma_separated(item)?;
        self.expect(&TokenKind::RParen)?;
        Ok(items)
    }

    fn comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![item(self)?];
        while self.eat(&TokenKind::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Moves to the next token and returns the one consumed.
    fn bump(&mut self) -> Token {
        let next = self.lexer.next_token();
        let token = std::mem::replace(&mut self.current, next);
        self.last_span = token.span;
        token
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.current.kind == *kind
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_keyword() == Some(keyword)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        let found = self.at(kind);
        if found {
            self.bump();
        }
        found
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(&TokenKind::Keyword(keyword))
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected(expected, self.current.kind.clone(), self.current.span)
    }
}

/// Parses a batch with a fresh context and an unlimited memory tracker.
///
/// # Errors
///
/// Fails if any statement is invalid.
pub fn parse_batch(sql: &str) -> Result<Vec<ParsedStatement>, ParseError> {
    let mut ctx = ParseContext::new(sql, false, &MemTracker::new("parse_batch"), false);
    Parser::new(&mut ctx).parse_batch()
}
