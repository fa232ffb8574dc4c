#![allow(dead_code)]

use oxide_ql_core::ast::{Insert, Select, Statement, Update};
use oxide_ql_core::{MemTracker, ParseContext, ParseError, ParsedStatement, Parser};

pub fn context(sql: &str) -> ParseContext {
    ParseContext::new(sql, false, &MemTracker::new("test"), false)
}

pub fn parse(sql: &str) -> Statement {
    let mut ctx = context(sql);
    Parser::new(&mut ctx)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    let mut ctx = context(sql);
    Parser::new(&mut ctx)
        .parse_batch()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn batch(sql: &str) -> Vec<ParsedStatement> {
    oxide_ql_core::parse_batch(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

/// Positions of each statement's bind variables, in batch order.
pub fn positions(batch: &[ParsedStatement]) -> Vec<Vec<Option<usize>>> {
    batch
        .iter()
        .map(|stmt| stmt.bind_vars.iter().map(|var| var.pos()).collect())
        .collect()
}

/// Reads the whole context with reads of at most `max_size` bytes.
pub fn read_chunks(ctx: &mut ParseContext, max_size: usize) -> Vec<Vec<u8>> {
    let mut chunks = vec![];
    let mut buf = vec![0u8; max_size];
    loop {
        let n = ctx.read(&mut buf);
        if n == 0 {
            return chunks;
        }
        chunks.push(buf[..n].to_vec());
    }
}

pub fn parse_select(sql: &str) -> Select {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> Insert {
    match parse(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> Update {
    match parse(sql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}
