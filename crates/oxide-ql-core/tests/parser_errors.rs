//! Tests for parser error cases.

mod common;
use common::*;

#[test]
fn error_incomplete_select() {
    let _ = parse_err("SELECT");
}

#[test]
fn error_missing_from_table() {
    let _ = parse_err("SELECT * FROM");
}

#[test]
fn error_unclosed_paren() {
    let _ = parse_err("SELECT (1 + 2");
}

#[test]
fn error_between_without_and() {
    let err = parse_err("SELECT * FROM t WHERE a BETWEEN 1 OR 2");
    assert_eq!(err.expected.as_deref(), Some("AND"));
}

#[test]
fn error_not_without_predicate() {
    let err = parse_err("SELECT * FROM t WHERE a NOT NULL");
    assert_eq!(err.message, "Unexpected NULL: expected IN, BETWEEN or LIKE");
}

#[test]
fn error_unknown_statement_names_alternatives() {
    let err = parse_err("TRUNCATE users");
    assert_eq!(err.expected.as_deref(), Some("SELECT, INSERT, UPDATE or DELETE"));
}

#[test]
fn error_parameter_zero() {
    let err = parse_err("SELECT * FROM t WHERE id = $0");
    assert_eq!((err.span.start, err.span.end), (27, 29));
}

#[test]
fn error_named_parameter_without_name() {
    let err = parse_err("SELECT :");
    assert_eq!(err.expected.as_deref(), Some("identifier"));
}

#[test]
fn error_bare_dollar() {
    let err = parse_err("SELECT $");
    assert!(err.message.contains("Unexpected character"));
}

#[test]
fn error_statements_not_separated() {
    let _ = parse_err("SELECT 1 DELETE FROM t");
}

#[test]
fn empty_batch_is_not_an_error() {
    assert!(batch("").is_empty());
    assert!(batch(" ; ;; ").is_empty());
}
