//! Tests for statement shapes accepted by the grammar.

mod common;
use common::*;

use oxide_ql_core::ast::{BinaryOp, Expr, Literal, SortOrder, Statement};

#[test]
fn select_distinct_with_aliases() {
    let s = parse_select("SELECT DISTINCT u.name AS n, total t FROM users AS u");
    assert!(s.distinct);
    assert_eq!(s.items[0].alias.as_deref(), Some("n"));
    assert_eq!(s.items[1].alias.as_deref(), Some("t"));
    assert_eq!(s.from.and_then(|t| t.alias).as_deref(), Some("u"));
}

#[test]
fn select_without_from() {
    let s = parse_select("SELECT 1.5, x'CAFE', 'it''s', NULL, TRUE");
    let literals: Vec<_> = s.items.into_iter().map(|item| item.expr).collect();
    assert_eq!(
        literals,
        vec![
            Expr::Literal(Literal::Float(1.5)),
            Expr::Literal(Literal::Blob(vec![0xCA, 0xFE])),
            Expr::Literal(Literal::Str(String::from("it's"))),
            Expr::Literal(Literal::Null),
            Expr::Literal(Literal::Bool(true)),
        ]
    );
}

#[test]
fn select_order_by_placeholder_limit() {
    let s = parse_select("SELECT dept, count(*) FROM emp ORDER BY dept DESC, 2 LIMIT ?");
    assert_eq!(s.order_by.len(), 2);
    assert_eq!(s.order_by[0].order, SortOrder::Desc);
    assert!(s.limit.is_some_and(|limit| limit.as_parameter().is_some()));
}

#[test]
fn insert_multiple_rows() {
    let i = parse_insert("INSERT INTO main.events (id, kind) VALUES (?, 'a'), ($1, ?)");
    assert_eq!(i.table.schema.as_deref(), Some("main"));
    assert_eq!(i.columns, vec!["id", "kind"]);
    assert_eq!(i.rows.len(), 2);
    assert!(i.rows[1][0].as_parameter().is_some());
}

#[test]
fn insert_without_column_list() {
    let i = parse_insert("INSERT INTO t VALUES (1)");
    assert!(i.columns.is_empty());
    assert_eq!(i.rows, vec![vec![Expr::Literal(Literal::Int(1))]]);
}

#[test]
fn update_multiple_assignments() {
    let u = parse_update("UPDATE users SET name = ?, visits = visits + 1 WHERE id = ?");
    assert_eq!(u.assignments.len(), 2);
    let Expr::Binary(_, op, rhs) = &u.assignments[1].value else {
        panic!("Expected binary expression");
    };
    assert_eq!(*op, BinaryOp::Add);
    assert_eq!(**rhs, Expr::Literal(Literal::Int(1)));
}

#[test]
fn delete_with_filter() {
    let Statement::Delete(d) = parse("DELETE FROM sessions WHERE expires < ? OR user_id IS NULL")
    else {
        panic!("Expected DELETE");
    };
    assert_eq!(d.table.name, "sessions");
    assert!(matches!(d.filter, Some(Expr::Binary(_, BinaryOp::Or, _))));
}

#[test]
fn string_containing_placeholder_chars_is_not_a_placeholder() {
    let b = batch("SELECT '?', \"?\" FROM t WHERE a = '$1' AND b = ?");
    assert_eq!(positions(&b), vec![vec![Some(0)]]);
}

#[test]
fn comments_are_skipped() {
    let b = batch("-- leading ?\nSELECT /* ? */ ? FROM t; -- trailing ?");
    assert_eq!(b.len(), 1);
    assert_eq!(positions(&b), vec![vec![Some(0)]]);
}
