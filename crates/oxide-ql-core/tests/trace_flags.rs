//! Tests for deriving the trace flags from the active subscriber.

mod common;
use common::*;

use oxide_ql_core::Parser;
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::FmtSubscriber;

fn subscriber(level: Level) -> impl tracing::Subscriber + Send + Sync + 'static {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_test_writer()
        .finish()
}

#[test]
fn trace_level_enables_both_flags() {
    with_default(subscriber(Level::TRACE), || {
        let ctx = context("SELECT ?");
        assert!(ctx.trace_scanning());
        assert!(ctx.trace_parsing());
    });
}

#[test]
fn debug_level_leaves_flags_off() {
    with_default(subscriber(Level::DEBUG), || {
        let ctx = context("SELECT ?");
        assert!(!ctx.trace_scanning());
        assert!(!ctx.trace_parsing());
    });
}

#[test]
fn tracing_does_not_change_results() {
    let sql = "SELECT a, ? FROM t WHERE b = :b; DELETE FROM t WHERE c = ?3";
    let traced = with_default(subscriber(Level::TRACE), || {
        let mut ctx = context(sql);
        assert!(ctx.trace_parsing());
        Parser::new(&mut ctx).parse_batch().unwrap()
    });
    assert_eq!(traced, batch(sql));
}
