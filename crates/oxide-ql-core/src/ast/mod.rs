//! Syntax tree produced by the parser.

mod expression;
mod statement;

pub use expression::{BinaryOp, COMPARISON_PRECEDENCE, Expr, Literal, UnaryOp};
pub use statement::{
    Assignment, Delete, Insert, NullsOrder, ParsedStatement, Select, SelectItem, SortKey,
    SortOrder, Statement, TableName, Update,
};
