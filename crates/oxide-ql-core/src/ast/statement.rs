//! Statements.

use super::expression::Expr;
use crate::context::BindVarRef;
use crate::lexer::Span;

/// `[schema.]name [[AS] alias]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
    pub alias: Option<String>,
}

/// Sort direction of an `ORDER BY` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Placement of NULLs in an `ORDER BY` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub expr: Expr,
    pub order: SortOrder,
    pub nulls: Option<NullsOrder>,
}

/// An output column of a `SELECT`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

/// `SELECT [DISTINCT] items [FROM table] [WHERE ..] [ORDER BY ..] [LIMIT ..] [OFFSET ..]`
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub distinct: bool,
    pub items: Vec<SelectItem>,
    pub from: Option<TableName>,
    pub filter: Option<Expr>,
    pub order_by: Vec<SortKey>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

/// `INSERT INTO table [(columns)] VALUES (..), (..)`
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: TableName,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Expr>>,
}

/// `column = value` in `UPDATE .. SET`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Expr,
}

/// `UPDATE table SET assignments [WHERE ..]`
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: TableName,
    pub assignments: Vec<Assignment>,
    pub filter: Option<Expr>,
}

/// `DELETE FROM table [WHERE ..]`
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: TableName,
    pub filter: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    /// Returns the leading keyword.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
        }
    }

    /// Returns the bind variables of the statement in text order.
    #[must_use]
    pub fn parameters(&self) -> Vec<BindVarRef> {
        let mut exprs: Vec<&Expr> = vec![];
        match self {
            Self::Select(select) => {
                exprs.extend(select.items.iter().map(|item| &item.expr));
                exprs.extend(&select.filter);
                exprs.extend(select.order_by.iter().map(|key| &key.expr));
                exprs.extend(&select.limit);
                exprs.extend(&select.offset);
            }
            Self::Insert(insert) => exprs.extend(insert.rows.iter().flatten()),
            Self::Update(update) => {
                exprs.extend(update.assignments.iter().map(|a| &a.value));
                exprs.extend(&update.filter);
            }
            Self::Delete(delete) => exprs.extend(&delete.filter),
        }

        let mut vars = vec![];
        for expr in exprs {
            expr.for_each_parameter(&mut |var| vars.push(BindVarRef::clone(var)));
        }
        vars
    }
}

/// One statement of a batch with its drained bind variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStatement {
    pub statement: Statement,
    /// Bind variables in text order, each with its batch position.
    pub bind_vars: Vec<BindVarRef>,
    /// Location of the statement in the batch text.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::ast::Literal;
    use crate::context::BindVar;

    fn table(name: &str) -> TableName {
        TableName {
            schema: None,
            name: String::from(name),
            alias: None,
        }
    }

    #[test]
    fn test_update_parameters_follow_clause_order() {
        let set = Rc::new(BindVar::new(None, Span::new(17, 18)));
        let filter = Rc::new(BindVar::new(None, Span::new(31, 32)));
        let stmt = Statement::Update(Update {
            table: table("t"),
            assignments: vec![Assignment {
                column: String::from("a"),
                value: Expr::Parameter(Rc::clone(&set)),
            }],
            filter: Some(Expr::Parameter(Rc::clone(&filter))),
        });
        let params = stmt.parameters();
        assert_eq!(stmt.kind(), "UPDATE");
        assert!(Rc::ptr_eq(&params[0], &set));
        assert!(Rc::ptr_eq(&params[1], &filter));
    }

    #[test]
    fn test_statement_without_parameters() {
        let stmt = Statement::Delete(Delete {
            table: table("t"),
            filter: Some(Expr::Literal(Literal::Bool(true))),
        });
        assert!(stmt.parameters().is_empty());
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }
}
