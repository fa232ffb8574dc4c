//! Expressions.

use crate::context::BindVarRef;
use crate::lexer::Span;

/// A constant written in the statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Blob(Vec<u8>),
    Bool(bool),
    Null,
}

/// Operators between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Binding strength of comparisons, which `IS`, `IN` and `BETWEEN` share.
pub const COMPARISON_PRECEDENCE: u8 = 4;

impl BinaryOp {
    /// Returns how tightly the operator binds; higher binds tighter. All
    /// operators are left-associative.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Like => {
                COMPARISON_PRECEDENCE
            }
            Self::Concat | Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::Rem => 6,
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `NOT x`
    Not,
}

impl UnaryOp {
    /// Returns the precedence the operand is parsed at. `NOT` takes a whole
    /// comparison, `-` only a single term.
    #[must_use]
    pub const fn operand_precedence(self) -> u8 {
        match self {
            Self::Not => 3,
            Self::Neg => 7,
        }
    }
}

/// An expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Column {
        qualifier: Option<String>,
        name: String,
        span: Span,
    },
    /// `*`, or `t.*` with a qualifier.
    Wildcard(Option<String>),
    /// A placeholder. The node shares its [`BindVar`](crate::context::BindVar)
    /// with the parse context, so the position assigned at drain time is
    /// visible here.
    Parameter(BindVarRef),
    Unary(UnaryOp, Box<Expr>),
    Binary(Box<Expr>, BinaryOp, Box<Expr>),
    /// `x IS [NOT] NULL`
    IsNull {
        operand: Box<Expr>,
        negated: bool,
    },
    /// `x [NOT] IN (a, b, ..)`
    InList {
        operand: Box<Expr>,
        items: Vec<Expr>,
        negated: bool,
    },
    /// `x [NOT] BETWEEN low AND high`
    Between {
        operand: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    /// `name(args)`
    Call {
        name: String,
        args: Vec<Expr>,
    },
    /// A parenthesized expression.
    Nested(Box<Expr>),
}

impl Expr {
    /// Returns the bind variable if this is a parameter.
    #[must_use]
    pub const fn as_parameter(&self) -> Option<&BindVarRef> {
        match self {
            Self::Parameter(var) => Some(var),
            _ => None,
        }
    }

    /// Calls `f` on every bind variable of the tree, in text order.
    pub fn for_each_parameter(&self, f: &mut impl FnMut(&BindVarRef)) {
        match self {
            Self::Parameter(var) => f(var),
            Self::Literal(_) | Self::Column { .. } | Self::Wildcard(_) => {}
            Self::Unary(_, operand) | Self::Nested(operand) | Self::IsNull { operand, .. } => {
                operand.for_each_parameter(f);
            }
            Self::Binary(lhs, _, rhs) => {
                lhs.for_each_parameter(f);
                rhs.for_each_parameter(f);
            }
            Self::InList { operand, items, .. } => {
                operand.for_each_parameter(f);
                items.iter().for_each(|item| item.for_each_parameter(f));
            }
            Self::Between {
                operand, low, high, ..
            } => {
                for expr in [operand, low, high] {
                    expr.for_each_parameter(f);
                }
            }
            Self::Call { args, .. } => args.iter().for_each(|arg| arg.for_each_parameter(f)),
        }
    }
}
