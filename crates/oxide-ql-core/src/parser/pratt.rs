//! Operator table for the precedence-climbing expression parser.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, Op, TokenKind};

/// Returns the binary operator a token stands for.
///
/// `NOT`, `IS`, `IN` and `BETWEEN` are handled by the parser itself since
/// they do not take a plain right operand.
#[must_use]
pub const fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Keyword(Keyword::Or) => BinaryOp::Or,
        TokenKind::Keyword(Keyword::And) => BinaryOp::And,
        TokenKind::Keyword(Keyword::Like) => BinaryOp::Like,
        TokenKind::Op(op) => match op {
            Op::Eq => BinaryOp::Eq,
            Op::NotEq => BinaryOp::NotEq,
            Op::Lt => BinaryOp::Lt,
            Op::LtEq => BinaryOp::LtEq,
            Op::Gt => BinaryOp::Gt,
            Op::GtEq => BinaryOp::GtEq,
            Op::Concat => BinaryOp::Concat,
            Op::Plus => BinaryOp::Add,
            Op::Minus => BinaryOp::Sub,
            Op::Star => BinaryOp::Mul,
            Op::Slash => BinaryOp::Div,
            Op::Percent => BinaryOp::Rem,
        },
        _ => return None,
    };
    Some(op)
}

/// Returns the prefix operator a token stands for.
#[must_use]
pub const fn unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Op(Op::Minus) => Some(UnaryOp::Neg),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        _ => None,
    }
}

/// Returns true if the token starts a postfix predicate: `IS`, `IN`,
/// `BETWEEN`, or `NOT` followed by one of `IN`, `BETWEEN` and `LIKE`.
#[must_use]
pub const fn is_predicate_start(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Keyword(Keyword::Is | Keyword::In | Keyword::Between | Keyword::Not)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_ops() {
        assert_eq!(binary_op(&TokenKind::Op(Op::Concat)), Some(BinaryOp::Concat));
        assert_eq!(
            binary_op(&TokenKind::Keyword(Keyword::Like)),
            Some(BinaryOp::Like)
        );
        assert_eq!(binary_op(&TokenKind::Keyword(Keyword::Not)), None);
        assert_eq!(binary_op(&TokenKind::Comma), None);
    }

    #[test]
    fn test_minus_is_both_prefix_and_infix() {
        let minus = TokenKind::Op(Op::Minus);
        assert_eq!(unary_op(&minus), Some(UnaryOp::Neg));
        assert_eq!(binary_op(&minus), Some(BinaryOp::Sub));
        assert_eq!(unary_op(&TokenKind::Op(Op::Plus)), None);
    }
}
