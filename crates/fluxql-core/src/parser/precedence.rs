//! Precedence climbing for binary expressions.
//!
//! Expressions are parsed as a flat stream `operand (op operand)*` and folded
//! into a tree one operator at a time.

use crate::ast::{BinaryOp, Expr};

/// Folds `op rhs` into the tree rooted at `lhs`.
///
/// If the root is a binary expression whose operator binds looser than `op`,
/// the tree rotates once: `op` takes the root's right operand and `rhs`, and
/// the root keeps its left side. Deeper nodes are never revisited. Otherwise
/// the whole tree becomes the left operand, which keeps equal precedence
/// left-associative. Parenthesized groups are leaves and are never entered.
#[must_use]
pub fn attach(lhs: Expr, op: BinaryOp, rhs: Expr) -> Expr {
    match lhs {
        Expr::Binary {
            left,
            op: root_op,
            right,
        } if root_op.precedence() < op.precedence() => Expr::Binary {
            left,
            op: root_op,
            right: Box::new((*right).binary(op, rhs)),
        },
        lhs => lhs.binary(op, rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Expr {
        Expr::number(v)
    }

    #[test]
    fn test_higher_precedence_on_right() {
        // 1 + 2 * 3 => 1 + (2 * 3)
        let expr = attach(n(1.0).binary(BinaryOp::Add, n(2.0)), BinaryOp::Mul, n(3.0));
        assert_eq!(
            expr,
            n(1.0).binary(BinaryOp::Add, n(2.0).binary(BinaryOp::Mul, n(3.0)))
        );
    }

    #[test]
    fn test_higher_precedence_on_left() {
        // 1 * 2 + 3 => (1 * 2) + 3
        let expr = attach(n(1.0).binary(BinaryOp::Mul, n(2.0)), BinaryOp::Add, n(3.0));
        assert_eq!(
            expr,
            n(1.0).binary(BinaryOp::Mul, n(2.0)).binary(BinaryOp::Add, n(3.0))
        );
    }

    #[test]
    fn test_equal_precedence_is_left_associative() {
        let expr = attach(n(1.0).binary(BinaryOp::Mul, n(2.0)), BinaryOp::Mul, n(3.0));
        assert_eq!(
            expr,
            n(1.0).binary(BinaryOp::Mul, n(2.0)).binary(BinaryOp::Mul, n(3.0))
        );
    }

    #[test]
    fn test_rotates_one_level_only() {
        // a OR b AND c = d => a OR ((b AND c) = d)
        let a = Expr::var_ref("a");
        let b = Expr::var_ref("b");
        let c = Expr::var_ref("c");
        let d = Expr::var_ref("d");
        let tree = attach(a.clone().or(b.clone()), BinaryOp::And, c.clone());
        let tree = attach(tree, BinaryOp::Eq, d.clone());
        assert_eq!(tree, a.or(b.and(c).eq(d)));
    }

    #[test]
    fn test_paren_is_a_leaf() {
        let group = n(1.0).binary(BinaryOp::Add, n(2.0)).paren();
        let expr = attach(group.clone(), BinaryOp::Mul, n(3.0));
        assert_eq!(expr, group.binary(BinaryOp::Mul, n(3.0)));
    }
}
