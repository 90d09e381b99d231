use crate::error::Result;
use crate::expr::{Constant, Expr, MathFunction, Node};
use crate::math::exact_abs;

pub fn abs(a: Expr) -> Result<Expr> {
    if let Some(value) = a.as_fraction() {
        return Ok(Expr::from_fraction(exact_abs(value)?));
    }
    match a.node() {
        Node::Negation(inner) => abs(inner.clone()),
        Node::AbsoluteValue(_) | Node::Constant(_) => Ok(a),
        _ => Ok(Expr::abs_node(a)),
    }
}

/// Applies a named function, folding the values it takes at its special points.
pub fn apply(func: MathFunction, operand: Expr) -> Result<Expr> {
    let folded = match (func, operand.node()) {
        (MathFunction::Ln, _) if operand.is_one() => Some(Expr::zero()),
        (MathFunction::Ln, Node::Constant(Constant::E)) => Some(Expr::one()),
        (
            MathFunction::Ln,
            Node::Function {
                func: MathFunction::Exp,
                operand: inner,
            },
        )
        | (
            MathFunction::Exp,
            Node::Function {
                func: MathFunction::Ln,
                operand: inner,
            },
        ) => Some(inner.clone()),
        (MathFunction::Exp | MathFunction::Cos, _) if operand.is_zero() => Some(Expr::one()),
        (MathFunction::Sin | MathFunction::Tan, _) if operand.is_zero() => Some(Expr::zero()),
        _ => None,
    };
    Ok(folded.unwrap_or_else(|| Expr::function_node(func, operand)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CasError;
    use crate::simplify::neg;

    fn x() -> Expr {
        Expr::variable("x").unwrap()
    }

    #[test]
    fn abs_folds_constants() {
        assert_eq!(abs(Expr::number(-4)).unwrap(), Expr::number(4));
        assert_eq!(abs(Expr::fraction(-1, 3).unwrap()).unwrap(), Expr::fraction(1, 3).unwrap());
        assert!(abs(Expr::minus_one()).unwrap().is_one());
        assert!(matches!(
            abs(Expr::number(i64::MIN)),
            Err(CasError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn abs_strips_sign_and_is_idempotent() {
        let once = abs(neg(x()).unwrap()).unwrap();
        assert!(once.is_absolute_value());
        assert_eq!(once, abs(x()).unwrap());
        assert!(Expr::ptr_eq(&abs(once.clone()).unwrap(), &once));
    }

    #[test]
    fn functions_fold_special_points() {
        assert!(apply(MathFunction::Ln, Expr::one()).unwrap().is_zero());
        assert!(apply(MathFunction::Ln, Expr::e()).unwrap().is_one());
        assert!(apply(MathFunction::Exp, Expr::zero()).unwrap().is_one());
        assert!(apply(MathFunction::Cos, Expr::zero()).unwrap().is_one());
        assert!(apply(MathFunction::Sin, Expr::zero()).unwrap().is_zero());
        assert!(apply(MathFunction::Tan, Expr::zero()).unwrap().is_zero());
        let ln_x = apply(MathFunction::Ln, x()).unwrap();
        assert!(ln_x.is_ln());
        assert_eq!(apply(MathFunction::Exp, ln_x).unwrap(), x());
    }
}
