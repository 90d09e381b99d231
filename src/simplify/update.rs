use super::{abs, add, apply, div, mul, neg, pow, product, root, sub, sum};
use crate::error::{CasError, Result};
use crate::expr::{BinaryOperator, Expr, Node, VariadicOperator};

impl Expr {
    /// Rebuilds this node over new operands through the matching constructor.
    ///
    /// When every operand is the same instance as the current one, `self` is returned
    /// unchanged. Leaves take no operands, unary and binary nodes take exactly one and two,
    /// variadic nodes take any non-empty list.
    pub fn update(&self, operands: &[Expr]) -> Result<Expr> {
        let current = self.operand_slice();
        let unchanged = current.len() == operands.len()
            && current.iter().zip(operands).all(|(a, b)| Expr::ptr_eq(a, b));
        if unchanged {
            return Ok(self.clone());
        }

        match (self.node(), operands) {
            (Node::Negation(_), [operand]) => neg(operand.clone()),
            (Node::AbsoluteValue(_), [operand]) => abs(operand.clone()),
            (Node::Function { func, .. }, [operand]) => apply(*func, operand.clone()),
            (Node::Binary { op, .. }, [first, second]) => {
                let (first, second) = (first.clone(), second.clone());
                match op {
                    BinaryOperator::Addition => add(first, second),
                    BinaryOperator::Subtraction => sub(first, second),
                    BinaryOperator::Multiplication => mul(first, second),
                    BinaryOperator::Division => div(first, second),
                    BinaryOperator::Power => pow(first, second),
                    BinaryOperator::Root => root(first, second),
                }
            }
            (Node::Variadic { op, .. }, operands) if !operands.is_empty() => match op {
                VariadicOperator::Addition => sum(operands.iter().cloned()),
                VariadicOperator::Multiplication => product(operands.iter().cloned()),
            },
            _ => Err(CasError::InvalidArgument(format!(
                "cannot rebuild {self:?} over {} operand(s)",
                operands.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::variable(name).unwrap()
    }

    #[test]
    fn unchanged_operands_return_the_same_node() {
        let (x, y) = (var("x"), var("y"));
        let sum_xy = add(x.clone(), y.clone()).unwrap();
        let operands = sum_xy.operands().unwrap().to_vec();
        assert!(Expr::ptr_eq(&sum_xy.update(&operands).unwrap(), &sum_xy));
        assert!(Expr::ptr_eq(&x.update(&[]).unwrap(), &x));
    }

    #[test]
    fn replaced_operands_are_resimplified() {
        let (x, y) = (var("x"), var("y"));
        let sum_xy = add(x.clone(), y.clone()).unwrap();
        let updated = sum_xy.update(&[x.clone(), Expr::zero()]).unwrap();
        assert!(Expr::ptr_eq(&updated, &x));

        let power = pow(x.clone(), y.clone()).unwrap();
        assert!(power.update(&[x.clone(), Expr::zero()]).unwrap().is_one());

        let swapped = add(y.clone(), x.clone()).unwrap();
        assert_eq!(sum_xy.update(&[y, x]).unwrap(), swapped);
    }

    #[test]
    fn variadic_update_accepts_new_lengths() {
        let (a, b, c) = (var("a"), var("b"), var("c"));
        let abc = sum([a.clone(), b.clone(), c.clone()]).unwrap();
        assert!(abc.is_variadic_operation());
        let shorter = abc.update(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(shorter, add(a, b).unwrap());
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let x = var("x");
        let minus_x = neg(x.clone()).unwrap();
        assert!(matches!(
            minus_x.update(&[x.clone(), x.clone()]),
            Err(CasError::InvalidArgument(_))
        ));
        assert!(matches!(
            x.update(&[Expr::one()]),
            Err(CasError::InvalidArgument(_))
        ));
    }

    #[test]
    fn constant_fractions_refold() {
        let half = Expr::fraction(1, 2).unwrap();
        let updated = half.update(&[Expr::number(4), Expr::number(2)]).unwrap();
        assert_eq!(updated, Expr::number(2));
    }
}
