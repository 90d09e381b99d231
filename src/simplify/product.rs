use num_traits::Zero;
use tracing::trace;

use super::assemble;
use crate::error::{CasError, Result};
use crate::expr::{BinaryOperator, Expr, Node, VariadicOperator};
use crate::math::{Fraction, exact_div, exact_mul, exact_neg, exact_recip};

pub fn mul(a: Expr, b: Expr) -> Result<Expr> {
    if a.is_zero() || b.is_zero() {
        return Ok(Expr::zero());
    }
    if let (Some(x), Some(y)) = (a.as_fraction(), b.as_fraction()) {
        trace!(%x, %y, "folding constant product");
        return Ok(Expr::from_fraction(exact_mul(x, y)?));
    }
    if a.is_one() {
        return Ok(b);
    }
    if b.is_one() {
        return Ok(a);
    }
    collect_product(&[a, b])
}

pub fn div(a: Expr, b: Expr) -> Result<Expr> {
    if b.is_zero() {
        return Err(CasError::undefined("division by zero"));
    }
    if let (Some(x), Some(y)) = (a.as_fraction(), b.as_fraction()) {
        trace!(%x, %y, "folding constant quotient");
        return Ok(Expr::from_fraction(exact_div(x, y)?));
    }
    if b.is_one() {
        return Ok(a);
    }
    if b.is_minus_one() {
        return neg(a);
    }
    if a.is_zero() {
        return Ok(a);
    }
    if let Some(divisor) = b.as_fraction() {
        return mul(Expr::from_fraction(exact_recip(divisor)?), a);
    }
    match (a.node(), b.node()) {
        (Node::Negation(p), Node::Negation(q)) => return div(p.clone(), q.clone()),
        (Node::Negation(p), _) => return neg(div(p.clone(), b.clone())?),
        (_, Node::Negation(q)) => return neg(div(a.clone(), q.clone())?),
        _ => {}
    }
    Ok(Expr::binary_node(BinaryOperator::Division, a, b))
}

pub fn neg(a: Expr) -> Result<Expr> {
    if let Some(value) = a.as_fraction() {
        return Ok(Expr::from_fraction(exact_neg(value)?));
    }
    match a.node() {
        Node::Negation(inner) => Ok(inner.clone()),
        _ if a.is_multiplication() && a.factors().iter().any(Expr::is_numeric) => {
            collect_product(&[Expr::minus_one(), a])
        }
        _ => Ok(Expr::negation_node(a)),
    }
}

/// Multiplies a non-empty sequence of factors.
pub fn product(factors: impl IntoIterator<Item = Expr>) -> Result<Expr> {
    let mut factors = factors.into_iter();
    let first = factors
        .next()
        .ok_or_else(|| CasError::InvalidArgument("product of no factors".into()))?;
    factors.try_fold(first, mul)
}

/// Flattens nested products and negations into one coefficient and a sorted factor list.
/// A coefficient of -1 is pulled out as a negation of the remaining product.
fn collect_product(inputs: &[Expr]) -> Result<Expr> {
    let mut coefficient = Fraction::from_integer(1);
    let mut factors = Vec::new();
    for input in inputs {
        gather_factors(input, &mut coefficient, &mut factors)?;
    }

    if coefficient.is_zero() {
        return Ok(Expr::zero());
    }
    if factors.is_empty() {
        return Ok(Expr::from_fraction(coefficient));
    }
    if coefficient == Fraction::from_integer(1) {
        return Ok(assemble(VariadicOperator::Multiplication, factors, Expr::one()));
    }
    if coefficient == Fraction::from_integer(-1) {
        let rest = assemble(VariadicOperator::Multiplication, factors, Expr::one());
        return Ok(Expr::negation_node(rest));
    }
    factors.push(Expr::from_fraction(coefficient));
    Ok(assemble(VariadicOperator::Multiplication, factors, Expr::one()))
}

fn gather_factors(expr: &Expr, coefficient: &mut Fraction, factors: &mut Vec<Expr>) -> Result<()> {
    if let Node::Negation(inner) = expr.node() {
        *coefficient = exact_neg(*coefficient)?;
        return gather_factors(inner, coefficient, factors);
    }
    for factor in expr.factors() {
        match factor.as_fraction() {
            Some(value) => *coefficient = exact_mul(*coefficient, value)?,
            None => factors.push(factor.clone()),
        }
    }
    Ok(())
}
