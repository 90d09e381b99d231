use num_traits::{Signed, Zero};
use tracing::trace;

use super::{assemble, neg};
use crate::error::{CasError, Result};
use crate::expr::{BinaryOperator, Expr, Node, VariadicOperator};
use crate::math::{Fraction, exact_add, exact_sub};

pub fn add(a: Expr, b: Expr) -> Result<Expr> {
    if let (Some(x), Some(y)) = (a.as_fraction(), b.as_fraction()) {
        trace!(%x, %y, "folding constant sum");
        return Ok(Expr::from_fraction(exact_add(x, y)?));
    }
    if a.is_zero() {
        return Ok(b);
    }
    if b.is_zero() {
        return Ok(a);
    }
    collect_sum([a, b])
}

pub fn sub(a: Expr, b: Expr) -> Result<Expr> {
    if let (Some(x), Some(y)) = (a.as_fraction(), b.as_fraction()) {
        trace!(%x, %y, "folding constant difference");
        return Ok(Expr::from_fraction(exact_sub(x, y)?));
    }
    if b.is_zero() {
        return Ok(a);
    }
    if a.is_zero() {
        return neg(b);
    }
    if a == b {
        return Ok(Expr::zero());
    }
    if let Node::Negation(inner) = b.node() {
        return add(a, inner.clone());
    }
    if let Some(opposite) = opposite_of_negative(&b) {
        return add(a, opposite);
    }
    Ok(Expr::binary_node(BinaryOperator::Subtraction, a, b))
}

/// The opposite of a negative constant or of a product led by a negative coefficient.
/// `None` when the term is not negative or its opposite does not fit.
fn opposite_of_negative(term: &Expr) -> Option<Expr> {
    let leading = if term.is_multiplication() {
        term.factors().first()?.as_fraction()?
    } else {
        term.as_fraction()?
    };
    if leading.is_negative() {
        neg(term.clone()).ok()
    } else {
        None
    }
}

/// Adds up a non-empty sequence of terms.
pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Result<Expr> {
    let mut terms = terms.into_iter();
    let first = terms
        .next()
        .ok_or_else(|| CasError::InvalidArgument("sum of no terms".into()))?;
    terms.try_fold(first, add)
}

/// Flattens nested additions, folds every constant term into one and sorts the rest.
fn collect_sum(inputs: [Expr; 2]) -> Result<Expr> {
    let mut constant = Fraction::from_integer(0);
    let mut terms = Vec::new();
    for input in &inputs {
        for term in input.terms() {
            match term.as_fraction() {
                Some(value) => constant = exact_add(constant, value)?,
                None => terms.push(term.clone()),
            }
        }
    }
    if !constant.is_zero() {
        terms.push(Expr::from_fraction(constant));
    }
    Ok(assemble(VariadicOperator::Addition, terms, Expr::zero()))
}
