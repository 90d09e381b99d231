use num_integer::Integer;
use num_traits::Signed;
use tracing::trace;

use super::{mul, neg};
use crate::error::{CasError, Result};
use crate::expr::{BinaryOperator, Expr, Node};
use crate::math::{exact_pow, simplify_sqrt};

pub fn pow(base: Expr, exponent: Expr) -> Result<Expr> {
    if exponent.is_zero() {
        if base.is_zero() {
            return Err(CasError::undefined("0^0"));
        }
        return Ok(Expr::one());
    }
    if exponent.is_one() {
        return Ok(base);
    }
    if base.is_one() {
        return Ok(base);
    }
    if base.is_zero() {
        return match exponent.as_fraction() {
            Some(e) if e.is_negative() => Err(CasError::undefined("division by zero")),
            Some(_) => Ok(base),
            None => Ok(Expr::binary_node(BinaryOperator::Power, base, exponent)),
        };
    }

    if let (Some(b), Some(e)) = (base.as_fraction(), exponent.as_fraction()) {
        if e.is_integer() {
            trace!(%b, %e, "folding constant power");
            return Ok(Expr::from_fraction(exact_pow(b, *e.numer())?));
        }
        // b^(m/n) with a positive integer base is the n-th root of b^m.
        if b.is_integer() && *b.numer() > 0 && !e.is_negative() {
            let raised = Expr::from_fraction(exact_pow(b, *e.numer())?);
            return root(raised, Expr::number(*e.denom()));
        }
    }

    Ok(Expr::binary_node(BinaryOperator::Power, base, exponent))
}

pub fn root(radicand: Expr, degree: Expr) -> Result<Expr> {
    if degree.is_zero() {
        return Err(CasError::undefined("zeroth root"));
    }
    if degree.is_one() {
        return Ok(radicand);
    }
    // root(0, -n) is 0^(-1/n).
    if radicand.is_zero() && degree.as_fraction().is_some_and(|d| d.is_negative()) {
        return Err(CasError::undefined("division by zero"));
    }
    if radicand.is_zero() || radicand.is_one() {
        return Ok(radicand);
    }

    if let (Node::Number(x), Node::Number(n)) = (radicand.node(), degree.node()) {
        let (x, n) = (*x, *n);
        if x < 0 && n > 0 && n.is_odd() {
            let magnitude = x
                .checked_neg()
                .ok_or_else(|| CasError::overflow(format!("-({x})")))?;
            return neg(root(Expr::number(magnitude), degree)?);
        }
        if x > 0 && n == 2 {
            let (factor, remainder) = simplify_sqrt(x.unsigned_abs());
            trace!(x, factor, remainder, "square root factored");
            // Both parts are at most x, so they fit back into an i64.
            let factor = Expr::number(factor as i64);
            if remainder == 1 {
                return Ok(factor);
            }
            if factor.is_one() {
                return Ok(Expr::binary_node(BinaryOperator::Root, radicand, degree));
            }
            let surd = Expr::binary_node(
                BinaryOperator::Root,
                Expr::number(remainder as i64),
                degree,
            );
            return mul(factor, surd);
        }
    }

    Ok(Expr::binary_node(BinaryOperator::Root, radicand, degree))
}
