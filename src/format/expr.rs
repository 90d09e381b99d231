use num_traits::Signed;

use crate::expr::{BinaryOperator, Expr, NEGATION_PRECEDENCE, Node, ROOT_PRECEDENCE};
use crate::simplify::neg;

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

pub fn pretty(expr: &Expr) -> String {
    match expr.node() {
        Node::Number(v) => v.to_string(),
        Node::Variable(name) => name.clone(),
        Node::Constant(c) => c.name().to_string(),
        Node::Negation(operand) => format!("-{}", bracket(operand, NEGATION_PRECEDENCE, Side::Left)),
        Node::Function { func, operand } => format!("{}({})", func.name(), pretty(operand)),
        Node::AbsoluteValue(operand) => format!("|{}|", pretty(operand)),
        Node::Binary {
            op: BinaryOperator::Root,
            operands: [radicand, degree],
        } => show_root(radicand, degree),
        Node::Binary { op, operands } => show_chain(*op, operands),
        Node::Variadic { op, operands } => show_chain(op.as_binary(), operands),
    }
}

fn show_chain(op: BinaryOperator, operands: &[Expr]) -> String {
    let prec = op.precedence();
    let mut out = String::new();
    for (i, operand) in operands.iter().enumerate() {
        if i == 0 {
            out.push_str(&bracket(operand, prec, Side::Left));
            continue;
        }
        if op == BinaryOperator::Addition && leads_with_minus(operand) {
            match neg(operand.clone()) {
                Ok(positive) => {
                    out.push('-');
                    out.push_str(&bracket(&positive, prec, Side::Right));
                }
                // No positive form fits, so keep the sign inside parentheses.
                Err(_) => {
                    out.push('+');
                    out.push_str(&format!("({})", pretty(operand)));
                }
            }
            continue;
        }
        out.push_str(op.symbol());
        out.push_str(&bracket(operand, prec, Side::Right));
    }
    out
}

fn show_root(radicand: &Expr, degree: &Expr) -> String {
    let glyph = match degree.node() {
        Node::Number(2) => Some('√'),
        Node::Number(3) => Some('∛'),
        Node::Number(4) => Some('∜'),
        _ => None,
    };
    match glyph {
        Some(glyph) => format!("{glyph}{}", bracket(radicand, ROOT_PRECEDENCE, Side::Left)),
        None => format!("root({}, {})", pretty(radicand), pretty(degree)),
    }
}

/// A term of a sum that reads better as a subtraction of its opposite.
fn leads_with_minus(term: &Expr) -> bool {
    match term.node() {
        Node::Negation(_) => true,
        Node::Number(v) => *v < 0,
        _ if term.is_multiplication() => term
            .factors()
            .first()
            .and_then(Expr::as_fraction)
            .is_some_and(|leading| leading.is_negative()),
        _ => false,
    }
}

/// Left operands are wrapped when they bind looser than the parent, right operands also
/// when they bind equally. A sign on the right is always wrapped.
fn bracket(operand: &Expr, parent: u8, side: Side) -> String {
    let body = pretty(operand);
    if !operand.needs_parentheses() {
        return body;
    }
    let own = operand.precedence().unwrap_or(NEGATION_PRECEDENCE);
    let wrap = match side {
        Side::Left => own > parent,
        Side::Right => own >= parent || !operand.is_operation() || operand.is_negation(),
    };
    if wrap { format!("({body})") } else { body }
}
