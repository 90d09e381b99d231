//! Canonical total order over expressions.
//!
//! Used to sort the operands of additions and multiplications. Every node shape has a
//! fixed rank; nodes of equal rank compare by value, name or operands left to right.

use std::cmp::Ordering;

use crate::expr::{BinaryOperator, Expr, Node};

const NUMBER: u8 = 0;
const CONSTANT: u8 = 1;
const VARIABLE: u8 = 2;
const FUNCTION: u8 = 3;
const ABSOLUTE_VALUE: u8 = 4;
const ADDITION: u8 = 5;
const SUBTRACTION: u8 = 6;
const MULTIPLICATION: u8 = 7;
const DIVISION: u8 = 8;
const ROOT: u8 = 9;
const POWER: u8 = 10;
const NEGATION: u8 = 11;

fn operator_rank(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Addition => ADDITION,
        BinaryOperator::Subtraction => SUBTRACTION,
        BinaryOperator::Multiplication => MULTIPLICATION,
        BinaryOperator::Division => DIVISION,
        BinaryOperator::Root => ROOT,
        BinaryOperator::Power => POWER,
    }
}

fn rank(expr: &Expr) -> u8 {
    match expr.node() {
        Node::Number(_) => NUMBER,
        Node::Constant(_) => CONSTANT,
        Node::Variable(_) => VARIABLE,
        Node::Function { .. } => FUNCTION,
        Node::AbsoluteValue(_) => ABSOLUTE_VALUE,
        Node::Negation(_) => NEGATION,
        // Constant fractions sort among the integers.
        Node::Binary { .. } if expr.is_simple_fraction() => NUMBER,
        Node::Binary { op, .. } => operator_rank(*op),
        Node::Variadic { op, .. } => operator_rank(op.as_binary()),
    }
}

pub fn compare(a: &Expr, b: &Expr) -> Ordering {
    if Expr::ptr_eq(a, b) {
        return Ordering::Equal;
    }

    let rank_a = rank(a);
    let rank_b = rank(b);
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    if rank_a == NUMBER {
        return compare_numeric(a, b);
    }

    match (a.node(), b.node()) {
        (Node::Variable(x), Node::Variable(y)) => x.cmp(y),
        (Node::Constant(x), Node::Constant(y)) => x.name().cmp(y.name()),
        (
            Node::Function {
                func: f,
                operand: x,
            },
            Node::Function {
                func: g,
                operand: y,
            },
        ) => f.name().cmp(g.name()).then_with(|| compare(x, y)),
        (Node::Negation(x), Node::Negation(y))
        | (Node::AbsoluteValue(x), Node::AbsoluteValue(y)) => compare(x, y),
        // Same rank, so the same operator family.
        _ => compare_operands(a.operand_slice(), b.operand_slice())
            .then_with(|| a.is_variadic_operation().cmp(&b.is_variadic_operation())),
    }
}

fn compare_numeric(a: &Expr, b: &Expr) -> Ordering {
    match (a.as_fraction(), b.as_fraction()) {
        (Some(x), Some(y)) => x
            .cmp(&y)
            .then_with(|| b.is_number().cmp(&a.is_number())),
        // Unreachable for trees built by this crate.
        _ => Ordering::Equal,
    }
}

fn compare_operands(a: &[Expr], b: &[Expr]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match compare(x, y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}
