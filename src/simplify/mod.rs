//! Smart constructors. Every operation node in a tree is built here, already folded and
//! in canonical order.

mod functions;
mod power;
mod product;
mod sum;
mod update;

pub use functions::{abs, apply};
pub use power::{pow, root};
pub use product::{div, mul, neg, product};
pub use sum::{add, sub, sum};

use crate::expr::{Expr, VariadicOperator};
use crate::ordering::compare;

/// Builds the node for a flattened commutative operand list. Operands are sorted; two
/// operands make a binary node, one is returned as is, none gives `empty`.
fn assemble(op: VariadicOperator, mut operands: Vec<Expr>, empty: Expr) -> Expr {
    match operands.len() {
        0 => empty,
        1 => operands.swap_remove(0),
        2 => {
            operands.sort_by(compare);
            let second = operands.swap_remove(1);
            let first = operands.swap_remove(0);
            Expr::binary_node(op.as_binary(), first, second)
        }
        _ => {
            operands.sort_by(compare);
            Expr::variadic_node(op, operands)
        }
    }
}
