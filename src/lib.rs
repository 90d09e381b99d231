//! Canonicalizing core for symbolic algebra: immutable expression trees built only
//! through smart constructors that fold exact 64-bit arithmetic and sort commutative
//! operands, so equivalent inputs end up structurally identical.

pub mod error;
pub mod expr;
pub mod format;
pub mod math;
pub mod ordering;
pub mod simplify;

pub use error::{CasError, Result};
pub use expr::{BinaryOperator, Constant, Expr, MathFunction, Node, VariadicOperator};
pub use format::pretty;
pub use math::{Fraction, checked_pow, fraction, gcd, gcd_signed, int_sqrt, simplify_sqrt};
pub use ordering::compare;
pub use simplify::{abs, add, apply, div, mul, neg, pow, product, root, sub, sum};
