//! Expression tree definitions, capability queries and accessors.
//!
//! Nodes are immutable and shared through [`Expr`] handles. Outside the crate an
//! expression can only be obtained from the leaf factories on [`Expr`] or from the
//! constructors in [`crate::simplify`], so every tree a caller sees is canonical.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use num_integer::Integer;

use crate::error::{CasError, Result};
use crate::math::{Fraction, fraction};

/// Binding strength used by the printer; lower binds tighter.
pub const ROOT_PRECEDENCE: u8 = 1;
pub const POWER_PRECEDENCE: u8 = 2;
pub const NEGATION_PRECEDENCE: u8 = 3;
pub const PRODUCT_PRECEDENCE: u8 = 4;
pub const SUM_PRECEDENCE: u8 = 5;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum BinaryOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Power,
    Root,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "×",
            BinaryOperator::Division => "∕",
            BinaryOperator::Power => "^",
            BinaryOperator::Root => "root",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Addition | BinaryOperator::Subtraction => SUM_PRECEDENCE,
            BinaryOperator::Multiplication | BinaryOperator::Division => PRODUCT_PRECEDENCE,
            BinaryOperator::Power => POWER_PRECEDENCE,
            BinaryOperator::Root => ROOT_PRECEDENCE,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum VariadicOperator {
    Addition,
    Multiplication,
}

impl VariadicOperator {
    pub fn as_binary(self) -> BinaryOperator {
        match self {
            VariadicOperator::Addition => BinaryOperator::Addition,
            VariadicOperator::Multiplication => BinaryOperator::Multiplication,
        }
    }
}

/// Named mathematical constants.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum MathFunction {
    Ln,
    Exp,
    Sin,
    Cos,
    Tan,
}

impl MathFunction {
    pub fn name(self) -> &'static str {
        match self {
            MathFunction::Ln => "ln",
            MathFunction::Exp => "exp",
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
        }
    }
}

/// The closed set of node shapes.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Node {
    Number(i64),
    Variable(String),
    Constant(Constant),
    Negation(Expr),
    Binary {
        op: BinaryOperator,
        operands: [Expr; 2],
    },
    /// Three or more operands, kept sorted by [`crate::ordering::compare`].
    Variadic {
        op: VariadicOperator,
        operands: Box<[Expr]>,
    },
    Function {
        func: MathFunction,
        operand: Expr,
    },
    AbsoluteValue(Expr),
}

/// Shared handle to an immutable expression node.
#[derive(Clone)]
pub struct Expr(Arc<Node>);

static ZERO: LazyLock<Expr> = LazyLock::new(|| Expr::from_node(Node::Number(0)));
static ONE: LazyLock<Expr> = LazyLock::new(|| Expr::from_node(Node::Number(1)));
static MINUS_ONE: LazyLock<Expr> = LazyLock::new(|| Expr::from_node(Node::Number(-1)));

impl Expr {
    fn from_node(node: Node) -> Self {
        Expr(Arc::new(node))
    }

    pub fn zero() -> Self {
        ZERO.clone()
    }

    pub fn one() -> Self {
        ONE.clone()
    }

    pub fn minus_one() -> Self {
        MINUS_ONE.clone()
    }

    /// An integer leaf. 0, 1 and -1 are always the shared singletons.
    pub fn number(value: i64) -> Self {
        match value {
            0 => Expr::zero(),
            1 => Expr::one(),
            -1 => Expr::minus_one(),
            _ => Expr::from_node(Node::Number(value)),
        }
    }

    /// A reduced constant fraction, or a plain number when `numer` is a multiple of `denom`.
    pub fn fraction(numer: i64, denom: i64) -> Result<Self> {
        Ok(Expr::from_fraction(fraction(numer, denom)?))
    }

    pub fn variable(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CasError::InvalidArgument(
                "variable name must not be empty".into(),
            ));
        }
        Ok(Expr::from_node(Node::Variable(name)))
    }

    pub fn constant(constant: Constant) -> Self {
        Expr::from_node(Node::Constant(constant))
    }

    pub fn pi() -> Self {
        Expr::constant(Constant::Pi)
    }

    pub fn e() -> Self {
        Expr::constant(Constant::E)
    }

    pub(crate) fn from_fraction(value: Fraction) -> Self {
        if value.is_integer() {
            Expr::number(*value.numer())
        } else {
            Expr::binary_node(
                BinaryOperator::Division,
                Expr::number(*value.numer()),
                Expr::number(*value.denom()),
            )
        }
    }

    pub(crate) fn negation_node(operand: Expr) -> Self {
        Expr::from_node(Node::Negation(operand))
    }

    pub(crate) fn binary_node(op: BinaryOperator, first: Expr, second: Expr) -> Self {
        Expr::from_node(Node::Binary {
            op,
            operands: [first, second],
        })
    }

    pub(crate) fn variadic_node(op: VariadicOperator, operands: Vec<Expr>) -> Self {
        Expr::from_node(Node::Variadic {
            op,
            operands: operands.into_boxed_slice(),
        })
    }

    pub(crate) fn function_node(func: MathFunction, operand: Expr) -> Self {
        Expr::from_node(Node::Function { func, operand })
    }

    pub(crate) fn abs_node(operand: Expr) -> Self {
        Expr::from_node(Node::AbsoluteValue(operand))
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// The exact value of a number or a constant fraction.
    pub fn as_fraction(&self) -> Option<Fraction> {
        match self.node() {
            Node::Number(v) => Some(Fraction::from_integer(*v)),
            Node::Binary {
                op: BinaryOperator::Division,
                operands: [numer, denom],
            } => match (numer.node(), denom.node()) {
                (Node::Number(n), Node::Number(d)) => Some(Fraction::new_raw(*n, *d)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_fraction().is_some()
    }

    /// All operands in order; empty for leaves.
    pub(crate) fn operand_slice(&self) -> &[Expr] {
        match self.node() {
            Node::Number(_) | Node::Variable(_) | Node::Constant(_) => &[],
            Node::Negation(operand)
            | Node::Function { operand, .. }
            | Node::AbsoluteValue(operand) => std::slice::from_ref(operand),
            Node::Binary { operands, .. } => &operands[..],
            Node::Variadic { operands, .. } => &operands[..],
        }
    }

    fn binary_op(&self) -> Option<BinaryOperator> {
        match self.node() {
            Node::Binary { op, .. } => Some(*op),
            Node::Variadic { op, .. } => Some(op.as_binary()),
            _ => None,
        }
    }

    pub fn is_operation(&self) -> bool {
        !matches!(
            self.node(),
            Node::Number(_) | Node::Variable(_) | Node::Constant(_)
        )
    }

    pub fn is_unary_operation(&self) -> bool {
        matches!(
            self.node(),
            Node::Negation(_) | Node::Function { .. } | Node::AbsoluteValue(_)
        )
    }

    pub fn is_binary_operation(&self) -> bool {
        matches!(self.node(), Node::Binary { .. })
    }

    pub fn is_variadic_operation(&self) -> bool {
        matches!(self.node(), Node::Variadic { .. })
    }

    pub fn is_addition(&self) -> bool {
        self.binary_op() == Some(BinaryOperator::Addition)
    }

    pub fn is_subtraction(&self) -> bool {
        self.binary_op() == Some(BinaryOperator::Subtraction)
    }

    pub fn is_multiplication(&self) -> bool {
        self.binary_op() == Some(BinaryOperator::Multiplication)
    }

    pub fn is_division(&self) -> bool {
        self.binary_op() == Some(BinaryOperator::Division)
    }

    pub fn is_power(&self) -> bool {
        self.binary_op() == Some(BinaryOperator::Power)
    }

    pub fn is_root(&self) -> bool {
        self.binary_op() == Some(BinaryOperator::Root)
    }

    pub fn is_negation(&self) -> bool {
        matches!(self.node(), Node::Negation(_))
    }

    pub fn is_absolute_value(&self) -> bool {
        matches!(self.node(), Node::AbsoluteValue(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self.node(), Node::Function { .. })
    }

    pub fn is_ln(&self) -> bool {
        matches!(
            self.node(),
            Node::Function {
                func: MathFunction::Ln,
                ..
            }
        )
    }

    pub fn is_number(&self) -> bool {
        matches!(self.node(), Node::Number(_))
    }

    pub fn is_positive_number(&self) -> bool {
        matches!(self.node(), Node::Number(v) if *v > 0)
    }

    pub fn is_negative_number(&self) -> bool {
        matches!(self.node(), Node::Number(v) if *v < 0)
    }

    pub fn is_odd_number(&self) -> bool {
        matches!(self.node(), Node::Number(v) if v.is_odd())
    }

    pub fn is_even_number(&self) -> bool {
        matches!(self.node(), Node::Number(v) if v.is_even())
    }

    /// A division of two numbers, the canonical shape of a non-integral constant.
    pub fn is_simple_fraction(&self) -> bool {
        self.is_division() && self.is_numeric()
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.node(), Node::Variable(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.node(), Node::Constant(_))
    }

    pub fn is_zero(&self) -> bool {
        Expr::ptr_eq(self, &ZERO)
    }

    pub fn is_one(&self) -> bool {
        Expr::ptr_eq(self, &ONE)
    }

    pub fn is_minus_one(&self) -> bool {
        Expr::ptr_eq(self, &MINUS_ONE)
    }

    /// Whether the printer may have to wrap this expression when it appears as an operand.
    pub fn needs_parentheses(&self) -> bool {
        match self.node() {
            Node::Number(v) => *v < 0,
            Node::Variable(_) | Node::Constant(_) => false,
            Node::Function { .. } | Node::AbsoluteValue(_) => false,
            Node::Negation(_) | Node::Binary { .. } | Node::Variadic { .. } => true,
        }
    }

    /// Binding strength of an operation; lower binds tighter.
    pub fn precedence(&self) -> Result<u8> {
        match self.node() {
            Node::Negation(_) => Ok(NEGATION_PRECEDENCE),
            Node::Function { .. } | Node::AbsoluteValue(_) => Ok(0),
            Node::Binary { op, .. } => Ok(op.precedence()),
            Node::Variadic { op, .. } => Ok(op.as_binary().precedence()),
            _ => Err(self.unsupported("precedence")),
        }
    }

    pub fn value(&self) -> Result<i64> {
        match self.node() {
            Node::Number(v) => Ok(*v),
            _ => Err(self.unsupported("value")),
        }
    }

    pub fn name(&self) -> Result<&str> {
        match self.node() {
            Node::Variable(name) => Ok(name),
            Node::Constant(c) => Ok(c.name()),
            _ => Err(self.unsupported("name")),
        }
    }

    /// The operand of a unary operation.
    pub fn operand(&self) -> Result<&Expr> {
        match self.node() {
            Node::Negation(operand)
            | Node::Function { operand, .. }
            | Node::AbsoluteValue(operand) => Ok(operand),
            _ => Err(self.unsupported("operand")),
        }
    }

    /// The first operand of a binary or variadic operation.
    pub fn first_operand(&self) -> Result<&Expr> {
        match self.node() {
            Node::Binary { operands, .. } => Ok(&operands[0]),
            Node::Variadic { operands, .. } => Ok(&operands[0]),
            _ => Err(self.unsupported("first operand")),
        }
    }

    /// The second operand of a binary or variadic operation.
    pub fn second_operand(&self) -> Result<&Expr> {
        match self.node() {
            Node::Binary { operands, .. } => Ok(&operands[1]),
            Node::Variadic { operands, .. } => Ok(&operands[1]),
            _ => Err(self.unsupported("second operand")),
        }
    }

    /// Every operand of a binary or variadic operation.
    pub fn operands(&self) -> Result<&[Expr]> {
        match self.node() {
            Node::Binary { operands, .. } => Ok(&operands[..]),
            Node::Variadic { operands, .. } => Ok(&operands[..]),
            _ => Err(self.unsupported("operands")),
        }
    }

    /// The factors of a multiplication, or the expression itself.
    pub fn factors(&self) -> &[Expr] {
        if self.is_multiplication() {
            self.operand_slice()
        } else {
            std::slice::from_ref(self)
        }
    }

    /// The terms of an addition, or the expression itself.
    pub fn terms(&self) -> &[Expr] {
        if self.is_addition() {
            self.operand_slice()
        } else {
            std::slice::from_ref(self)
        }
    }

    fn kind_name(&self) -> &'static str {
        match self.node() {
            Node::Number(_) => "number",
            Node::Variable(_) => "variable",
            Node::Constant(_) => "constant",
            Node::Negation(_) => "negation",
            Node::Binary { .. } => "binary operation",
            Node::Variadic { .. } => "variadic operation",
            Node::Function { .. } => "function",
            Node::AbsoluteValue(_) => "absolute value",
        }
    }

    fn unsupported(&self, what: &str) -> CasError {
        CasError::unsupported(format!("a {} has no {what}", self.kind_name()))
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Expr::ptr_eq(self, other) || self.0 == other.0
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}
