//! Deterministic expression evaluation against a variable frame.
//!
//! Expressions are the computation layer instructions use for argument
//! lists, store keys, and guard conditions. The operation set is
//! deliberately small and fully deterministic: checked integer arithmetic,
//! ordering comparisons on integers and text, and structural equality.
//! Overflow and division by zero are failures, never wrapping behavior.

use keystone_foundation::{Error, ErrorKind, Result, Type, Value};

use crate::frame::Frame;

// =============================================================================
// Expr
// =============================================================================

/// A deterministic expression evaluated against the current frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Value),
    /// A variable reference, resolved in the current frame.
    Var(String),
    /// A binary operation over two subexpressions.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    /// Checked integer addition.
    Add,
    /// Checked integer subtraction.
    Sub,
    /// Checked integer multiplication.
    Mul,
    /// Checked integer division.
    Div,
    /// Structural equality.
    Eq,
    /// Structural inequality.
    Ne,
    /// Less than (integers and text).
    Lt,
    /// Less than or equal (integers and text).
    Le,
    /// Greater than (integers and text).
    Gt,
    /// Greater than or equal (integers and text).
    Ge,
}

impl Expr {
    /// Creates a literal expression.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates a variable reference.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluates this expression against `frame`.
    ///
    /// # Errors
    /// Returns an error for unbound variables, operand type mismatches,
    /// overflow, or division by zero.
    pub fn eval(&self, frame: &Frame) -> Result<Value> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Var(name) => frame.get(name).cloned(),
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval(frame)?;
                let rhs = rhs.eval(frame)?;
                apply_binary(*op, lhs, rhs)
            }
        }
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    match op {
        BinaryOp::Add => add_values(&lhs, &rhs),
        BinaryOp::Sub => sub_values(&lhs, &rhs),
        BinaryOp::Mul => mul_values(&lhs, &rhs),
        BinaryOp::Div => div_values(&lhs, &rhs),
        BinaryOp::Eq => Ok(Value::Bool(lhs == rhs)),
        BinaryOp::Ne => Ok(Value::Bool(lhs != rhs)),
        BinaryOp::Lt => compare_values(&lhs, &rhs).map(|o| Value::Bool(o.is_lt())),
        BinaryOp::Le => compare_values(&lhs, &rhs).map(|o| Value::Bool(o.is_le())),
        BinaryOp::Gt => compare_values(&lhs, &rhs).map(|o| Value::Bool(o.is_gt())),
        BinaryOp::Ge => compare_values(&lhs, &rhs).map(|o| Value::Bool(o.is_ge())),
    }
}

// =============================================================================
// Value helpers
// =============================================================================

/// Adds two values.
fn add_values(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x
            .checked_add(*y)
            .map(Value::Int)
            .ok_or_else(|| Error::new(ErrorKind::IntegerOverflow { op: "+" })),
        (Value::Text(x), Value::Text(y)) => Ok(Value::Text(format!("{x}{y}").into())),
        _ => Err(Error::type_mismatch(Type::Int, a.value_type())),
    }
}

/// Subtracts two values.
fn sub_values(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x
            .checked_sub(*y)
            .map(Value::Int)
            .ok_or_else(|| Error::new(ErrorKind::IntegerOverflow { op: "-" })),
        _ => Err(Error::type_mismatch(Type::Int, a.value_type())),
    }
}

/// Multiplies two values.
fn mul_values(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x
            .checked_mul(*y)
            .map(Value::Int)
            .ok_or_else(|| Error::new(ErrorKind::IntegerOverflow { op: "*" })),
        _ => Err(Error::type_mismatch(Type::Int, a.value_type())),
    }
}

/// Divides two values.
fn div_values(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Int(_), Value::Int(0)) => Err(Error::new(ErrorKind::DivisionByZero)),
        (Value::Int(x), Value::Int(y)) => x
            .checked_div(*y)
            .map(Value::Int)
            .ok_or_else(|| Error::new(ErrorKind::IntegerOverflow { op: "/" })),
        _ => Err(Error::type_mismatch(Type::Int, a.value_type())),
    }
}

/// Compares two values of the same orderable type.
fn compare_values(a: &Value, b: &Value) -> Result<std::cmp::Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Text(x), Value::Text(y)) => Ok(x.cmp(y)),
        (Value::Int(_), _) | (Value::Text(_), _) => {
            Err(Error::type_mismatch(a.value_type(), b.value_type()))
        }
        _ => Err(Error::type_mismatch(Type::Int, a.value_type())),
    }
}
