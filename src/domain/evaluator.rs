//! Recursive evaluation of expression trees.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{ExprNode, ExpressionTree, Literal, Operator, Precision, Value};

/// Floating-point type the evaluator can compute in.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const ZERO: Self;

    fn from_literal(literal: &Literal) -> Self;
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;

    fn from_literal(literal: &Literal) -> Self {
        literal.single()
    }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;

    fn from_literal(literal: &Literal) -> Self {
        literal.double()
    }
}

impl Operator {
    /// Combine two evaluated operands. Division by exact zero fails.
    pub fn apply<T: Scalar>(self, left: T, right: T) -> DomainResult<T> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Sub => Ok(left - right),
            Operator::Mul => Ok(left * right),
            Operator::Div => {
                if right == T::ZERO {
                    return Err(DomainError::DivisionByZero);
                }
                Ok(left / right)
            }
        }
    }
}

impl ExprNode {
    /// Evaluate left subtree, then right, then combine.
    pub fn evaluate_as<T: Scalar>(&self) -> DomainResult<T> {
        match self {
            ExprNode::Operand(literal) => Ok(T::from_literal(literal)),
            ExprNode::Operator { op, left, right } => {
                let left = left.evaluate_as::<T>()?;
                let right = right.evaluate_as::<T>()?;
                op.apply(left, right)
            }
        }
    }
}

impl ExpressionTree {
    /// Evaluate in the given floating-point type; an empty tree yields zero.
    pub fn evaluate_as<T: Scalar>(&self) -> DomainResult<T> {
        match self.root() {
            Some(root) => root.evaluate_as(),
            None => Ok(T::ZERO),
        }
    }

    /// Single-precision evaluation.
    pub fn evaluate(&self) -> DomainResult<f32> {
        self.evaluate_as::<f32>()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn evaluate_with(&self, precision: Precision) -> DomainResult<Value> {
        let value = match precision {
            Precision::Single => Value::Single(self.evaluate_as::<f32>()?),
            Precision::Double => Value::Double(self.evaluate_as::<f64>()?),
        };
        debug!(%value, "evaluated");
        Ok(value)
    }
}
