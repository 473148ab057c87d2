//! Expression tree model: operand leaves and operator nodes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use termtree::Tree;

use crate::domain::error::{DomainError, DomainResult};

/// Binary operators understood by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Binding strength: `*` and `/` bind tighter than `+` and `-`.
    pub fn precedence(self) -> i8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Floating-point width used for evaluation and operand rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// IEEE-754 binary32
    #[default]
    Single,
    /// IEEE-754 binary64
    Double,
}

impl FromStr for Precision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "f32" => Ok(Precision::Single),
            "double" | "f64" => Ok(Precision::Double),
            _ => Err(DomainError::UnknownVariant {
                kind: "precision",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Single => f.write_str("single"),
            Precision::Double => f.write_str("double"),
        }
    }
}

/// Result of an evaluation in the requested precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Single(f32),
    Double(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Single(v) => write!(f, "{v:?}"),
            Value::Double(v) => write!(f, "{v:?}"),
        }
    }
}

/// A numeric literal, parsed once per precision from its source text.
///
/// Keeping both parses avoids double rounding when the double value would
/// otherwise be narrowed to single precision (or widened the other way).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Literal {
    single: f32,
    double: f64,
}

impl Literal {
    /// Parse a run of digits and `.` such as `42`, `2.5`, `.5` or `5.`.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidNumber(text.to_string());
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(invalid());
        }
        let single: f32 = text.parse().map_err(|_| invalid())?;
        let double: f64 = text.parse().map_err(|_| invalid())?;
        // single-precision overflow is infinity, as in f32 arithmetic
        if !double.is_finite() {
            return Err(invalid());
        }
        Ok(Self { single, double })
    }

    pub fn single(&self) -> f32 {
        self.single
    }

    pub fn double(&self) -> f64 {
        self.double
    }

    pub fn value(&self, precision: Precision) -> Value {
        match precision {
            Precision::Single => Value::Single(self.single),
            Precision::Double => Value::Double(self.double),
        }
    }

    /// Shortest round-trip decimal form, `42.0` for whole values.
    ///
    /// Very large or small magnitudes switch to exponent form with a bare
    /// mantissa and lowercase `e` (`1e-5`, `1e16`), never `1.0E-5`.
    pub fn render(&self, precision: Precision) -> String {
        self.value(precision).to_string()
    }
}

/// A node of the expression tree.
///
/// Operator nodes own both children; the tree never shares subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Operand(Literal),
    Operator {
        op: Operator,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },
}

impl ExprNode {
    pub fn operand(literal: Literal) -> Self {
        ExprNode::Operand(literal)
    }

    pub fn binary(op: Operator, left: ExprNode, right: ExprNode) -> Self {
        ExprNode::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ExprNode::Operand(_))
    }

    /// Number of levels, a single operand has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            ExprNode::Operand(_) => 1,
            ExprNode::Operator { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            ExprNode::Operand(_) => 1,
            ExprNode::Operator { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    fn label(&self, precision: Precision) -> String {
        match self {
            ExprNode::Operand(literal) => literal.render(precision),
            ExprNode::Operator { op, .. } => op.to_string(),
        }
    }

    fn to_termtree(&self, precision: Precision) -> Tree<String> {
        let tree = Tree::new(self.label(precision));
        match self {
            ExprNode::Operand(_) => tree,
            ExprNode::Operator { left, right, .. } => tree.with_leaves([
                left.to_termtree(precision),
                right.to_termtree(precision),
            ]),
        }
    }
}

/// An expression tree as produced by the builder. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionTree {
    root: Option<ExprNode>,
}

impl ExpressionTree {
    pub fn new(root: ExprNode) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<&ExprNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, ExprNode::depth)
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, ExprNode::node_count)
    }

    /// Shape of the tree for terminal display, children listed left then right.
    pub fn to_termtree(&self, precision: Precision) -> Tree<String> {
        match &self.root {
            Some(root) => root.to_termtree(precision),
            None => Tree::new("(empty)".to_string()),
        }
    }
}
