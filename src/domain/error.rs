//! Domain-level errors (no external dependencies)

use std::fmt;

use thiserror::Error;

/// Which validator check rejected an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// Empty input or a character outside the whitelist
    Characters,
    /// Unbalanced or prematurely closed parentheses
    Parentheses,
    /// Adjacent operators, or an expression starting/ending with an operator
    Operators,
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValidationRule::Characters => "disallowed or missing characters",
            ValidationRule::Parentheses => "unbalanced parentheses",
            ValidationRule::Operators => "misplaced operator",
        };
        f.write_str(text)
    }
}

/// Domain errors represent failures of the expression pipeline itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid expression: {rule}")]
    InvalidExpression { rule: ValidationRule },

    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
