//! Syntactic admission check for infix expressions.
//!
//! Three independent rules are applied in order: character whitelist,
//! parenthesis balance, operator placement. The first failing rule is reported.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::error::{DomainError, DomainResult, ValidationRule};

// `(?-u)` makes `\s` ASCII whitespace: space, \t, \n, \x0B, \x0C, \r
static WHITELIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^[0-9+\-*/().\s]+$").expect("whitelist regex"));

static ADJACENT_OPERATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\-/]{2,}").expect("adjacent operator regex"));

static EDGE_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^\s*[+\-/]|[+\-/]\s*$").expect("edge operator regex"));

/// Returns true if `expression` passes all three rules.
pub fn validate(expression: &str) -> bool {
    check(expression).is_ok()
}

/// Like [`validate`], but names the rule that rejected the expression.
pub fn check(expression: &str) -> DomainResult<()> {
    let rule = if !has_valid_characters(expression) {
        Some(ValidationRule::Characters)
    } else if !has_balanced_parentheses(expression) {
        Some(ValidationRule::Parentheses)
    } else if !has_valid_operators(expression) {
        Some(ValidationRule::Operators)
    } else {
        None
    };

    match rule {
        Some(rule) => {
            trace!(expression, %rule, "rejected");
            Err(DomainError::InvalidExpression { rule })
        }
        None => Ok(()),
    }
}

fn has_valid_characters(expression: &str) -> bool {
    WHITELIST.is_match(expression)
}

fn has_balanced_parentheses(expression: &str) -> bool {
    let mut depth: i64 = 0;
    for c in expression.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

/// `*` is deliberately absent from the adjacency and edge sets; inputs such
/// as `1**2` or `*3` get past here and are rejected by the tree builder.
fn has_valid_operators(expression: &str) -> bool {
    if ADJACENT_OPERATORS.is_match(expression) || EDGE_OPERATOR.is_match(expression) {
        return false;
    }
    // whitelist re-check
    has_valid_characters(expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_every_allowed_character_when_checking_whitelist_then_accepts() {
        assert!(has_valid_characters("0123456789+-*/(). \t\r\n\x0B\x0C"));
    }

    #[test]
    fn given_unicode_whitespace_when_checking_whitelist_then_rejects() {
        assert!(!has_valid_characters("1\u{00A0}+ 2"));
        assert!(!has_valid_characters("1\u{2003}+2"));
    }

    #[test]
    fn given_close_before_open_when_checking_balance_then_rejects() {
        assert!(!has_balanced_parentheses(")1+2("));
        assert!(has_balanced_parentheses("((1)+(2))"));
        assert!(has_balanced_parentheses("no parens"));
    }

    #[test]
    fn given_multiplication_run_when_checking_operators_then_passes() {
        assert!(has_valid_operators("1**2"));
        assert!(has_valid_operators("*3"));
        assert!(has_valid_operators("1*/2"));
        assert!(!has_valid_operators("1/+2"));
    }

    #[test]
    fn given_first_failing_rule_when_checking_then_reports_it() {
        assert_eq!(
            check("(1+a"),
            Err(DomainError::InvalidExpression {
                rule: ValidationRule::Characters
            })
        );
        assert_eq!(
            check("(1+2"),
            Err(DomainError::InvalidExpression {
                rule: ValidationRule::Parentheses
            })
        );
        assert_eq!(
            check("1+-2"),
            Err(DomainError::InvalidExpression {
                rule: ValidationRule::Operators
            })
        );
    }
}
