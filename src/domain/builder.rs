//! Tree builder: infix text to expression tree.
//!
//! A shunting-yard pass that reduces directly into tree nodes instead of
//! emitting postfix tokens.

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{ExprNode, ExpressionTree, Literal, Operator};

/// Entry on the pending-operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackEntry {
    Open,
    Op(Operator),
}

impl StackEntry {
    /// `(` ranks below every operator so only a matching `)` removes it.
    fn precedence(self) -> i8 {
        match self {
            StackEntry::Open => -1,
            StackEntry::Op(op) => op.precedence(),
        }
    }
}

/// Constructs expression trees from validated infix strings.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<ExprNode>,
    operators: Vec<StackEntry>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from an expression accepted by the validator.
    ///
    /// Never panics. Tokens must alternate between operand and operator
    /// position, so operator runs the validator lets through (`1**2`, `*3`,
    /// `1 + + 2`), juxtaposed operands (`(1)(2)`, `1 2`) and operand-free
    /// input (`()`) are reported as [`DomainError::MalformedExpression`].
    #[instrument(level = "debug", skip(self))]
    pub fn build(&mut self, expression: &str) -> DomainResult<ExpressionTree> {
        // Reset state for a fresh build
        self.nodes.clear();
        self.operators.clear();

        // true while the next token must start an operand: a literal or `(`
        let mut expect_operand = true;

        let mut chars = expression.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            if c.is_whitespace() {
                continue;
            }

            if c.is_ascii_digit() || c == '.' {
                if !expect_operand {
                    return Err(missing_operator(start));
                }
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' {
                        end = i + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = Literal::parse(&expression[start..end])?;
                trace!(text = &expression[start..end], "operand");
                self.nodes.push(ExprNode::operand(literal));
                expect_operand = false;
            } else if c == '(' {
                if !expect_operand {
                    return Err(missing_operator(start));
                }
                self.operators.push(StackEntry::Open);
            } else if c == ')' {
                if expect_operand {
                    return Err(DomainError::MalformedExpression(format!(
                        "missing operand before ')' at position {start}"
                    )));
                }
                self.close_group(start)?;
            } else if let Some(op) = Operator::from_char(c) {
                if expect_operand {
                    return Err(DomainError::MalformedExpression(format!(
                        "operator '{op}' at position {start} is missing its left operand"
                    )));
                }
                self.push_operator(op)?;
                expect_operand = true;
            } else {
                return Err(DomainError::MalformedExpression(format!(
                    "unexpected character {c:?} at position {start}"
                )));
            }
        }

        if expect_operand {
            let reason = if self.nodes.is_empty() && self.operators.is_empty() {
                "expression contains no operands"
            } else {
                "expression ends without an operand"
            };
            return Err(DomainError::MalformedExpression(reason.to_string()));
        }

        while let Some(entry) = self.operators.pop() {
            match entry {
                StackEntry::Op(op) => self.reduce(op)?,
                StackEntry::Open => {
                    return Err(DomainError::MalformedExpression(
                        "unclosed '('".to_string(),
                    ))
                }
            }
        }

        let root = self.nodes.pop();
        match (root, self.nodes.is_empty()) {
            (Some(root), true) => {
                debug!(nodes = root.node_count(), depth = root.depth(), "built tree");
                Ok(ExpressionTree::new(root))
            }
            (Some(_), false) => Err(DomainError::MalformedExpression(
                "missing operator between operands".to_string(),
            )),
            (None, _) => Err(DomainError::MalformedExpression(
                "expression contains no operands".to_string(),
            )),
        }
    }

    fn push_operator(&mut self, op: Operator) -> DomainResult<()> {
        // `>=` gives left associativity for equal precedence
        while let Some(&top) = self.operators.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.operators.pop();
            if let StackEntry::Op(pending) = top {
                self.reduce(pending)?;
            }
        }
        self.operators.push(StackEntry::Op(op));
        Ok(())
    }

    fn close_group(&mut self, position: usize) -> DomainResult<()> {
        loop {
            match self.operators.pop() {
                Some(StackEntry::Open) => return Ok(()),
                Some(StackEntry::Op(op)) => self.reduce(op)?,
                None => {
                    return Err(DomainError::MalformedExpression(format!(
                        "unmatched ')' at position {position}"
                    )))
                }
            }
        }
    }

    /// Pop right then left, push the combined node.
    fn reduce(&mut self, op: Operator) -> DomainResult<()> {
        let right = self.nodes.pop();
        let left = self.nodes.pop();
        match (left, right) {
            (Some(left), Some(right)) => {
                self.nodes.push(ExprNode::binary(op, left, right));
                Ok(())
            }
            _ => Err(DomainError::MalformedExpression(format!(
                "operator '{op}' is missing an operand"
            ))),
        }
    }
}

fn missing_operator(position: usize) -> DomainError {
    DomainError::MalformedExpression(format!(
        "missing operator before position {position}"
    ))
}

/// Convenience wrapper around a one-off [`TreeBuilder`].
pub fn build_tree(expression: &str) -> DomainResult<ExpressionTree> {
    TreeBuilder::new().build(expression)
}
