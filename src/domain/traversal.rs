//! Depth-first orderings of an expression tree.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::domain::error::DomainError;
use crate::domain::node::{ExprNode, ExpressionTree, Literal, Operator, Precision};

/// The three canonical depth-first orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// operator, left, right
    Pre,
    /// left, operator, right
    In,
    /// left, right, operator
    Post,
}

impl Traversal {
    pub const ALL: [Traversal; 3] = [Traversal::Pre, Traversal::In, Traversal::Post];

    pub fn title(self) -> &'static str {
        match self {
            Traversal::Pre => "Pre-order",
            Traversal::In => "In-order",
            Traversal::Post => "Post-order",
        }
    }
}

impl FromStr for Traversal {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pre" | "preorder" | "pre-order" => Ok(Traversal::Pre),
            "in" | "inorder" | "in-order" => Ok(Traversal::In),
            "post" | "postorder" | "post-order" => Ok(Traversal::Post),
            _ => Err(DomainError::UnknownVariant {
                kind: "traversal order",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One element of a traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Operand(Literal),
    Operator(Operator),
}

impl Token {
    pub fn render(&self, precision: Precision) -> String {
        match self {
            Token::Operand(literal) => literal.render(precision),
            Token::Operator(op) => op.to_string(),
        }
    }
}

impl ExprNode {
    fn visit(&self, order: Traversal, out: &mut Vec<Token>) {
        match self {
            ExprNode::Operand(literal) => out.push(Token::Operand(*literal)),
            ExprNode::Operator { op, left, right } => {
                if order == Traversal::Pre {
                    out.push(Token::Operator(*op));
                }
                left.visit(order, out);
                if order == Traversal::In {
                    out.push(Token::Operator(*op));
                }
                right.visit(order, out);
                if order == Traversal::Post {
                    out.push(Token::Operator(*op));
                }
            }
        }
    }

    pub fn tokens(&self, order: Traversal) -> Vec<Token> {
        let mut out = Vec::with_capacity(self.node_count());
        self.visit(order, &mut out);
        out
    }
}

impl ExpressionTree {
    /// Tokens in the requested order; empty for an empty tree.
    pub fn tokens(&self, order: Traversal) -> Vec<Token> {
        self.root()
            .map(|root| root.tokens(order))
            .unwrap_or_default()
    }

    /// Tokens joined by single spaces, each followed by a space (`"+ 3 4 "`).
    pub fn render(&self, order: Traversal, precision: Precision) -> String {
        self.tokens(order)
            .iter()
            .map(|token| format!("{} ", token.render(precision)))
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::build_tree;

    #[test]
    fn given_empty_tree_when_rendering_then_produces_nothing() {
        let tree = ExpressionTree::default();
        for order in Traversal::ALL {
            assert!(tree.tokens(order).is_empty());
            assert_eq!(tree.render(order, Precision::Single), "");
        }
    }

    #[test]
    fn given_single_operand_when_rendering_then_all_orders_agree() {
        let tree = build_tree("42").unwrap();
        for order in Traversal::ALL {
            assert_eq!(tree.render(order, Precision::Single), "42.0 ");
        }
    }

    #[test]
    fn given_order_names_when_parsing_then_accepts_short_and_long_forms() {
        assert_eq!("pre".parse::<Traversal>().unwrap(), Traversal::Pre);
        assert_eq!("In-Order".parse::<Traversal>().unwrap(), Traversal::In);
        assert_eq!("postorder".parse::<Traversal>().unwrap(), Traversal::Post);
        assert!("level".parse::<Traversal>().is_err());
    }
}
