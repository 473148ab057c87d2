//! Domain layer: expression validation, tree construction, traversal and evaluation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod evaluator;
pub mod node;
pub mod traversal;
pub mod validator;

pub use builder::{build_tree, TreeBuilder};
pub use error::{DomainError, DomainResult, ValidationRule};
pub use evaluator::Scalar;
pub use node::{ExprNode, ExpressionTree, Literal, Operator, Precision, Value};
pub use traversal::{Token, Traversal};
pub use validator::{check, validate};
