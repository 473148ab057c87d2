//! Calculator session: the current expression and the tree built from it.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{validator, ExpressionTree, Precision, Traversal, TreeBuilder, Value};

/// State held by the menu loop between choices.
///
/// At most one expression and one tree exist at a time. Entering a new
/// expression does not discard the previous tree until `build` succeeds.
#[derive(Debug, Default)]
pub struct Session {
    expression: Option<String>,
    tree: Option<ExpressionTree>,
    precision: Precision,
    builder: TreeBuilder,
}

impl Session {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    pub fn tree(&self) -> Option<&ExpressionTree> {
        self.tree.as_ref()
    }

    /// Validate and store `input`. An invalid input clears the stored expression.
    #[instrument(level = "debug", skip(self))]
    pub fn enter_expression(&mut self, input: &str) -> ApplicationResult<()> {
        match validator::check(input) {
            Ok(()) => {
                self.expression = Some(input.to_string());
                Ok(())
            }
            Err(e) => {
                self.expression = None;
                Err(e.into())
            }
        }
    }

    /// Build a tree from the stored expression, replacing the current tree.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&mut self) -> ApplicationResult<&ExpressionTree> {
        let expression = self
            .expression
            .as_deref()
            .ok_or(ApplicationError::NoExpression)?;
        let tree = self.builder.build(expression)?;
        debug!(depth = tree.depth(), "session tree replaced");
        Ok(self.tree.insert(tree))
    }

    /// Render the current tree in `order`.
    pub fn traverse(&self, order: Traversal) -> ApplicationResult<String> {
        let tree = self.tree.as_ref().ok_or(ApplicationError::NoTree)?;
        Ok(tree.render(order, self.precision))
    }

    /// Evaluate the current tree in the session's precision.
    pub fn evaluate(&self) -> ApplicationResult<Value> {
        let tree = self.tree.as_ref().ok_or(ApplicationError::NoTree)?;
        Ok(tree.evaluate_with(self.precision)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_fresh_session_when_building_then_reports_missing_expression() {
        let mut session = Session::default();
        assert!(matches!(session.build(), Err(ApplicationError::NoExpression)));
        assert!(matches!(session.evaluate(), Err(ApplicationError::NoTree)));
        assert!(matches!(
            session.traverse(Traversal::In),
            Err(ApplicationError::NoTree)
        ));
    }

    #[test]
    fn given_invalid_entry_after_valid_one_when_building_then_requires_new_expression() {
        let mut session = Session::default();
        session.enter_expression("1+2").unwrap();
        session.build().unwrap();

        let result = session.enter_expression("1++2");

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InvalidExpression { .. }))
        ));
        assert!(session.expression().is_none());
        assert!(matches!(session.build(), Err(ApplicationError::NoExpression)));
        // previous tree stays available
        assert_eq!(session.evaluate().unwrap(), Value::Single(3.0));
    }

    #[test]
    fn given_double_precision_when_evaluating_then_returns_double_value() {
        let mut session = Session::new(Precision::Double);
        session.enter_expression("1 / 3").unwrap();
        session.build().unwrap();

        assert_eq!(session.evaluate().unwrap(), Value::Double(1.0 / 3.0));
    }
}
