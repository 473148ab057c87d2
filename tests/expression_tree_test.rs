//! Tests for building, traversing and evaluating expression trees

use rstest::rstest;

use exprtree::domain::{
    build_tree, DomainError, ExprNode, ExpressionTree, Literal, Operator, Precision, Token,
    Traversal, TreeBuilder,
};

fn build(input: &str) -> ExpressionTree {
    build_tree(input).unwrap_or_else(|e| panic!("{input:?} should build: {e}"))
}

fn eval(input: &str) -> f32 {
    build(input).evaluate().expect("evaluates")
}

/// Stack evaluation of a post-order token sequence.
fn eval_rpn(tokens: &[Token]) -> Result<f32, DomainError> {
    let mut stack: Vec<f32> = Vec::new();
    for token in tokens {
        match token {
            Token::Operand(literal) => stack.push(literal.single()),
            Token::Operator(op) => {
                let right = stack.pop().expect("right operand");
                let left = stack.pop().expect("left operand");
                stack.push(op.apply(left, right)?);
            }
        }
    }
    assert_eq!(stack.len(), 1, "RPN must leave exactly one value");
    Ok(stack[0])
}

// ============================================================
// End-to-end scenarios
// ============================================================

#[rstest]
#[case::precedence("3 + 4 * 2", "+ 3.0 * 4.0 2.0 ", "3.0 + 4.0 * 2.0 ", "3.0 4.0 2.0 * + ", Ok(11.0))]
#[case::grouping("(3 + 4) * 2", "* + 3.0 4.0 2.0 ", "3.0 + 4.0 * 2.0 ", "3.0 4.0 + 2.0 * ", Ok(14.0))]
#[case::left_assoc_sub("10 - 2 - 3", "- - 10.0 2.0 3.0 ", "10.0 - 2.0 - 3.0 ", "10.0 2.0 - 3.0 - ", Ok(5.0))]
#[case::left_assoc_div("8 / 4 / 2", "/ / 8.0 4.0 2.0 ", "8.0 / 4.0 / 2.0 ", "8.0 4.0 / 2.0 / ", Ok(1.0))]
#[case::decimals("2.5 * (1 + 1.5)", "* 2.5 + 1.0 1.5 ", "2.5 * 1.0 + 1.5 ", "2.5 1.0 1.5 + * ", Ok(6.25))]
#[case::division_by_zero("5 / 0", "/ 5.0 0.0 ", "5.0 / 0.0 ", "5.0 0.0 / ", Err(DomainError::DivisionByZero))]
fn given_scenario_when_traversing_and_evaluating_then_matches_expected(
    #[case] input: &str,
    #[case] pre: &str,
    #[case] in_order: &str,
    #[case] post: &str,
    #[case] result: Result<f32, DomainError>,
) {
    // Arrange
    assert!(exprtree::domain::validate(input));

    // Act
    let tree = build(input);

    // Assert
    assert_eq!(tree.render(Traversal::Pre, Precision::Single), pre);
    assert_eq!(tree.render(Traversal::In, Precision::Single), in_order);
    assert_eq!(tree.render(Traversal::Post, Precision::Single), post);
    assert_eq!(tree.evaluate(), result);
}

#[test]
fn given_single_operand_when_building_then_tree_has_one_node() {
    let tree = build("42");

    assert_eq!(tree.node_count(), 1);
    assert!(tree.root().is_some_and(ExprNode::is_leaf));
    assert_eq!(tree.evaluate(), Ok(42.0));
}

#[test]
fn given_partial_decimals_when_evaluating_then_reads_as_zero_padded() {
    assert_eq!(eval(".5 + 5."), 5.5);
}

// ============================================================
// Structural properties
// ============================================================

#[rstest]
#[case("3 + 4 * 2")]
#[case("(1 + 2) * (3 - 4) / 5")]
#[case("1 - 2 + 3 * 4 / 5 - 6")]
#[case("((7))")]
fn given_expression_when_traversing_in_order_then_preserves_input_token_order(
    #[case] input: &str,
) {
    let tree = build(input);

    let rendered: Vec<String> = tree
        .tokens(Traversal::In)
        .iter()
        .map(|t| match t {
            Token::Operand(literal) => literal.single().to_string(),
            Token::Operator(op) => op.to_string(),
        })
        .collect();
    let expected: Vec<String> = input
        .replace(['(', ')'], " ")
        .split_whitespace()
        .map(|s| match s.parse::<f32>() {
            Ok(v) => v.to_string(),
            Err(_) => s.to_string(),
        })
        .collect();

    assert_eq!(rendered, expected);
}

#[rstest]
#[case("3 + 4 * 2")]
#[case("2.5 * (1 + 1.5)")]
#[case("100 / 7 / 3 - 0.25 * 8")]
#[case("(((1 + 2) - 3) * 4 + 5) / 6")]
fn given_expression_when_evaluating_post_order_as_rpn_then_equals_tree_evaluation(
    #[case] input: &str,
) {
    let tree = build(input);

    let rpn = eval_rpn(&tree.tokens(Traversal::Post)).unwrap();

    assert_eq!(rpn.to_bits(), tree.evaluate().unwrap().to_bits());
}

#[test]
fn given_redundant_parentheses_when_building_then_trees_are_identical() {
    assert_eq!(build("((1 + 2 * 3))"), build("1 + 2 * 3"));
    assert_eq!(build("((3))"), build("3"));
}

#[test]
fn given_extra_whitespace_when_building_then_same_tree() {
    assert_eq!(build("  ( 1 + 2 ) "), build("(1+2)"));
}

#[test]
fn given_full_parenthesisation_when_evaluating_then_result_unchanged() {
    assert_eq!(eval("(((1 + 2) * 3) - (4 / 5))"), eval("(1 + 2) * 3 - 4 / 5"));
    assert_eq!(eval("((10 - 2) - 3)"), eval("10 - 2 - 3"));
}

#[test]
fn given_distinct_operands_when_mixing_precedence_then_multiplication_binds_tighter() {
    assert_eq!(eval("2 + 3 * 4"), eval("2 + (3 * 4)"));
    assert_ne!(eval("2 + 3 * 4"), eval("(2 + 3) * 4"));
}

#[test]
fn given_equal_precedence_when_evaluating_then_associates_left() {
    assert_eq!(eval("10 - 4 - 3"), eval("(10 - 4) - 3"));
    assert_ne!(eval("10 - 4 - 3"), eval("10 - (4 - 3)"));
    assert_eq!(eval("64 / 8 / 2"), eval("(64 / 8) / 2"));
    assert_ne!(eval("64 / 8 / 2"), eval("64 / (8 / 2)"));
}

#[test]
fn given_parenthesised_right_operand_when_building_then_shape_follows_grouping() {
    let tree = build("10 - (4 - 3)");
    let lit = |s| ExprNode::operand(Literal::parse(s).unwrap());

    let expected = ExprNode::binary(
        Operator::Sub,
        lit("10"),
        ExprNode::binary(Operator::Sub, lit("4"), lit("3")),
    );
    assert_eq!(tree.root(), Some(&expected));
    assert_eq!(tree.depth(), 3);
}

// ============================================================
// Builder rejections for validator-accepted input
// ============================================================

#[rstest]
#[case("1**2")]
#[case("*3")]
#[case("3*")]
#[case("1 + + 2")]
#[case("()")]
#[case("   ")]
#[case("(1)(2)")]
#[case("2 (3)")]
#[case("1 2 ** 3")]
#[case("*1 2")]
#[case("1 2 + + 3")]
#[case("(1)(2)*")]
#[case("* 4 5")]
fn given_structurally_broken_input_when_building_then_reports_malformed(#[case] input: &str) {
    assert!(exprtree::domain::validate(input));

    let result = TreeBuilder::new().build(input);

    assert!(
        matches!(result, Err(DomainError::MalformedExpression(_))),
        "{input:?} gave {result:?}"
    );
}

#[rstest]
#[case("1..2 + 3")]
#[case(". * 2")]
fn given_unparseable_literal_when_building_then_reports_invalid_number(#[case] input: &str) {
    assert!(matches!(
        build_tree(input),
        Err(DomainError::InvalidNumber(_))
    ));
}

// ============================================================
// Precision
// ============================================================

#[test]
fn given_double_precision_when_rendering_and_evaluating_then_uses_f64() {
    let tree = build("0.1 * 3");

    assert_eq!(tree.evaluate_as::<f64>().unwrap(), 0.1_f64 * 3.0);
    assert_eq!(tree.evaluate().unwrap(), 0.1_f32 * 3.0);
    assert_eq!(tree.render(Traversal::Post, Precision::Double), "0.1 3.0 * ");
}
