//! Transformer grammar: [`SyntaxTree`] to [`ExprTree`].
//!
//! Flat operator sequences are regrouped by precedence, brackets are copied
//! with their transformed contents, and a name directly followed by a bracket
//! becomes a function application.

mod bracket;
mod function;
mod number;
mod operator;

use weft_ast::{Node, NodeId};
use weft_feature::{EngineConfig, Step};
use weft_transform::{
    TransformContext, TransformError, TransformFeature, TransformRedirect, Transformer, transform_dispatch,
};

use crate::syntax::{ExprKind, ExprTree, Literal, SyntaxKind, SyntaxTree};

use bracket::BracketFeature;
use function::FunctionFeature;
use number::NumberFeature;
use operator::OperatorFeature;

pub(crate) type TransformCx<'a> = TransformContext<'a, SyntaxKind, Literal, ExprKind, Literal>;
pub(crate) type TransformStep =
    Result<Step<TransformRedirect<SyntaxKind, Literal, ExprKind, Literal>>, TransformError>;
type Feature = Box<dyn TransformFeature<SyntaxKind, Literal, ExprKind, Literal>>;

/// Candidate features for an input node.
pub fn grammar(cx: &TransformCx<'_>, node: NodeId) -> Vec<Feature> {
    match cx.input_tree()[node].kind {
        SyntaxKind::Number => vec![Box::new(NumberFeature::default())],
        SyntaxKind::Operator => vec![Box::new(OperatorFeature::default())],
        SyntaxKind::Bracket => vec![Box::new(BracketFeature::default())],
        SyntaxKind::Name => vec![Box::new(FunctionFeature::default())],
        SyntaxKind::Calculator => Vec::new(),
    }
}

/// Transforms a syntax tree into an expression tree.
pub async fn transform(tree: &SyntaxTree) -> Result<ExprTree, TransformError> {
    transform_with_config(tree, &EngineConfig::default()).await
}

/// Transforms a syntax tree with explicit engine limits.
pub async fn transform_with_config(
    tree: &SyntaxTree,
    config: &EngineConfig,
) -> Result<ExprTree, TransformError> {
    let root = Node::parent(ExprKind::Calculator).with_position_opt(tree[tree.root()].position);
    let mut transformer = Transformer::new(tree, root, transform_dispatch(grammar)).with_config(config);

    transformer.transform().await?;
    Ok(transformer.into_tree())
}

/// Copies a leaf of the syntax tree under `parent` in the output, as `kind`.
fn copy_leaf(cx: &mut TransformCx<'_>, node: NodeId, kind: ExprKind, parent: NodeId) -> NodeId {
    let source = &cx.input_tree()[node];
    let mut copy = Node::leaf(kind).with_position_opt(source.position);
    copy.value = source.value.clone();

    cx.output_tree_mut().append(parent, copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{read, render};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    async fn expr(text: &str) -> ExprTree {
        let syntax = read(text).await.unwrap();
        transform(&syntax).await.unwrap()
    }

    #[rstest]
    #[case::empty("", "(calculator)")]
    #[case::single("7", "(calculator 7)")]
    #[case::same_level("1 + 2 - 3", "(calculator 1 + 2 - 3)")]
    #[case::mul_after_add("1 + 2 * 3", "(calculator 1 + (group multiplicative 2 * 3))")]
    #[case::add_after_mul("1 * 2 + 3", "(calculator (group multiplicative 1 * 2) + 3)")]
    #[case::ladder(
        "1 + 2 * 3 ^ 4",
        "(calculator 1 + (group multiplicative 2 * (group exponent 3 ^ 4)))"
    )]
    #[case::exp_inside_mul(
        "1 * 2 ^ 3 * 4",
        "(calculator (group multiplicative 1 * (group exponent 2 ^ 3) * 4))"
    )]
    #[case::exp_then_add(
        "2 ^ 3 + 4",
        "(calculator (group multiplicative (group exponent 2 ^ 3)) + 4)"
    )]
    #[case::exp_then_mul(
        "1 ^ 2 * 3",
        "(calculator (group multiplicative (group exponent 1 ^ 2) * 3))"
    )]
    #[case::bracket("2 * (3 + 4)", "(calculator (group multiplicative 2 * (bracket 3 + 4)))")]
    #[case::nested_bracket("((1 * 2))", "(calculator (bracket (bracket (group multiplicative 1 * 2))))")]
    #[case::function("max(1, 2)", "(calculator (function max 1 2))")]
    #[case::variable("x + 1", "(calculator x + 1)")]
    #[case::function_in_product(
        "2 * sin(x)",
        "(calculator (group multiplicative 2 * (function sin x)))"
    )]
    #[case::negative("-1 + 2", "(calculator -1 + 2)")]
    #[tokio::test]
    async fn test_transform(#[case] text: &str, #[case] expected: &str) {
        let tree = expr(text).await;
        assert_eq!(render(&tree), expected);
        assert!(tree.positions_consistent(tree.root()));
    }

    #[tokio::test]
    async fn test_output_root_copies_input_position() {
        let syntax = read("1 + 2").await.unwrap();
        let tree = transform(&syntax).await.unwrap();
        assert_eq!(tree[tree.root()].position, syntax[syntax.root()].position);
    }

    #[tokio::test]
    async fn test_group_spans_first_to_last_operand() {
        let tree = expr("1 + 22 * 3 ").await;
        let group = tree.children(tree.root())[2];
        let position = tree[group].position.unwrap();
        assert_eq!((position.start.offset, position.end.offset), (4, 10));
    }

    #[tokio::test]
    async fn test_function_spans_name_and_bracket() {
        let tree = expr(" f(1) ").await;
        let function = tree.children(tree.root())[0];
        let position = tree[function].position.unwrap();
        assert_eq!((position.start.offset, position.end.offset), (1, 5));
        assert_eq!(tree[function].value, Some(Literal::Name("f".to_string())));
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(6)]
    #[tokio::test]
    async fn test_flat_sum_stays_flat(#[case] operands: usize) {
        let text = vec!["1"; operands].join(" + ");
        let tree = expr(&text).await;
        assert_eq!(tree.children(tree.root()).len(), operands * 2 - 1);
    }

    #[tokio::test]
    async fn test_unclaimed_root_kind() {
        let mut syntax = SyntaxTree::new(Node::parent(SyntaxKind::Calculator));
        let root = syntax.root();
        syntax.append(root, Node::parent(SyntaxKind::Calculator));

        let err = transform(&syntax).await.unwrap_err();
        assert!(matches!(err, TransformError::Unclaimed { index: 0, .. }));
    }
}
