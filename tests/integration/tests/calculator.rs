//! End-to-end tests for the calculator grammar: text is read into a syntax
//! tree and then transformed into a precedence-grouped expression tree.

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use weft_ast::Point;
use weft_calc::{
    CalcError, ExprKind, Literal, SyntaxKind, read, read_and_transform,
    read_and_transform_with_config, render, transform,
};
use weft_feature::{EngineConfig, ProtocolError};

async fn rendered(text: &str) -> String {
    render(&read_and_transform(text).await.unwrap())
}

#[tokio::test]
async fn test_mixed_precedence() {
    assert_snapshot!(
        rendered("1 + 2 * 3 ^ 4 - 5").await,
        @"(calculator 1 + (group multiplicative 2 * (group exponent 3 ^ 4)) - 5)"
    );
}

#[tokio::test]
async fn test_brackets_reset_precedence() {
    assert_snapshot!(
        rendered("(1 + 2) * (3 - 4)").await,
        @"(calculator (group multiplicative (bracket 1 + 2) * (bracket 3 - 4)))"
    );
}

#[tokio::test]
async fn test_function_call_with_expression_arguments() {
    assert_snapshot!(
        rendered("max(1, 2 * 3)").await,
        @"(calculator (function max 1 (group multiplicative 2 * 3)))"
    );
}

#[tokio::test]
async fn test_leading_minus_is_a_sign() {
    assert_snapshot!(
        rendered("-2 * (-3)").await,
        @"(calculator (group multiplicative -2 * (bracket -3)))"
    );
}

#[rstest]
#[case::spaces("1+2", "1 + 2")]
#[case::tabs("1\t+\t2", "1 + 2")]
#[case::newlines("1\n+\n2", "1 + 2")]
#[case::crlf("1\r\n+ 2", "1+2")]
#[tokio::test]
async fn test_whitespace_is_insignificant(#[case] left: &str, #[case] right: &str) {
    assert_eq!(rendered(left).await, rendered(right).await);
}

#[tokio::test]
async fn test_positions_span_lines() {
    let tree = read("1 +\n  2").await.unwrap();
    let root = tree.root();
    let children = tree.children(root);

    assert_eq!(children.len(), 3);
    assert_eq!(tree[children[0]].kind, SyntaxKind::Number);

    let two = tree[children[2]].position.unwrap();
    assert_eq!(two.start, Point::new(2, 3, 6));
    assert_eq!(two.end, Point::new(2, 4, 7));

    let whole = tree[root].position.unwrap();
    assert_eq!(whole.start, Point::new(1, 1, 0));
    assert_eq!(whole.end.offset, 7);
    assert!(tree.positions_consistent(root));
}

#[tokio::test]
async fn test_transform_keeps_leaf_positions() {
    let syntax = read("10 * 20").await.unwrap();
    let expr = transform(&syntax).await.unwrap();

    let group = expr.children(expr.root())[0];
    assert_eq!(expr[group].kind, ExprKind::Group);

    let leaves: Vec<_> = expr
        .children(group)
        .iter()
        .map(|&id| (expr[id].value.clone(), expr[id].position.map(|p| p.start.offset)))
        .collect();
    assert_eq!(
        leaves,
        vec![
            (Some(Literal::Number(10.0)), Some(0)),
            (Some(Literal::Operator(weft_calc::Operator::Mul)), Some(3)),
            (Some(Literal::Number(20.0)), Some(5)),
        ]
    );
}

#[tokio::test]
async fn test_json_shape() {
    let tree = read_and_transform("-1.5").await.unwrap();
    let json = serde_json::to_value(tree.view(tree.root())).unwrap();

    assert_eq!(json["type"], "calculator");
    assert_eq!(json["children"][0]["type"], "number");
    assert_eq!(json["children"][0]["value"], -1.5);
    assert_eq!(json["children"][0]["position"]["start"]["offset"], 0);
}

#[rstest]
#[case::unclosed("(1 + 2", "unclosed bracket")]
#[case::unmatched("1 + 2)", "unmatched closing bracket")]
#[tokio::test]
async fn test_rejections(#[case] text: &str, #[case] message: &str) {
    let err = read_and_transform(text).await.unwrap_err();
    assert!(err.is_rejection());
    assert!(err.to_string().contains(message), "{err}");
}

#[tokio::test]
async fn test_depth_limit_is_not_a_rejection() {
    let config = EngineConfig::new().with_max_depth(3);
    let err = read_and_transform_with_config("((((1))))", &config)
        .await
        .unwrap_err();

    assert!(!err.is_rejection());
    assert!(matches!(err, CalcError::Read(_)));
    assert!(
        err.to_string()
            .ends_with(&ProtocolError::DepthExceeded { max_depth: 3 }.to_string())
    );
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..100, 0u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
        "[a-z]{1,3}",
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!['+', '-', '*', '/', '^']), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            ("[a-z]{1,3}", prop::collection::vec(inner, 1..3))
                .prop_map(|(name, args)| format!("{name}({})", args.join(", "))),
        ]
    })
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn test_well_formed_input_round_trips(text in expression()) {
        let syntax = block_on(read(&text)).unwrap();
        prop_assert!(syntax.positions_consistent(syntax.root()));

        let expr = block_on(transform(&syntax)).unwrap();
        prop_assert_eq!(expr[expr.root()].kind, ExprKind::Calculator);

        // Every number survives the transform.
        let numbers = |count: usize, is_number: bool| count + usize::from(is_number);
        let syntax_numbers = syntax
            .descendants(syntax.root())
            .fold(0, |n, id| numbers(n, syntax[id].kind == SyntaxKind::Number));
        let expr_numbers = expr
            .descendants(expr.root())
            .fold(0, |n, id| numbers(n, expr[id].kind == ExprKind::Number));
        prop_assert_eq!(syntax_numbers, expr_numbers);
    }

    #[test]
    fn test_reading_is_deterministic(text in expression()) {
        let first = render(&block_on(read(&text)).unwrap());
        let second = render(&block_on(read(&text)).unwrap());
        prop_assert_eq!(first, second);
    }
}
