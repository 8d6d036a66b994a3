//! Reader grammar: text to [`SyntaxTree`].

mod bracket;
mod name;
mod number;
mod operator;

use weft_ast::Node;
use weft_feature::{EngineConfig, Step};
use weft_reader::{ReadContext, ReadError, ReadFeature, ReadRedirect, Reader, read_dispatch};

use crate::syntax::{Literal, Operator, SyntaxKind, SyntaxTree};

use bracket::{BracketFeature, UnmatchedBracket};
use name::NameFeature;
use number::NumberFeature;
use operator::OperatorFeature;

pub(crate) type ReadCx<'a> = ReadContext<'a, SyntaxKind, Literal>;
pub(crate) type ReadStep = Result<Step<ReadRedirect<SyntaxKind, Literal>>, ReadError>;
type Feature = Box<dyn ReadFeature<SyntaxKind, Literal>>;

/// Candidate features for the character at the current offset.
pub fn grammar(cx: &ReadCx<'_>) -> Vec<Feature> {
    match cx.char() {
        Some('(') => vec![Box::new(BracketFeature::default())],
        Some(')') => vec![Box::new(UnmatchedBracket)],
        Some(ch) if Operator::from_char(ch).is_some() => vec![Box::new(OperatorFeature::default())],
        Some(ch) if ch.is_ascii_digit() || ch == '.' => vec![Box::new(NumberFeature::default())],
        Some(ch) if ch.is_ascii_lowercase() => vec![Box::new(NameFeature::default())],
        _ => Vec::new(),
    }
}

/// Reads `text` into a syntax tree.
pub async fn read(text: &str) -> Result<SyntaxTree, ReadError> {
    read_with_config(text, &EngineConfig::default()).await
}

/// Reads `text` into a syntax tree with explicit engine limits.
pub async fn read_with_config(text: &str, config: &EngineConfig) -> Result<SyntaxTree, ReadError> {
    let mut reader = Reader::new(
        text,
        Node::parent(SyntaxKind::Calculator),
        read_dispatch(grammar),
    )
    .with_config(config);

    let position = reader.index().position(0, reader.len());
    reader.root_mut().position = Some(position);

    reader.read().await?;
    Ok(reader.into_tree())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use weft_ast::Point;

    #[rstest]
    #[case::empty("", "(calculator)")]
    #[case::whitespace(" \t\n", "(calculator)")]
    #[case::number("42", "(calculator 42)")]
    #[case::decimal("3.25", "(calculator 3.25)")]
    #[case::leading_point(".5", "(calculator 0.5)")]
    #[case::sum("1 + 2", "(calculator 1 + 2)")]
    #[case::all_operators("1+2-3*4/5^6", "(calculator 1 + 2 - 3 * 4 / 5 ^ 6)")]
    #[case::name("sin", "(calculator sin)")]
    #[case::call("max(1 2)", "(calculator max (bracket 1 2))")]
    #[case::nested("((1))", "(calculator (bracket (bracket 1)))")]
    #[case::empty_bracket("()", "(calculator (bracket))")]
    #[case::unknown_skipped("1 # 2", "(calculator 1 2)")]
    #[case::negative("-3", "(calculator -3)")]
    #[case::negative_in_bracket("2*(-3)", "(calculator 2 * (bracket -3))")]
    #[case::minus_after_operand("2-3", "(calculator 2 - 3)")]
    #[case::second_point("1.2.3", "(calculator 1.2 0.3)")]
    #[tokio::test]
    async fn test_read(#[case] text: &str, #[case] expected: &str) {
        let tree = read(text).await.unwrap();
        assert_eq!(render(&tree), expected);
        assert!(tree.positions_consistent(tree.root()));
    }

    #[tokio::test]
    async fn test_root_covers_text() {
        let tree = read("1 +\n2").await.unwrap();
        let position = tree[tree.root()].position.unwrap();
        assert_eq!(position.start, Point::new(1, 1, 0));
        assert_eq!(position.end, Point::new(2, 2, 5));
    }

    #[tokio::test]
    async fn test_bracket_ends_after_close_marker() {
        let tree = read("a(1 + 2) ").await.unwrap();
        let bracket = tree.children(tree.root())[1];
        let position = tree[bracket].position.unwrap();
        assert_eq!((position.start.offset, position.end.offset), (1, 8));
        assert_eq!(tree.children(bracket).len(), 3);
    }

    #[tokio::test]
    async fn test_negative_number_span_starts_at_sign() {
        let tree = read(" -12").await.unwrap();
        let number = tree.children(tree.root())[0];
        let position = tree[number].position.unwrap();
        assert_eq!((position.start.offset, position.end.offset), (1, 4));
        assert_eq!(tree[number].value, Some(Literal::Number(-12.0)));
    }

    #[tokio::test]
    async fn test_unclosed_bracket_is_rejected() {
        let err = read("1 + (2").await.unwrap_err();
        assert_eq!(err, ReadError::rejected("unclosed bracket", Point::new(1, 5, 4)));
    }

    #[tokio::test]
    async fn test_unmatched_close_is_rejected() {
        let err = read("1)").await.unwrap_err();
        assert_eq!(
            err,
            ReadError::rejected("unmatched closing bracket", Point::new(1, 2, 1))
        );
    }
}
