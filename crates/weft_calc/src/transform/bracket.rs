use async_trait::async_trait;
use weft_ast::{Node, NodeId};
use weft_feature::Step;
use weft_transform::{TransformFeature, TransformRedirect, transform_dispatch};

use super::{TransformCx, TransformStep, grammar};
use crate::syntax::{ExprKind, Literal, SyntaxKind};

/// Copies a bracket and transforms its children into the copy.
#[derive(Default)]
pub(super) struct BracketFeature {
    done: bool,
}

#[async_trait(?Send)]
impl TransformFeature<SyntaxKind, Literal, ExprKind, Literal> for BracketFeature {
    async fn handle(&mut self, cx: &mut TransformCx<'_>, node: NodeId) -> TransformStep {
        let source = &cx.input_tree()[node];
        if self.done || source.kind != SyntaxKind::Bracket {
            return Ok(Step::Decline);
        }

        let bracket = Node::parent(ExprKind::Bracket).with_position_opt(source.position);
        let output = cx.output();
        let bracket = cx.output_tree_mut().append(output, bracket);

        self.done = true;
        Ok(Step::Redirect(TransformRedirect::nested(
            node,
            bracket,
            transform_dispatch(grammar),
        )))
    }
}
