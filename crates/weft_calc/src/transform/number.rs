use async_trait::async_trait;
use weft_ast::NodeId;
use weft_feature::Step;
use weft_transform::TransformFeature;

use super::{TransformCx, TransformStep, copy_leaf};
use crate::syntax::{ExprKind, Literal, SyntaxKind};

#[derive(Default)]
pub(super) struct NumberFeature {
    done: bool,
}

#[async_trait(?Send)]
impl TransformFeature<SyntaxKind, Literal, ExprKind, Literal> for NumberFeature {
    async fn handle(&mut self, cx: &mut TransformCx<'_>, node: NodeId) -> TransformStep {
        if self.done || cx.input_tree()[node].kind != SyntaxKind::Number {
            return Ok(Step::Decline);
        }
        let output = cx.output();
        copy_leaf(cx, node, ExprKind::Number, output);
        self.done = true;
        Ok(Step::Continue)
    }
}
