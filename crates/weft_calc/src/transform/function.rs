use async_trait::async_trait;
use weft_ast::{Node, NodeId, Position};
use weft_feature::Step;
use weft_transform::{TransformError, TransformFeature, TransformRedirect, transform_dispatch};

use super::{TransformCx, TransformStep, copy_leaf, grammar};
use crate::syntax::{ExprKind, Literal, SyntaxKind};

/// A name, applied to the bracket right after it if there is one.
///
/// `f(x)` becomes a `Function` node holding the bracket's transformed
/// contents; a bare name becomes a `Variable` when the feature exits.
#[derive(Default)]
pub(super) struct FunctionFeature {
    name: Option<NodeId>,
    applied: bool,
}

#[async_trait(?Send)]
impl TransformFeature<SyntaxKind, Literal, ExprKind, Literal> for FunctionFeature {
    async fn handle(&mut self, cx: &mut TransformCx<'_>, node: NodeId) -> TransformStep {
        if self.applied {
            return Ok(Step::Decline);
        }

        let input = cx.input_tree();
        let Some(name) = self.name else {
            if input[node].kind != SyntaxKind::Name {
                return Ok(Step::Decline);
            }
            self.name = Some(node);
            return Ok(Step::Continue);
        };

        if input[node].kind != SyntaxKind::Bracket {
            return Ok(Step::Decline);
        }

        let position = match (input[name].position, input[node].position) {
            (Some(start), Some(end)) => Some(Position::new(start.start, end.end)),
            _ => None,
        };
        let mut function = Node::parent(ExprKind::Function).with_position_opt(position);
        function.value = input[name].value.clone();

        let output = cx.output();
        let function = cx.output_tree_mut().append(output, function);

        self.applied = true;
        Ok(Step::Redirect(TransformRedirect::nested(
            node,
            function,
            transform_dispatch(grammar),
        )))
    }

    async fn exit(&mut self, cx: &mut TransformCx<'_>) -> Result<(), TransformError> {
        if let (Some(name), false) = (self.name, self.applied) {
            let output = cx.output();
            copy_leaf(cx, name, ExprKind::Variable, output);
        }
        Ok(())
    }
}
