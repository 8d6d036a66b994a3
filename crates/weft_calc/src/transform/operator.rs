use async_trait::async_trait;
use weft_ast::{Node, NodeId, Position};
use weft_feature::Step;
use weft_transform::{TransformError, TransformFeature, TransformRedirect, transform_dispatch};

use super::{TransformCx, TransformStep, copy_leaf, grammar};
use crate::syntax::{ExprKind, Literal, Precedence, SyntaxKind};

/// Regroups a flat operator sequence by precedence.
///
/// An operator at the level of the current output is copied in place. An
/// operator binding tighter than the output opens a group one level tighter,
/// moves the preceding operand into it and keeps feeding the group until an
/// operator of the output's level (or looser) shows up.
#[derive(Default)]
pub(super) struct OperatorFeature {
    claimed: bool,
    /// Set once an operator of the output's own level has been copied.
    settled: bool,
    group: Option<(NodeId, Precedence)>,
}

impl OperatorFeature {
    fn redirect(group: NodeId) -> TransformStep {
        Ok(Step::Redirect(TransformRedirect::output(
            group,
            transform_dispatch(grammar),
        )))
    }
}

fn output_level(cx: &TransformCx<'_>) -> Precedence {
    let output = &cx.output_tree()[cx.output()];
    match (output.kind, &output.value) {
        (ExprKind::Group, Some(Literal::Level(level))) => *level,
        _ => Precedence::Additive,
    }
}

#[async_trait(?Send)]
impl TransformFeature<SyntaxKind, Literal, ExprKind, Literal> for OperatorFeature {
    async fn handle(&mut self, cx: &mut TransformCx<'_>, node: NodeId) -> TransformStep {
        let op = cx.input_tree()[node]
            .value
            .as_ref()
            .and_then(Literal::as_operator);

        let op = match (self.group, op) {
            (None, _) if self.claimed => return Ok(Step::Decline),
            (None, None) => return Ok(Step::Decline),
            (None, Some(op)) => {
                self.claimed = true;
                op
            }
            (Some(_), _) if self.settled => return Ok(Step::Decline),
            (Some((group, _)), None) => return Self::redirect(group),
            (Some(_), Some(op)) => op,
        };

        let current = output_level(cx);
        let required = op.precedence();

        if current == required {
            let output = cx.output();
            copy_leaf(cx, node, ExprKind::Operator, output);
            self.settled = true;
            return Ok(Step::Continue);
        }
        if current > required {
            return Ok(Step::Decline);
        }

        if let Some((group, level)) = self.group {
            if level == required {
                copy_leaf(cx, node, ExprKind::Operator, group);
                return Ok(Step::Continue);
            }
            return Self::redirect(group);
        }

        let Some(level) = current.tighter() else {
            return Ok(Step::Decline);
        };

        let output = cx.output();
        let tree = cx.output_tree_mut();
        let operand = tree.pop_child(output);
        let group = tree.append(
            output,
            Node::parent(ExprKind::Group).with_value(Literal::Level(level)),
        );
        if let Some(operand) = operand {
            tree.attach(group, operand);
        }

        self.group = Some((group, level));
        Self::redirect(group)
    }

    async fn exit(&mut self, cx: &mut TransformCx<'_>) -> Result<(), TransformError> {
        let Some((group, _)) = self.group else {
            return Ok(());
        };

        let tree = cx.output_tree_mut();
        let first = tree.first_child(group).and_then(|id| tree[id].position);
        let last = tree.last_child(group).and_then(|id| tree[id].position);
        if let (Some(first), Some(last)) = (first, last) {
            tree[group].position = Some(Position::new(first.start, last.end));
        }
        Ok(())
    }
}
