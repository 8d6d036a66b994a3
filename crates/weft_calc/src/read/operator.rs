use async_trait::async_trait;
use weft_ast::Node;
use weft_feature::Step;
use weft_reader::ReadFeature;

use super::{ReadCx, ReadStep};
use crate::syntax::{Literal, Operator, SyntaxKind};

/// A single operator character, attached as soon as it is seen.
#[derive(Default)]
pub(super) struct OperatorFeature {
    done: bool,
}

#[async_trait(?Send)]
impl ReadFeature<SyntaxKind, Literal> for OperatorFeature {
    async fn handle(&mut self, cx: &mut ReadCx<'_>, ch: char) -> ReadStep {
        if self.done {
            return Ok(Step::Decline);
        }
        let Some(op) = Operator::from_char(ch) else {
            return Ok(Step::Decline);
        };

        let offset = cx.offset();
        let position = cx.position(offset, offset + 1);
        let ancestor = cx.ancestor();
        cx.tree_mut().append(
            ancestor,
            Node::literal(SyntaxKind::Operator, Literal::Operator(op)).with_position(position),
        );

        self.done = true;
        Ok(Step::Continue)
    }
}
