use async_trait::async_trait;
use weft_ast::{Node, NodeId};
use weft_feature::Step;
use weft_reader::{ReadError, ReadFeature, ReadRedirect, read_dispatch};

use super::{ReadCx, ReadStep, grammar};
use crate::syntax::{Literal, SyntaxKind};

/// `(` ... `)`; everything in between is read under the bracket node.
#[derive(Default)]
pub(super) struct BracketFeature {
    node: Option<NodeId>,
    start: usize,
    closed: bool,
}

#[async_trait(?Send)]
impl ReadFeature<SyntaxKind, Literal> for BracketFeature {
    async fn handle(&mut self, cx: &mut ReadCx<'_>, ch: char) -> ReadStep {
        let Some(node) = self.node else {
            if ch != '(' {
                return Ok(Step::Decline);
            }
            self.start = cx.offset();
            let position = cx.position(self.start, self.start);
            let ancestor = cx.ancestor();
            self.node = Some(
                cx.tree_mut()
                    .append(ancestor, Node::parent(SyntaxKind::Bracket).with_position(position)),
            );
            return Ok(Step::Continue);
        };

        if self.closed {
            return Ok(Step::Decline);
        }
        if ch == ')' {
            self.closed = true;
            return Ok(Step::Continue);
        }
        Ok(Step::Redirect(ReadRedirect::under(node, read_dispatch(grammar))))
    }

    async fn exit(&mut self, cx: &mut ReadCx<'_>) -> Result<(), ReadError> {
        if !self.closed {
            return Err(ReadError::rejected("unclosed bracket", cx.point_at(self.start)));
        }
        if let Some(node) = self.node {
            let position = cx.position(self.start, cx.offset());
            cx.tree_mut()[node].position = Some(position);
        }
        Ok(())
    }
}

/// `)` without an open bracket.
pub(super) struct UnmatchedBracket;

#[async_trait(?Send)]
impl ReadFeature<SyntaxKind, Literal> for UnmatchedBracket {
    async fn handle(&mut self, cx: &mut ReadCx<'_>, _ch: char) -> ReadStep {
        Err(ReadError::rejected("unmatched closing bracket", cx.point()))
    }
}
