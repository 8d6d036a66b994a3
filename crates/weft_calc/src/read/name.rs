use async_trait::async_trait;
use weft_ast::Node;
use weft_feature::Step;
use weft_reader::{ReadError, ReadFeature};

use super::{ReadCx, ReadStep};
use crate::syntax::{Literal, SyntaxKind};

/// A run of lowercase ASCII letters.
#[derive(Default)]
pub(super) struct NameFeature {
    start: usize,
    name: String,
}

#[async_trait(?Send)]
impl ReadFeature<SyntaxKind, Literal> for NameFeature {
    async fn handle(&mut self, cx: &mut ReadCx<'_>, ch: char) -> ReadStep {
        if !ch.is_ascii_lowercase() {
            return Ok(Step::Decline);
        }
        if self.name.is_empty() {
            self.start = cx.offset();
        }
        self.name.push(ch);
        Ok(Step::Continue)
    }

    async fn exit(&mut self, cx: &mut ReadCx<'_>) -> Result<(), ReadError> {
        let position = cx.position(self.start, cx.offset());
        let ancestor = cx.ancestor();
        let name = std::mem::take(&mut self.name);
        cx.tree_mut().append(
            ancestor,
            Node::literal(SyntaxKind::Name, Literal::Name(name)).with_position(position),
        );
        Ok(())
    }
}
