use async_trait::async_trait;
use weft_ast::Node;
use weft_feature::Step;
use weft_reader::{ReadError, ReadFeature};

use super::{ReadCx, ReadStep};
use crate::syntax::{Literal, Operator, SyntaxKind};

/// Decimal number with at most one point.
///
/// A number whose ancestor holds nothing but a `-` operator absorbs that
/// operator as its sign.
#[derive(Default)]
pub(super) struct NumberFeature {
    start: Option<usize>,
    digits: String,
    point: bool,
    negative: bool,
}

impl NumberFeature {
    fn begin(&mut self, cx: &mut ReadCx<'_>) {
        let mut start = cx.offset();
        let ancestor = cx.ancestor();
        let tree = cx.tree();

        let sign = match tree.children(ancestor) {
            [only] if tree[*only].value == Some(Literal::Operator(Operator::Sub)) => Some(*only),
            _ => None,
        };

        if let Some(sign) = sign {
            if let Some(position) = cx.tree()[sign].position {
                start = position.start.offset;
            }
            cx.tree_mut().pop_child(ancestor);
            self.negative = true;
        }

        self.start = Some(start);
    }
}

#[async_trait(?Send)]
impl ReadFeature<SyntaxKind, Literal> for NumberFeature {
    async fn handle(&mut self, cx: &mut ReadCx<'_>, ch: char) -> ReadStep {
        match ch {
            '.' if self.point => return Ok(Step::Decline),
            '.' => {
                if self.digits.is_empty() {
                    self.digits.push('0');
                }
                self.digits.push('.');
                self.point = true;
            }
            '0'..='9' => self.digits.push(ch),
            _ => return Ok(Step::Decline),
        }

        if self.start.is_none() {
            self.begin(cx);
        }
        Ok(Step::Continue)
    }

    async fn exit(&mut self, cx: &mut ReadCx<'_>) -> Result<(), ReadError> {
        let start = self.start.unwrap_or_else(|| cx.offset());
        let value: f64 = self.digits.parse().map_err(|_| {
            ReadError::rejected(format!("invalid number `{}`", self.digits), cx.point_at(start))
        })?;
        let value = if self.negative { -value } else { value };

        let position = cx.position(start, cx.offset());
        let ancestor = cx.ancestor();
        cx.tree_mut().append(
            ancestor,
            Node::literal(SyntaxKind::Number, Literal::Number(value)).with_position(position),
        );
        Ok(())
    }
}
