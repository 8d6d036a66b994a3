//! Transform feature trait and dispatch types.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use weft_ast::NodeId;
use weft_feature::Step;

use crate::{TransformContext, TransformError};

/// Candidate features for an input node.
pub type TransformDispatch<IK, IV, OK, OV> = Rc<
    dyn Fn(&TransformContext<'_, IK, IV, OK, OV>, NodeId) -> Vec<Box<dyn TransformFeature<IK, IV, OK, OV>>>,
>;

/// Wraps a closure or function as a [`TransformDispatch`].
pub fn transform_dispatch<IK, IV, OK, OV, F>(f: F) -> TransformDispatch<IK, IV, OK, OV>
where
    F: Fn(&TransformContext<'_, IK, IV, OK, OV>, NodeId) -> Vec<Box<dyn TransformFeature<IK, IV, OK, OV>>>
        + 'static,
{
    Rc::new(f)
}

/// A rewriting unit driven by the [`Transformer`](crate::Transformer).
///
/// Receives input nodes one at a time. `exit` runs exactly once, after the
/// feature has been popped.
#[async_trait(?Send)]
pub trait TransformFeature<IK, IV, OK, OV> {
    /// Handles the input node at the current index.
    async fn handle(
        &mut self,
        cx: &mut TransformContext<'_, IK, IV, OK, OV>,
        node: NodeId,
    ) -> Result<Step<TransformRedirect<IK, IV, OK, OV>>, TransformError>;

    /// Finalizes the feature after it has been popped.
    async fn exit(
        &mut self,
        cx: &mut TransformContext<'_, IK, IV, OK, OV>,
    ) -> Result<(), TransformError> {
        let _ = cx;
        Ok(())
    }
}

/// Payload of [`Step::Redirect`] for the transformer.
pub struct TransformRedirect<IK, IV, OK, OV> {
    /// Dispatch function for the new candidates.
    pub dispatch: TransformDispatch<IK, IV, OK, OV>,
    /// Input node whose children are traversed next; the current input if absent.
    pub input: Option<NodeId>,
    /// Output node new children attach to.
    pub output: NodeId,
    /// First child index of a nested input.
    pub start: Option<usize>,
}

impl<IK, IV, OK, OV> TransformRedirect<IK, IV, OK, OV> {
    /// Keeps traversing the current input, attaching output under `output`.
    pub fn output(output: NodeId, dispatch: TransformDispatch<IK, IV, OK, OV>) -> Self {
        Self {
            dispatch,
            input: None,
            output,
            start: None,
        }
    }

    /// Traverses the children of `input`, attaching output under `output`.
    pub fn nested(
        input: NodeId,
        output: NodeId,
        dispatch: TransformDispatch<IK, IV, OK, OV>,
    ) -> Self {
        Self {
            dispatch,
            input: Some(input),
            output,
            start: None,
        }
    }

    /// Starts a nested traversal at child `index`.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.start = Some(index);
        self
    }
}

impl<IK, IV, OK, OV> fmt::Debug for TransformRedirect<IK, IV, OK, OV> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRedirect")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}
