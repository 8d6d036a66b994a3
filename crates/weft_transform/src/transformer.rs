//! Transformer engine.

use std::collections::HashMap;

use tracing::{debug, trace};
use weft_ast::{Node, NodeId, Tree};
use weft_feature::{EngineConfig, FeatureStack, ProtocolError, Scratch, Step};

use crate::{TransformContext, TransformDispatch, TransformError, TransformFeature, TransformRedirect};

enum Handler<IK, IV, OK, OV> {
    Feature {
        feature: Box<dyn TransformFeature<IK, IV, OK, OV>>,
        scratch: Scratch,
    },
    /// Synthetic frame of an input+output redirect; offers every child of its
    /// input to its dispatch function.
    Nested(TransformDispatch<IK, IV, OK, OV>),
}

struct TransformFrame<IK, IV, OK, OV> {
    handler: Handler<IK, IV, OK, OV>,
    input: NodeId,
    output: NodeId,
}

struct Candidates<IK, IV, OK, OV> {
    features: Vec<Box<dyn TransformFeature<IK, IV, OK, OV>>>,
    input: NodeId,
    output: NodeId,
    scratch: Scratch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Done,
    Failed,
}

/// Rewrites a borrowed input tree into an owned output tree.
pub struct Transformer<'i, IK, IV, OK, OV> {
    input: &'i Tree<IK, IV>,
    output: Tree<OK, OV>,
    dispatch: TransformDispatch<IK, IV, OK, OV>,
    stack: FeatureStack<TransformFrame<IK, IV, OK, OV>>,
    indexes: HashMap<NodeId, usize>,
    state: State,
}

impl<'i, IK, IV, OK, OV> Transformer<'i, IK, IV, OK, OV> {
    /// Creates a transformer from `input` into a tree rooted at `output_root`.
    pub fn new(
        input: &'i Tree<IK, IV>,
        output_root: Node<OK, OV>,
        dispatch: TransformDispatch<IK, IV, OK, OV>,
    ) -> Self {
        Self {
            input,
            output: Tree::new(output_root),
            dispatch,
            stack: FeatureStack::new(),
            indexes: HashMap::new(),
            state: State::Pending,
        }
    }

    /// Applies engine limits.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.stack = FeatureStack::with_config(config);
        self
    }

    /// Returns the input tree.
    pub fn input_tree(&self) -> &'i Tree<IK, IV> {
        self.input
    }

    /// Returns the output tree built so far.
    pub fn output_tree(&self) -> &Tree<OK, OV> {
        &self.output
    }

    /// Returns the output root node, mutably.
    pub fn output_root_mut(&mut self) -> &mut Node<OK, OV> {
        let root = self.output.root();
        &mut self.output[root]
    }

    /// Consumes the transformer and returns the output tree.
    pub fn into_tree(self) -> Tree<OK, OV> {
        self.output
    }

    /// Transforms the whole input tree.
    ///
    /// The first call does all the work; later calls return the same tree.
    /// After a failure every later call returns [`ProtocolError::Poisoned`].
    pub async fn transform(&mut self) -> Result<&Tree<OK, OV>, TransformError> {
        match self.state {
            State::Done => return Ok(&self.output),
            State::Failed => return Err(ProtocolError::Poisoned.into()),
            State::Pending => {}
        }

        match self.run().await {
            Ok(()) => {
                self.state = State::Done;
                debug!(
                    input_nodes = self.input.len(),
                    output_nodes = self.output.len(),
                    "transform complete"
                );
                Ok(&self.output)
            }
            Err(err) => {
                self.stack.unwind();
                self.state = State::Failed;
                debug!(error = %err, "transform failed");
                Err(err)
            }
        }
    }

    async fn run(&mut self) -> Result<(), TransformError> {
        let root = self.input.root();
        self.indexes.insert(root, 0);
        let mut pending: Option<Candidates<IK, IV, OK, OV>> = None;

        loop {
            let input = self.current_input();
            let index = self.index_of(input);

            let Some(node) = self.input.children(input).get(index).copied() else {
                if self.stack.is_empty() {
                    break;
                }
                pending = None;
                self.release_input(input).await?;
                continue;
            };

            pending = match pending.take() {
                Some(candidates) => self.offer(candidates, node, index).await?,
                None if self.stack.is_empty() => {
                    let dispatch = self.dispatch.clone();
                    let output = self.output.root();
                    let candidates = self.dispatch_at(&dispatch, root, output, node);
                    self.offer(candidates, node, index).await?
                }
                None => self.step_top(node).await?,
            };
        }

        Ok(())
    }

    fn current_input(&self) -> NodeId {
        self.stack
            .top()
            .map_or_else(|| self.input.root(), |frame| frame.input)
    }

    fn index_of(&self, input: NodeId) -> usize {
        self.indexes.get(&input).copied().unwrap_or_default()
    }

    fn dispatch_at(
        &mut self,
        dispatch: &TransformDispatch<IK, IV, OK, OV>,
        input: NodeId,
        output: NodeId,
        node: NodeId,
    ) -> Candidates<IK, IV, OK, OV> {
        let scratch = Scratch::new();
        let index = self.index_of(input);
        let features = {
            let cx = TransformContext::new(self.input, &mut self.output, input, output, index, &scratch);
            dispatch(&cx, node)
        };
        trace!(
            node = node.as_u32(),
            index,
            candidates = features.len(),
            "dispatch"
        );

        Candidates {
            features,
            input,
            output,
            scratch,
        }
    }

    async fn offer(
        &mut self,
        candidates: Candidates<IK, IV, OK, OV>,
        node: NodeId,
        index: usize,
    ) -> Result<Option<Candidates<IK, IV, OK, OV>>, TransformError> {
        let Candidates {
            features,
            input,
            output,
            scratch,
        } = candidates;

        for mut feature in features {
            let step = {
                let mut cx =
                    TransformContext::new(self.input, &mut self.output, input, output, index, &scratch);
                feature.handle(&mut cx, node).await?
            };

            if step.claims() {
                self.stack.push(TransformFrame {
                    handler: Handler::Feature { feature, scratch },
                    input,
                    output,
                })?;
                return self.apply(step, input, node).await;
            }
        }

        Err(TransformError::Unclaimed { node, index })
    }

    async fn step_top(
        &mut self,
        node: NodeId,
    ) -> Result<Option<Candidates<IK, IV, OK, OV>>, TransformError> {
        let Some(frame) = self.stack.top_mut() else {
            return Ok(None);
        };

        let (input, output) = (frame.input, frame.output);
        let index = self.indexes.get(&input).copied().unwrap_or_default();

        let step = match &mut frame.handler {
            Handler::Feature { feature, scratch } => {
                let mut cx =
                    TransformContext::new(self.input, &mut self.output, input, output, index, scratch);
                feature.handle(&mut cx, node).await?
            }
            Handler::Nested(dispatch) => {
                let dispatch = dispatch.clone();
                return Ok(Some(self.dispatch_at(&dispatch, input, output, node)));
            }
        };

        self.apply(step, input, node).await
    }

    async fn apply(
        &mut self,
        step: Step<TransformRedirect<IK, IV, OK, OV>>,
        input: NodeId,
        node: NodeId,
    ) -> Result<Option<Candidates<IK, IV, OK, OV>>, TransformError> {
        match step {
            Step::Continue => {
                *self.indexes.entry(input).or_default() += 1;
                Ok(None)
            }
            Step::Decline => {
                self.release_top().await?;
                Ok(None)
            }
            Step::Redirect(redirect) => {
                if !self.output.contains(redirect.output) {
                    return Err(ProtocolError::invalid_redirect(format!(
                        "output node {} is not part of the output tree",
                        redirect.output.as_u32()
                    ))
                    .into());
                }

                match redirect.input {
                    Some(nested) if nested != input => {
                        self.descend(nested, redirect)?;
                        Ok(None)
                    }
                    _ => Ok(Some(self.dispatch_at(
                        &redirect.dispatch,
                        input,
                        redirect.output,
                        node,
                    ))),
                }
            }
        }
    }

    fn descend(
        &mut self,
        nested: NodeId,
        redirect: TransformRedirect<IK, IV, OK, OV>,
    ) -> Result<(), TransformError> {
        match self.input.get(nested) {
            Some(node) if node.is_parent() => {}
            Some(_) => {
                return Err(ProtocolError::invalid_redirect(format!(
                    "input node {} has no children",
                    nested.as_u32()
                ))
                .into());
            }
            None => {
                return Err(ProtocolError::invalid_redirect(format!(
                    "input node {} is not part of the input tree",
                    nested.as_u32()
                ))
                .into());
            }
        }

        let index = self.indexes.entry(nested).or_default();
        if let Some(start) = redirect.start {
            *index = start;
        }
        trace!(input = nested.as_u32(), index = *index, "descend");

        self.stack.push(TransformFrame {
            handler: Handler::Nested(redirect.dispatch),
            input: nested,
            output: redirect.output,
        })?;
        Ok(())
    }

    /// Releases every frame traversing `input`, innermost first.
    async fn release_input(&mut self, input: NodeId) -> Result<(), TransformError> {
        while self.stack.top().is_some_and(|frame| frame.input == input) {
            self.release_top().await?;
        }
        Ok(())
    }

    async fn release_top(&mut self) -> Result<(), TransformError> {
        let Some(id) = self.stack.top_id() else {
            return Ok(());
        };

        let frame = self.stack.release(id)?;
        if let Handler::Feature {
            mut feature,
            scratch,
        } = frame.handler
        {
            let index = self.index_of(frame.input);
            let mut cx = TransformContext::new(
                self.input,
                &mut self.output,
                frame.input,
                frame.output,
                index,
                &scratch,
            );
            feature.exit(&mut cx).await?;
        }

        let enclosing = self.current_input();
        if enclosing != frame.input {
            self.indexes.remove(&frame.input);
            *self.indexes.entry(enclosing).or_default() += 1;
            trace!(input = enclosing.as_u32(), "ascend");
        }
        Ok(())
    }
}
