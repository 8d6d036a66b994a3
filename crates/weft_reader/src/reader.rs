//! Reader engine.

use tracing::{debug, trace};
use weft_ast::{Node, NodeId, Point, PositionIndex, Tree};
use weft_feature::{EngineConfig, FeatureStack, ProtocolError, Scratch, Step};

use crate::{ReadContext, ReadDispatch, ReadError, ReadFeature, ReadRedirect};

struct ReadFrame<K, V> {
    feature: Box<dyn ReadFeature<K, V>>,
    ancestor: NodeId,
    scratch: Scratch,
}

/// Candidates produced by one dispatch call, not yet offered the current character.
struct Candidates<K, V> {
    features: Vec<Box<dyn ReadFeature<K, V>>>,
    ancestor: NodeId,
    scratch: Scratch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Done,
    Failed,
}

/// Builds a tree from text by driving read features over every character.
pub struct Reader<K, V> {
    index: PositionIndex,
    tree: Tree<K, V>,
    dispatch: ReadDispatch<K, V>,
    stack: FeatureStack<ReadFrame<K, V>>,
    offset: usize,
    state: State,
}

impl<K, V> Reader<K, V> {
    /// Creates a reader over `text` that attaches top-level nodes to `root`.
    pub fn new(text: &str, root: Node<K, V>, dispatch: ReadDispatch<K, V>) -> Self {
        Self {
            index: PositionIndex::new(text),
            tree: Tree::new(root),
            dispatch,
            stack: FeatureStack::new(),
            offset: 0,
            state: State::Pending,
        }
    }

    /// Applies engine limits.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.stack = FeatureStack::with_config(config);
        self
    }

    /// Converts an offset of the text into a point.
    pub fn point(&self, offset: usize) -> Point {
        self.index.point(offset)
    }

    /// Returns the current offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the length of the text in characters.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the position index of the text.
    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    /// Returns the tree built so far.
    pub fn tree(&self) -> &Tree<K, V> {
        &self.tree
    }

    /// Returns the root node, mutably.
    pub fn root_mut(&mut self) -> &mut Node<K, V> {
        let root = self.tree.root();
        &mut self.tree[root]
    }

    /// Consumes the reader and returns its tree.
    pub fn into_tree(self) -> Tree<K, V> {
        self.tree
    }

    /// Reads the whole text.
    ///
    /// The first call does all the work; later calls return the same tree.
    /// After a failure every later call returns [`ProtocolError::Poisoned`].
    pub async fn read(&mut self) -> Result<&Tree<K, V>, ReadError> {
        match self.state {
            State::Done => return Ok(&self.tree),
            State::Failed => return Err(ProtocolError::Poisoned.into()),
            State::Pending => {}
        }

        match self.run().await {
            Ok(()) => {
                self.state = State::Done;
                debug!(chars = self.index.len(), nodes = self.tree.len(), "read complete");
                Ok(&self.tree)
            }
            Err(err) => {
                self.stack.unwind();
                self.state = State::Failed;
                debug!(offset = self.offset, error = %err, "read failed");
                Err(err)
            }
        }
    }

    async fn run(&mut self) -> Result<(), ReadError> {
        let mut pending: Option<Candidates<K, V>> = None;

        while let Some(ch) = self.index.char_at(self.offset) {
            if pending.is_none() && self.stack.is_empty() {
                let dispatch = self.dispatch.clone();
                let root = self.tree.root();
                pending = Some(self.dispatch_at(&dispatch, root));
            }

            pending = match pending.take() {
                Some(candidates) => self.offer(candidates, ch).await?,
                None => self.step_top(ch).await?,
            };
        }

        while !self.stack.is_empty() {
            self.release_top().await?;
        }

        Ok(())
    }

    fn dispatch_at(&mut self, dispatch: &ReadDispatch<K, V>, ancestor: NodeId) -> Candidates<K, V> {
        let scratch = Scratch::new();
        let features = {
            let cx = ReadContext::new(&self.index, &mut self.tree, ancestor, self.offset, &scratch);
            dispatch(&cx)
        };
        trace!(offset = self.offset, candidates = features.len(), "dispatch");

        Candidates {
            features,
            ancestor,
            scratch,
        }
    }

    async fn offer(
        &mut self,
        candidates: Candidates<K, V>,
        ch: char,
    ) -> Result<Option<Candidates<K, V>>, ReadError> {
        let Candidates {
            features,
            ancestor,
            scratch,
        } = candidates;

        for mut feature in features {
            let step = {
                let mut cx =
                    ReadContext::new(&self.index, &mut self.tree, ancestor, self.offset, &scratch);
                feature.handle(&mut cx, ch).await?
            };

            if step.claims() {
                self.stack.push(ReadFrame {
                    feature,
                    ancestor,
                    scratch,
                })?;
                return self.apply(step, ancestor).await;
            }
        }

        trace!(offset = self.offset, ?ch, "skip");
        self.offset += 1;
        Ok(None)
    }

    async fn step_top(&mut self, ch: char) -> Result<Option<Candidates<K, V>>, ReadError> {
        let Some(frame) = self.stack.top_mut() else {
            return Ok(None);
        };

        let ancestor = frame.ancestor;
        let step = {
            let mut cx = ReadContext::new(
                &self.index,
                &mut self.tree,
                ancestor,
                self.offset,
                &frame.scratch,
            );
            frame.feature.handle(&mut cx, ch).await?
        };

        self.apply(step, ancestor).await
    }

    async fn apply(
        &mut self,
        step: Step<ReadRedirect<K, V>>,
        ancestor: NodeId,
    ) -> Result<Option<Candidates<K, V>>, ReadError> {
        match step {
            Step::Continue => {
                self.offset += 1;
                Ok(None)
            }
            Step::Decline => {
                self.release_top().await?;
                Ok(None)
            }
            Step::Redirect(redirect) => {
                let target = redirect.ancestor.unwrap_or(ancestor);
                if !self.tree.contains(target) {
                    return Err(ProtocolError::invalid_redirect(format!(
                        "ancestor {} is not part of the tree",
                        target.as_u32()
                    ))
                    .into());
                }
                Ok(Some(self.dispatch_at(&redirect.dispatch, target)))
            }
        }
    }

    async fn release_top(&mut self) -> Result<(), ReadError> {
        let Some(id) = self.stack.top_id() else {
            return Ok(());
        };

        let mut frame = self.stack.release(id)?;
        let mut cx = ReadContext::new(
            &self.index,
            &mut self.tree,
            frame.ancestor,
            self.offset,
            &frame.scratch,
        );
        frame.feature.exit(&mut cx).await
    }
}
