//! Context handed to transform features.

use weft_ast::{NodeId, Tree};
use weft_feature::Scratch;

/// Per-call view of the transformer state.
pub struct TransformContext<'a, IK, IV, OK, OV> {
    input_tree: &'a Tree<IK, IV>,
    output_tree: &'a mut Tree<OK, OV>,
    input: NodeId,
    output: NodeId,
    index: usize,
    scratch: &'a Scratch,
}

impl<'a, IK, IV, OK, OV> TransformContext<'a, IK, IV, OK, OV> {
    pub(crate) fn new(
        input_tree: &'a Tree<IK, IV>,
        output_tree: &'a mut Tree<OK, OV>,
        input: NodeId,
        output: NodeId,
        index: usize,
        scratch: &'a Scratch,
    ) -> Self {
        Self {
            input_tree,
            output_tree,
            input,
            output,
            index,
            scratch,
        }
    }

    /// Returns the root of the input tree.
    pub fn input_root(&self) -> NodeId {
        self.input_tree.root()
    }

    /// Returns the root of the output tree.
    pub fn output_root(&self) -> NodeId {
        self.output_tree.root()
    }

    /// Returns the input node whose children are being traversed.
    pub fn input(&self) -> NodeId {
        self.input
    }

    /// Returns the output node new children attach to.
    pub fn output(&self) -> NodeId {
        self.output
    }

    /// Returns the input tree.
    pub fn input_tree(&self) -> &'a Tree<IK, IV> {
        self.input_tree
    }

    /// Returns the output tree.
    pub fn output_tree(&self) -> &Tree<OK, OV> {
        self.output_tree
    }

    /// Returns the output tree for attaching new nodes.
    pub fn output_tree_mut(&mut self) -> &mut Tree<OK, OV> {
        self.output_tree
    }

    /// Returns the current child index of the input node.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of children of the input node.
    pub fn len(&self) -> usize {
        self.input_tree.children(self.input).len()
    }

    /// Returns true if the input node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the child at the current index, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node_at(self.index)
    }

    /// Returns the child at `index`, if any.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.input_tree.children(self.input).get(index).copied()
    }

    /// Returns the scratch bag shared with sibling candidates.
    pub fn scratch(&self) -> &Scratch {
        self.scratch
    }
}
