//! Context handed to read features.

use weft_ast::{NodeId, Point, Position, PositionIndex, Tree};
use weft_feature::Scratch;

/// Per-call view of the reader state.
///
/// A context borrows the reader and cannot outlive the call it was passed to.
pub struct ReadContext<'a, K, V> {
    index: &'a PositionIndex,
    tree: &'a mut Tree<K, V>,
    ancestor: NodeId,
    offset: usize,
    scratch: &'a Scratch,
}

impl<'a, K, V> ReadContext<'a, K, V> {
    pub(crate) fn new(
        index: &'a PositionIndex,
        tree: &'a mut Tree<K, V>,
        ancestor: NodeId,
        offset: usize,
        scratch: &'a Scratch,
    ) -> Self {
        Self {
            index,
            tree,
            ancestor,
            offset,
            scratch,
        }
    }

    /// Returns the root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Returns the node new children should be attached to.
    #[inline]
    pub fn ancestor(&self) -> NodeId {
        self.ancestor
    }

    /// Returns the tree being built.
    #[inline]
    pub fn tree(&self) -> &Tree<K, V> {
        self.tree
    }

    /// Returns the tree being built, mutably.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut Tree<K, V> {
        self.tree
    }

    /// Returns the current offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the length of the text in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the point of the current offset.
    pub fn point(&self) -> Point {
        self.index.point(self.offset)
    }

    /// Returns the point of `offset`.
    pub fn point_at(&self, offset: usize) -> Point {
        self.index.point(offset)
    }

    /// Returns the position between two offsets.
    pub fn position(&self, start: usize, end: usize) -> Position {
        self.index.position(start, end)
    }

    /// Returns the character at the current offset, if any.
    #[inline]
    pub fn char(&self) -> Option<char> {
        self.index.char_at(self.offset)
    }

    /// Returns the character at `offset`, if any.
    #[inline]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.index.char_at(offset)
    }

    /// Returns the scratch bag shared with sibling candidates.
    #[inline]
    pub fn scratch(&self) -> &Scratch {
        self.scratch
    }
}
