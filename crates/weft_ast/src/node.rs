//! Node definition.
//!
//! A node is a type tag, an optional list of child ids, an optional scalar
//! payload and an optional source position. Child lists are managed by the
//! owning [`Tree`](crate::Tree).

use crate::Position;

/// Stable identifier of a node inside one [`Tree`](crate::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw integer id.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// A node of a weft tree.
///
/// # Example
///
/// ```rust
/// use weft_ast::{Node, Tree};
///
/// let mut tree: Tree<&str, f64> = Tree::new(Node::parent("calculator"));
/// let root = tree.root();
/// let number = tree.append(root, Node::literal("number", 1.5));
///
/// assert_eq!(tree[number].value, Some(1.5));
/// assert!(tree[root].is_parent());
/// assert!(!tree[number].is_parent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node<K, V> {
    /// The type tag of this node.
    pub kind: K,

    /// Scalar payload (for literal nodes).
    pub value: Option<V>,

    /// Source position, when known.
    pub position: Option<Position>,

    pub(crate) children: Option<Vec<NodeId>>,
}

impl<K, V> Node<K, V> {
    /// Creates a parent node with no children yet.
    #[inline]
    pub fn parent(kind: K) -> Self {
        Self {
            kind,
            value: None,
            position: None,
            children: Some(Vec::new()),
        }
    }

    /// Creates a leaf node (no children, no value).
    #[inline]
    pub fn leaf(kind: K) -> Self {
        Self {
            kind,
            value: None,
            position: None,
            children: None,
        }
    }

    /// Creates a leaf node carrying a value.
    #[inline]
    pub fn literal(kind: K, value: V) -> Self {
        Self {
            kind,
            value: Some(value),
            position: None,
            children: None,
        }
    }

    /// Sets the value of this node.
    #[inline]
    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the position of this node.
    #[inline]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the position of this node if one is given.
    #[inline]
    pub fn with_position_opt(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// Returns true if this node has a children sequence (possibly empty).
    #[inline]
    pub fn is_parent(&self) -> bool {
        self.children.is_some()
    }

    /// Returns the child ids of this node (empty for leaves).
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns true if this node has at least one child.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}
