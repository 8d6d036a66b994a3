//! Arena tree.
//!
//! Nodes are stored in a single vector and addressed by [`NodeId`]. Child
//! lists only point downwards, so the current ancestor of a feature is always
//! passed explicitly instead of being reachable through a parent pointer.

use std::ops::{Index, IndexMut};

use serde::Serialize;

use crate::{Node, NodeId};

/// A tree of nodes owned by one arena.
#[derive(Debug, Clone)]
pub struct Tree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: NodeId,
}

impl<K, V> Tree<K, V> {
    /// Creates a tree holding only `root`.
    pub fn new(root: Node<K, V>) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId::new(0),
        }
    }

    /// Returns the root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes ever created, attached or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes. A tree always has a root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` was created by this tree.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Gets a node by id.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id.index())
    }

    /// Gets a node by id, mutably.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        self.nodes.get_mut(id.index())
    }

    /// Creates a detached node and returns its id.
    pub fn create(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// A leaf parent becomes a parent node.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self[parent]
            .children
            .get_or_insert_with(Vec::new)
            .push(child);
    }

    /// Creates `node` and appends it to the children of `parent`.
    pub fn append(&mut self, parent: NodeId, node: Node<K, V>) -> NodeId {
        let id = self.create(node);
        self.attach(parent, id);
        id
    }

    /// Detaches and returns the last child of `parent`.
    pub fn pop_child(&mut self, parent: NodeId) -> Option<NodeId> {
        self[parent].children.as_mut().and_then(Vec::pop)
    }

    /// Removes every child of `parent`.
    pub fn clear_children(&mut self, parent: NodeId) {
        if let Some(children) = self[parent].children.as_mut() {
            children.clear();
        }
    }

    /// Returns the child ids of `id`.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self[id].children()
    }

    /// Returns the first child of `id`.
    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Returns the last child of `id`.
    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Iterates over the descendants of `id` in pre-order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_, K, V> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Returns a serializable view of the subtree rooted at `id`.
    #[inline]
    pub fn view(&self, id: NodeId) -> NodeView<'_, K, V> {
        NodeView { tree: self, id }
    }

    /// Checks the position invariants of the subtree rooted at `id`.
    ///
    /// Siblings must appear in order without overlapping, and a positioned
    /// node must enclose the positions of its children. Nodes without a
    /// position are not checked against their neighbours.
    pub fn positions_consistent(&self, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(self.descendants(id))
            .all(|node| self.node_positions_consistent(node))
    }

    fn node_positions_consistent(&self, id: NodeId) -> bool {
        let node = &self[id];
        let positions: Vec<_> = node
            .children()
            .iter()
            .filter_map(|&child| self[child].position)
            .collect();

        let ordered = positions
            .windows(2)
            .all(|pair| pair[0].end.offset <= pair[1].start.offset);

        let enclosed = match node.position {
            Some(own) => positions.iter().all(|child| own.encloses(child)),
            None => true,
        };

        ordered && enclosed
    }
}

impl<K, V> Index<NodeId> for Tree<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

impl<K, V> IndexMut<NodeId> for Tree<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.index()]
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'t, K, V> {
    tree: &'t Tree<K, V>,
    stack: Vec<NodeId>,
}

impl<K, V> Iterator for Descendants<'_, K, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Borrowed view of a subtree, serialized as nested objects.
///
/// Fields: `type`, then `value` and `position` when present, then
/// `children` for parent nodes.
#[derive(Clone, Copy)]
pub struct NodeView<'t, K, V> {
    tree: &'t Tree<K, V>,
    id: NodeId,
}

impl<'t, K, V> NodeView<'t, K, V> {
    /// Returns the id of the viewed node.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the viewed node.
    #[inline]
    pub fn node(&self) -> &'t Node<K, V> {
        &self.tree[self.id]
    }

    /// Iterates over views of the children.
    pub fn children(&self) -> impl Iterator<Item = NodeView<'t, K, V>> + 't {
        let tree = self.tree;
        tree.children(self.id)
            .iter()
            .map(move |&id| NodeView { tree, id })
    }
}

impl<K: Serialize, V: Serialize> Serialize for NodeView<'_, K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let node = self.node();

        let mut len = 1;
        if node.value.is_some() {
            len += 1;
        }
        if node.position.is_some() {
            len += 1;
        }
        if node.is_parent() {
            len += 1;
        }

        let mut state = serializer.serialize_struct("Node", len)?;
        state.serialize_field("type", &node.kind)?;

        if let Some(value) = &node.value {
            state.serialize_field("value", value)?;
        }

        if let Some(position) = &node.position {
            state.serialize_field("position", position)?;
        }

        if node.is_parent() {
            let children: Vec<_> = self.children().collect();
            state.serialize_field("children", &children)?;
        }

        state.end()
    }
}
