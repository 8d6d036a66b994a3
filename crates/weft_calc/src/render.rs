//! Compact s-expression rendering of trees.

use std::fmt::{self, Display};

use weft_ast::{NodeId, Tree};

/// Renders a tree on one line.
///
/// A leaf renders as its value, or its kind when it has none. A parent
/// renders as `(kind value child child ...)`.
///
/// ```rust
/// use weft_ast::{Node, Tree};
/// use weft_calc::render;
///
/// let mut tree: Tree<&str, i32> = Tree::new(Node::parent("sum"));
/// let root = tree.root();
/// tree.append(root, Node::literal("number", 1));
/// tree.append(root, Node::leaf("plus"));
///
/// assert_eq!(render(&tree), "(sum 1 plus)");
/// ```
pub fn render<K: Display, V: Display>(tree: &Tree<K, V>) -> String {
    Rendered {
        tree,
        id: tree.root(),
    }
    .to_string()
}

struct Rendered<'t, K, V> {
    tree: &'t Tree<K, V>,
    id: NodeId,
}

impl<K: Display, V: Display> fmt::Display for Rendered<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.tree[self.id];

        if !node.is_parent() {
            return match &node.value {
                Some(value) => write!(f, "{value}"),
                None => write!(f, "{}", node.kind),
            };
        }

        write!(f, "({}", node.kind)?;
        if let Some(value) = &node.value {
            write!(f, " {value}")?;
        }
        for &id in node.children() {
            let child = Rendered {
                tree: self.tree,
                id,
            };
            write!(f, " {child}")?;
        }
        f.write_str(")")
    }
}
