//! # weft_ast
//!
//! Tree and position types shared by the weft reader and transformer.
//!
//! ## Architecture
//!
//! - Every node lives in a [`Tree`] arena and is addressed by a stable [`NodeId`]
//! - Children are stored as id lists; there are no parent pointers
//! - The node shape is generic over a kind `K` and a scalar payload `V`
//! - [`PositionIndex`] maps absolute character offsets to line/column [`Point`]s
//!
//! ## Example
//!
//! ```rust
//! use weft_ast::{Node, PositionIndex, Tree};
//!
//! let index = PositionIndex::new("ab\ncd");
//! let mut tree: Tree<&str, u32> = Tree::new(Node::parent("root"));
//!
//! let root = tree.root();
//! let leaf = tree.append(
//!     root,
//!     Node::literal("num", 1).with_position(index.position(0, 2)),
//! );
//!
//! assert_eq!(tree.children(root), &[leaf]);
//! assert_eq!(index.point(3).line, 2);
//! ```

mod index;
mod node;
mod position;
mod tree;

pub use index::PositionIndex;
pub use node::{Node, NodeId};
pub use position::{Point, Position};
pub use tree::{Descendants, NodeView, Tree};
