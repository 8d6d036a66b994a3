//! # weft_reader
//!
//! Builds a tree from a character sequence with pluggable features.
//!
//! ## Architecture
//!
//! - A [`ReadDispatch`] maps the current context to an ordered list of
//!   candidate features
//! - The first candidate that claims the current character is pushed onto the
//!   feature stack and receives every following character until it declines
//! - A feature may redirect to another dispatch function, optionally under a
//!   different ancestor node, while staying dormant on the stack
//! - Characters no candidate claims are skipped
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use weft_ast::Node;
//! use weft_feature::Step;
//! use weft_reader::{ReadContext, ReadError, ReadFeature, ReadRedirect, Reader, read_dispatch};
//!
//! #[derive(Default)]
//! struct Digits {
//!     start: usize,
//!     text: String,
//! }
//!
//! #[async_trait(?Send)]
//! impl ReadFeature<&'static str, u64> for Digits {
//!     async fn handle(
//!         &mut self,
//!         cx: &mut ReadContext<'_, &'static str, u64>,
//!         ch: char,
//!     ) -> Result<Step<ReadRedirect<&'static str, u64>>, ReadError> {
//!         if !ch.is_ascii_digit() {
//!             return Ok(Step::Decline);
//!         }
//!         if self.text.is_empty() {
//!             self.start = cx.offset();
//!         }
//!         self.text.push(ch);
//!         Ok(Step::Continue)
//!     }
//!
//!     async fn exit(&mut self, cx: &mut ReadContext<'_, &'static str, u64>) -> Result<(), ReadError> {
//!         let value = self.text.parse().map_err(|_| ReadError::rejected("bad number", cx.point()))?;
//!         let position = cx.position(self.start, cx.offset());
//!         let ancestor = cx.ancestor();
//!         cx.tree_mut().append(ancestor, Node::literal("number", value).with_position(position));
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut reader = Reader::new(
//!     "12 34",
//!     Node::parent("root"),
//!     read_dispatch(|cx| match cx.char() {
//!         Some(ch) if ch.is_ascii_digit() => {
//!             vec![Box::new(Digits::default()) as Box<dyn ReadFeature<&'static str, u64>>]
//!         }
//!         _ => Vec::new(),
//!     }),
//! );
//!
//! let tree = reader.read().await.unwrap();
//! let numbers: Vec<_> = tree
//!     .children(tree.root())
//!     .iter()
//!     .map(|&id| tree[id].value)
//!     .collect();
//! assert_eq!(numbers, vec![Some(12), Some(34)]);
//! # });
//! ```

mod context;
mod error;
mod feature;
mod reader;

pub use context::ReadContext;
pub use error::ReadError;
pub use feature::{ReadDispatch, ReadFeature, ReadRedirect, read_dispatch};
pub use reader::Reader;
