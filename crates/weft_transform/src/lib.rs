//! # weft_transform
//!
//! Rewrites an input tree into an output tree with pluggable features.
//!
//! The transformer walks the children of the current input node and offers
//! each child to candidate features, the same way the reader offers
//! characters. Every input node in play keeps its own child index, so a
//! feature can descend into a nested input (for example a bracket) while the
//! enclosing traversal waits. When the nested input is exhausted, the
//! enclosing index advances by exactly one.
//!
//! Redirects come in two shapes:
//!
//! - **output only**: new candidates attach under another output node while
//!   the same input keeps being traversed
//! - **input and output**: traversal moves to the children of another input
//!   node, and output attaches under the given output node
//!
//! A node no candidate claims is an error ([`TransformError::Unclaimed`]).

mod context;
mod error;
mod feature;
mod transformer;

pub use context::TransformContext;
pub use error::TransformError;
pub use feature::{TransformDispatch, TransformFeature, TransformRedirect, transform_dispatch};
pub use transformer::Transformer;
