//! Transform error types.

use thiserror::Error;
use weft_ast::NodeId;
use weft_feature::ProtocolError;

/// Errors that can occur while transforming.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The feature protocol was violated.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A feature rejected an input node.
    #[error("{message} (input node {})", node.as_u32())]
    Rejected {
        /// Error message.
        message: String,
        /// The input node that was rejected.
        node: NodeId,
    },

    /// No candidate feature claimed an input node.
    #[error("no feature claimed input node {} at child index {index}", node.as_u32())]
    Unclaimed {
        /// The unclaimed input node.
        node: NodeId,
        /// Its index among its siblings.
        index: usize,
    },
}

impl TransformError {
    /// Creates a new rejection of `node`.
    pub fn rejected(message: impl Into<String>, node: NodeId) -> Self {
        Self::Rejected {
            message: message.into(),
            node,
        }
    }

    /// Returns true if a feature rejected the input.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
