//! Read error types.

use thiserror::Error;
use weft_ast::Point;
use weft_feature::ProtocolError;

/// Errors that can occur while reading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadError {
    /// The feature protocol was violated.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A feature rejected the input.
    #[error("{message} at line {}, column {}", point.line, point.column)]
    Rejected {
        /// Error message.
        message: String,
        /// Character offset where the input was rejected.
        offset: usize,
        /// Line/column of `offset`.
        point: Point,
    },
}

impl ReadError {
    /// Creates a new rejection at `point`.
    pub fn rejected(message: impl Into<String>, point: Point) -> Self {
        Self::Rejected {
            message: message.into(),
            offset: point.offset,
            point,
        }
    }

    /// Returns true if a feature rejected the input.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected() {
        let err = ReadError::rejected("unclosed bracket", Point::new(2, 4, 7));
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "unclosed bracket at line 2, column 4");
        assert!(matches!(err, ReadError::Rejected { offset: 7, .. }));
    }

    #[test]
    fn test_protocol_is_transparent() {
        let err: ReadError = ProtocolError::Poisoned.into();
        assert!(!err.is_rejection());
        assert_eq!(err.to_string(), ProtocolError::Poisoned.to_string());
    }
}
