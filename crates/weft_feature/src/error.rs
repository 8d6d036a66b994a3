//! Protocol error types.

use thiserror::Error;

/// Violations of the feature protocol.
///
/// These are engine-level failures: the run stops, the stack is unwound
/// without running exit handlers, and the engine refuses further work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A live frame was released while another frame sits above it.
    #[error("frame {frame} is not the top of the feature stack (top is {top})")]
    NotTop {
        /// The frame that was released.
        frame: u64,
        /// The frame currently on top.
        top: u64,
    },

    /// A frame was released twice.
    #[error("frame {frame} was already released")]
    AlreadyReleased {
        /// The frame that was released.
        frame: u64,
    },

    /// A frame id that this stack never issued.
    #[error("frame {frame} was never pushed on this stack")]
    UnknownFrame {
        /// The frame id.
        frame: u64,
    },

    /// A redirect named a node that cannot receive it.
    #[error("invalid redirect target: {reason}")]
    InvalidRedirect {
        /// Why the target was rejected.
        reason: String,
    },

    /// The stack grew beyond the configured limit.
    #[error("feature stack exceeded the maximum depth of {max_depth}")]
    DepthExceeded {
        /// The configured maximum.
        max_depth: usize,
    },

    /// The engine was used again after a failed run.
    #[error("engine is poisoned by an earlier failure")]
    Poisoned,
}

impl ProtocolError {
    /// Creates a new invalid redirect error.
    pub fn invalid_redirect(reason: impl Into<String>) -> Self {
        Self::InvalidRedirect {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ProtocolError::NotTop { frame: 1, top: 3 };
        assert_eq!(
            err.to_string(),
            "frame 1 is not the top of the feature stack (top is 3)"
        );

        let err = ProtocolError::invalid_redirect("node 9 does not exist");
        assert_eq!(err.to_string(), "invalid redirect target: node 9 does not exist");

        let err = ProtocolError::DepthExceeded { max_depth: 2 };
        assert!(err.to_string().contains('2'));
    }
}
