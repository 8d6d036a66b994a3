//! # weft_calc
//!
//! Arithmetic expression grammar built on the weft engines.
//!
//! The reader turns text such as `2 * sin(x + 1)` into a flat
//! [`SyntaxTree`] of numbers, operators, names and brackets. The transformer
//! then regroups operators by precedence and turns a name followed by a
//! bracket into a function application, producing an [`ExprTree`].
//!
//! ## Example
//!
//! ```rust
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let tree = weft_calc::read_and_transform("1 + 2 * 3").await.unwrap();
//! assert_eq!(
//!     weft_calc::render(&tree),
//!     "(calculator 1 + (group multiplicative 2 * 3))"
//! );
//! # });
//! ```

mod read;
mod render;
mod syntax;
mod transform;

use thiserror::Error;
use tracing::debug;
use weft_feature::EngineConfig;
use weft_reader::ReadError;
use weft_transform::TransformError;

pub use read::{grammar as read_grammar, read, read_with_config};
pub use render::render;
pub use syntax::{ExprKind, ExprTree, Literal, Operator, Precedence, SyntaxKind, SyntaxTree};
pub use transform::{grammar as transform_grammar, transform, transform_with_config};

/// Errors of a combined read and transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Reading the text failed.
    #[error("read failed: {0}")]
    Read(#[from] ReadError),

    /// Transforming the syntax tree failed.
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),
}

impl CalcError {
    /// Returns true if a feature rejected the input.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Read(err) => err.is_rejection(),
            Self::Transform(err) => err.is_rejection(),
        }
    }
}

/// Reads and transforms `text`.
pub async fn read_and_transform(text: &str) -> Result<ExprTree, CalcError> {
    read_and_transform_with_config(text, &EngineConfig::default()).await
}

/// Reads and transforms `text` with explicit engine limits.
pub async fn read_and_transform_with_config(
    text: &str,
    config: &EngineConfig,
) -> Result<ExprTree, CalcError> {
    let syntax = read_with_config(text, config).await?;
    debug!(nodes = syntax.len(), "syntax tree ready");
    let expr = transform_with_config(&syntax, config).await?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_and_transform() {
        let tree = read_and_transform("(1 + 2) * 3").await.unwrap();
        assert_eq!(
            render(&tree),
            "(calculator (group multiplicative (bracket 1 + 2) * 3))"
        );
    }

    #[tokio::test]
    async fn test_rejection_is_reported() {
        let err = read_and_transform("(1").await.unwrap_err();
        assert!(err.is_rejection());
        assert!(matches!(err, CalcError::Read(_)));
    }

    #[tokio::test]
    async fn test_depth_limit_applies_to_reader() {
        let config = EngineConfig::new().with_max_depth(2);
        let err = read_and_transform_with_config("(((1)))", &config)
            .await
            .unwrap_err();
        assert!(!err.is_rejection());
    }
}
