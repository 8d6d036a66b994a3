//! # weft_feature
//!
//! Contract shared by the weft reader and transformer engines.
//!
//! A feature is a small state machine that claims a run of input. Each call
//! to its handler answers with a [`Step`]: keep consuming, give the input
//! back, or hand control to another dispatch function while staying on the
//! stack. Engines keep active features in a [`FeatureStack`], which enforces
//! strict nesting when frames are released.
//!
//! ## Example
//!
//! ```rust
//! use weft_feature::{FeatureStack, ProtocolError, Step};
//!
//! let mut stack = FeatureStack::new();
//! let outer = stack.push("outer").unwrap();
//! let inner = stack.push("inner").unwrap();
//!
//! assert_eq!(
//!     stack.release(outer),
//!     Err(ProtocolError::NotTop { frame: outer.get(), top: inner.get() })
//! );
//! assert_eq!(stack.release(inner), Ok("inner"));
//! assert_eq!(stack.release(outer), Ok("outer"));
//!
//! let step: Step<()> = true.into();
//! assert!(step.is_continue());
//! ```

mod config;
mod error;
mod scratch;
mod stack;
mod step;

pub use config::EngineConfig;
pub use error::ProtocolError;
pub use scratch::Scratch;
pub use stack::{FeatureStack, FrameId};
pub use step::Step;
