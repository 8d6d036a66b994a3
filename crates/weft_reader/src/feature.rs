//! Read feature trait and dispatch types.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use weft_ast::NodeId;
use weft_feature::Step;

use crate::{ReadContext, ReadError};

/// Function that returns the ordered candidate features for a context.
///
/// Candidates are tried in order; the first one that does not decline the
/// current character is pushed onto the feature stack.
pub type ReadDispatch<K, V> = Rc<dyn Fn(&ReadContext<'_, K, V>) -> Vec<Box<dyn ReadFeature<K, V>>>>;

/// Wraps a closure or function as a [`ReadDispatch`].
pub fn read_dispatch<K, V, F>(f: F) -> ReadDispatch<K, V>
where
    F: Fn(&ReadContext<'_, K, V>) -> Vec<Box<dyn ReadFeature<K, V>>> + 'static,
{
    Rc::new(f)
}

/// A recognition unit driven by the [`Reader`](crate::Reader).
///
/// A feature receives the character at the current offset and answers with a
/// [`Step`]. Once claimed, it keeps receiving characters until it declines;
/// the engine then pops it and runs [`exit`](ReadFeature::exit) exactly once.
#[async_trait(?Send)]
pub trait ReadFeature<K, V> {
    /// Handles the character at the current offset.
    async fn handle(
        &mut self,
        cx: &mut ReadContext<'_, K, V>,
        ch: char,
    ) -> Result<Step<ReadRedirect<K, V>>, ReadError>;

    /// Finalizes the feature after it has been popped.
    ///
    /// The context offset is the first offset the feature did not consume.
    async fn exit(&mut self, cx: &mut ReadContext<'_, K, V>) -> Result<(), ReadError> {
        let _ = cx;
        Ok(())
    }
}

/// Payload of [`Step::Redirect`] for the reader.
pub struct ReadRedirect<K, V> {
    /// Dispatch function evaluated for the current character.
    pub dispatch: ReadDispatch<K, V>,
    /// Ancestor for the new candidates; the redirecting feature's ancestor if absent.
    pub ancestor: Option<NodeId>,
}

impl<K, V> ReadRedirect<K, V> {
    /// Redirects to `dispatch` under the current ancestor.
    pub fn to(dispatch: ReadDispatch<K, V>) -> Self {
        Self {
            dispatch,
            ancestor: None,
        }
    }

    /// Redirects to `dispatch` under `ancestor`.
    pub fn under(ancestor: NodeId, dispatch: ReadDispatch<K, V>) -> Self {
        Self {
            dispatch,
            ancestor: Some(ancestor),
        }
    }
}

impl<K, V> Clone for ReadRedirect<K, V> {
    fn clone(&self) -> Self {
        Self {
            dispatch: Rc::clone(&self.dispatch),
            ancestor: self.ancestor,
        }
    }
}

impl<K, V> fmt::Debug for ReadRedirect<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadRedirect")
            .field("ancestor", &self.ancestor)
            .finish_non_exhaustive()
    }
}
