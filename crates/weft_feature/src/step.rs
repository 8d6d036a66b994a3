//! Feature step results.

/// What a feature wants the engine to do after handling one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<R> {
    /// The element was consumed; the engine advances and keeps this feature active.
    Continue,
    /// The element is not part of this feature; the engine releases it and
    /// retries the same element elsewhere.
    Decline,
    /// The feature stays on the stack, dormant, while the engine evaluates
    /// another dispatch function described by the payload.
    Redirect(R),
}

impl<R> Step<R> {
    /// Returns true for [`Step::Continue`].
    #[inline]
    pub fn is_continue(&self) -> bool {
        matches!(self, Step::Continue)
    }

    /// Returns true for [`Step::Decline`].
    #[inline]
    pub fn is_decline(&self) -> bool {
        matches!(self, Step::Decline)
    }

    /// Returns true for [`Step::Redirect`].
    #[inline]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Step::Redirect(_))
    }

    /// Returns true if the engine should push the feature that produced this step.
    #[inline]
    pub fn claims(&self) -> bool {
        !self.is_decline()
    }
}

impl<R> From<bool> for Step<R> {
    fn from(consumed: bool) -> Self {
        if consumed {
            Step::Continue
        } else {
            Step::Decline
        }
    }
}
