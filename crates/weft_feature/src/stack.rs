//! Stack of active features.

use tracing::trace;

use crate::{EngineConfig, ProtocolError};

/// Identifier handed out for every push onto a [`FeatureStack`].
///
/// Ids are never reused within one stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// Returns the raw id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Ordered stack of active frames, innermost last.
///
/// Frames must be released in strict LIFO order. Releasing anything but the
/// top frame is reported as a [`ProtocolError`] instead of being ignored.
#[derive(Debug)]
pub struct FeatureStack<F> {
    frames: Vec<(FrameId, F)>,
    next_id: u64,
    max_depth: usize,
}

impl<F> FeatureStack<F> {
    /// Creates an empty stack with the default depth limit.
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Creates an empty stack limited by `config`.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            frames: Vec::new(),
            next_id: 0,
            max_depth: config.max_depth,
        }
    }

    /// Pushes a frame and returns its id.
    pub fn push(&mut self, frame: F) -> Result<FrameId, ProtocolError> {
        if self.frames.len() >= self.max_depth {
            return Err(ProtocolError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        let id = FrameId(self.next_id);
        self.next_id += 1;
        self.frames.push((id, frame));
        trace!(frame = id.0, depth = self.frames.len(), "push");
        Ok(id)
    }

    /// Releases the frame `id`, which must be the top of the stack.
    pub fn release(&mut self, id: FrameId) -> Result<F, ProtocolError> {
        match self.frames.last() {
            Some((top, _)) if *top == id => {}
            Some((top, _)) if self.is_live(id) => {
                return Err(ProtocolError::NotTop {
                    frame: id.0,
                    top: top.0,
                });
            }
            _ if id.0 < self.next_id => {
                return Err(ProtocolError::AlreadyReleased { frame: id.0 });
            }
            _ => return Err(ProtocolError::UnknownFrame { frame: id.0 }),
        }

        let (_, frame) = self
            .frames
            .pop()
            .ok_or(ProtocolError::UnknownFrame { frame: id.0 })?;
        trace!(frame = id.0, depth = self.frames.len(), "release");
        Ok(frame)
    }

    /// Drops every frame without releasing them one by one.
    ///
    /// Returns the number of frames dropped.
    pub fn unwind(&mut self) -> usize {
        let dropped = self.frames.len();
        self.frames.clear();
        if dropped > 0 {
            trace!(dropped, "unwind");
        }
        dropped
    }

    /// Returns the id of the top frame.
    #[inline]
    pub fn top_id(&self) -> Option<FrameId> {
        self.frames.last().map(|(id, _)| *id)
    }

    /// Returns the top frame.
    #[inline]
    pub fn top(&self) -> Option<&F> {
        self.frames.last().map(|(_, frame)| frame)
    }

    /// Returns the top frame mutably.
    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut F> {
        self.frames.last_mut().map(|(_, frame)| frame)
    }

    /// Returns true if `id` is still on the stack.
    pub fn is_live(&self, id: FrameId) -> bool {
        self.frames.iter().any(|(frame, _)| *frame == id)
    }

    /// Returns the current depth.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frame is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates over frames from the outermost to the innermost.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (FrameId, &F)> {
        self.frames.iter().map(|(id, frame)| (*id, frame))
    }
}

impl<F> Default for FeatureStack<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn stack_of(n: usize) -> (FeatureStack<usize>, Vec<FrameId>) {
        let mut stack = FeatureStack::new();
        let ids = (0..n).map(|i| stack.push(i).unwrap()).collect();
        (stack, ids)
    }

    #[test]
    fn test_push_and_release_in_order() {
        let (mut stack, ids) = stack_of(3);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.top(), Some(&2));

        for (i, id) in ids.into_iter().enumerate().rev() {
            assert_eq!(stack.release(id), Ok(i));
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut stack = FeatureStack::new();
        let a = stack.push("a").unwrap();
        stack.release(a).unwrap();
        let b = stack.push("b").unwrap();
        assert!(b > a);
    }

    #[rstest]
    #[case::bottom(0)]
    #[case::middle(1)]
    fn test_release_not_top(#[case] index: usize) {
        let (mut stack, ids) = stack_of(3);
        assert_eq!(
            stack.release(ids[index]),
            Err(ProtocolError::NotTop {
                frame: ids[index].get(),
                top: ids[2].get(),
            })
        );
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_release_twice() {
        let (mut stack, ids) = stack_of(2);
        stack.release(ids[1]).unwrap();
        assert_eq!(
            stack.release(ids[1]),
            Err(ProtocolError::AlreadyReleased { frame: 1 })
        );
    }

    #[test]
    fn test_release_twice_on_empty_stack() {
        let (mut stack, ids) = stack_of(1);
        stack.release(ids[0]).unwrap();
        assert_eq!(
            stack.release(ids[0]),
            Err(ProtocolError::AlreadyReleased { frame: 0 })
        );
    }

    #[test]
    fn test_release_unknown() {
        let (mut stack, _) = stack_of(1);
        let foreign = {
            let mut other = FeatureStack::new();
            other.push(()).unwrap();
            other.push(()).unwrap()
        };
        assert_eq!(
            stack.release(foreign),
            Err(ProtocolError::UnknownFrame { frame: 1 })
        );
    }

    #[test]
    fn test_depth_exceeded() {
        let mut stack = FeatureStack::with_config(&EngineConfig::new().with_max_depth(2));
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert_eq!(
            stack.push(3),
            Err(ProtocolError::DepthExceeded { max_depth: 2 })
        );
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_unwind() {
        let (mut stack, ids) = stack_of(3);
        assert_eq!(stack.unwind(), 3);
        assert!(stack.is_empty());
        assert_eq!(
            stack.release(ids[2]),
            Err(ProtocolError::AlreadyReleased { frame: 2 })
        );
    }

    #[test]
    fn test_top_mut_and_iter() {
        let (mut stack, ids) = stack_of(2);
        if let Some(top) = stack.top_mut() {
            *top = 10;
        }
        assert_eq!(stack.top_id(), Some(ids[1]));
        let frames: Vec<_> = stack.iter().map(|(_, f)| *f).collect();
        assert_eq!(frames, vec![0, 10]);
    }
}
