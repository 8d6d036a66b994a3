//! Point and position types for source locations.
//!
//! These follow the unist conventions: 1-indexed lines and columns plus a
//! 0-indexed absolute character offset.

use serde::{Deserialize, Serialize};

/// A single place in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Character offset (0-indexed).
    pub offset: usize,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A range in source text, from `start` (inclusive) to `end` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Start point.
    pub start: Point,
    /// End point (exclusive).
    pub end: Point,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Creates an empty position at a single point.
    #[inline]
    pub const fn at(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Returns the length of the position in characters.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Returns true if the position covers no characters.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Returns true if this position contains the given offset.
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start.offset <= offset && offset < self.end.offset
    }

    /// Returns true if `other` lies entirely within this position.
    #[inline]
    pub const fn encloses(&self, other: &Position) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }

    /// Merges two positions into one that covers both.
    pub fn cover(&self, other: &Position) -> Position {
        Position {
            start: if self.start.offset <= other.start.offset {
                self.start
            } else {
                other.start
            },
            end: if self.end.offset >= other.end.offset {
                self.end
            } else {
                other.end
            },
        }
    }
}
