//! Offset to line/column conversion for a fixed text.

use crate::{Point, Position};

/// Character sequence and line table of a source text.
///
/// Offsets count Unicode scalar values, one slot per character. A line break
/// is a LF, a CR followed by LF, or a lone CR; a CRLF pair starts exactly one
/// new line, right after the LF.
#[derive(Debug, Clone)]
pub struct PositionIndex {
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl PositionIndex {
    /// Builds the index for `text`.
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];

        for (i, &ch) in chars.iter().enumerate() {
            match ch {
                '\n' => line_starts.push(i + 1),
                '\r' if chars.get(i + 1) != Some(&'\n') => line_starts.push(i + 1),
                _ => {}
            }
        }

        Self { chars, line_starts }
    }

    /// Returns the number of characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the character sequence.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Returns the character at `offset`, if any.
    #[inline]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Returns the number of lines (an empty text has one line).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the offset at which `line` (1-indexed) begins.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|i| self.line_starts.get(i))
            .copied()
    }

    /// Converts an absolute offset into a point.
    ///
    /// Offsets past the end of the text resolve against the last line, so
    /// `point(len())` is a valid end point.
    pub fn point(&self, offset: usize) -> Point {
        let line = if self.line_starts.len() == 1 || offset < self.line_starts[1] {
            1
        } else if offset >= self.line_starts[self.line_starts.len() - 1] {
            self.line_starts.len()
        } else {
            self.line_starts.partition_point(|&start| start <= offset)
        };

        let column = offset - self.line_starts[line - 1] + 1;

        Point::new(line, column, offset)
    }

    /// Builds a position from two offsets.
    pub fn position(&self, start: usize, end: usize) -> Position {
        Position::new(self.point(start), self.point(end))
    }
}
