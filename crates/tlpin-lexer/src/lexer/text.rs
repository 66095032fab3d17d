//! Various text-related types

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A byte offset in the input text. We limit the input text to 4GB => 32 bits
///
/// This wrapper is used to clearly distinguish between byte offsets and
/// line/column positions.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ByteOffset(u32);

impl ByteOffset {
    #[must_use]
    pub fn new(val: u32) -> Self {
        ByteOffset(val)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<ByteOffset> for u32 {
    fn from(offset: ByteOffset) -> Self {
        offset.0
    }
}

impl From<ByteOffset> for usize {
    fn from(offset: ByteOffset) -> Self {
        offset.0 as usize
    }
}

/// A line/column location in the source.
///
/// Lines are one-based, columns are zero-based and count bytes, not chars.
/// Escape pairs inside string literals count as two columns, which is
/// exactly the number of bytes they occupy in the source.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Position {
    line: u32,
    column: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        debug_assert!(line > 0, "Lines are one-based");
        Position { line, column }
    }

    /// Returns line number, one-based.
    #[must_use]
    pub fn line(self) -> u32 {
        self.line
    }

    /// Returns column number, zero-based.
    #[must_use]
    pub fn column(self) -> u32 {
        self.column
    }

    #[inline]
    pub(super) fn advance_column(&mut self, by: u32) {
        self.column += by;
    }

    #[inline]
    pub(super) fn advance_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }
}

impl Default for Position {
    /// The very first byte of the source.
    fn default() -> Self {
        Position { line: 1, column: 0 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
