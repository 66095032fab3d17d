use std::slice::Iter;

/// Peekable iterator over a byte sequence.
/// Based on [`rustc`'s `Cursor`](https://github.com/rust-lang/rust/blob/d1b7355d3d7b4ead564dbecb1d240fcc74fff21b/compiler/rustc_lexer/src/cursor.rs)
///
/// The source language is byte oriented: positions count bytes and
/// payloads are raw bytes, so unlike `rustc` we never decode UTF-8 here.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    /// Iterator over bytes. Slightly faster than indexing a slice.
    bytes: Iter<'a, u8>,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(input: &'a [u8]) -> Cursor<'a> {
        Cursor {
            bytes: input.iter(),
        }
    }

    /// Peeks the next byte from the input stream without consuming it.
    /// Returns `None` at the end of input.
    pub(super) fn peek(&self) -> Option<u8> {
        self.bytes.as_slice().first().copied()
    }

    /// Checks if there is nothing more to consume.
    pub(super) fn is_eof(&self) -> bool {
        self.bytes.as_slice().is_empty()
    }

    /// Moves to the next byte.
    pub(super) fn advance(&mut self) -> Option<u8> {
        self.bytes.next().copied()
    }

    /// Returns the length of the remaining input in bytes.
    /// This is used to calculate the offset of the current token.
    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn remaining_len(&self) -> u32 {
        // Never truncates: the lexer refuses sources larger than u32::MAX bytes
        self.bytes.as_slice().len() as u32
    }
}
