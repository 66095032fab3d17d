use std::io::{self, Read};

use super::text::{ByteOffset, Position};

/// Maximum length of a run of non-delimiter bytes (numbers and atoms).
pub const MAX_TOKEN_SIZE: usize = 256;

/// How many bytes `SourceBuffer::from_reader` asks for at a time by default.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 1024;

/// Owned, growable byte buffer.
///
/// Holds whole source programs and accumulates decoded string literals.
/// Growth is amortized (doubling), memory is released on drop or `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceBuffer {
    bytes: Vec<u8>,
}

impl SourceBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SourceBuffer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Reads `reader` until EOF, `chunk_size` bytes at a time.
    ///
    /// # Errors
    /// Any I/O error returned by the reader, except `Interrupted` which is retried.
    pub fn from_reader<R: Read>(reader: R, chunk_size: usize) -> io::Result<Self> {
        let mut buffer = Self::new();
        buffer.read_from(reader, chunk_size)?;
        Ok(buffer)
    }

    /// Appends everything `reader` yields until EOF, `chunk_size` bytes at a time.
    /// Returns the number of bytes appended.
    ///
    /// # Errors
    /// Any I/O error returned by the reader, except `Interrupted` which is retried.
    pub fn read_from<R: Read>(&mut self, mut reader: R, chunk_size: usize) -> io::Result<usize> {
        let chunk_size = chunk_size.max(1) as u64;
        let mut total = 0;

        loop {
            let read = reader.by_ref().take(chunk_size).read_to_end(&mut self.bytes)?;

            if read == 0 {
                return Ok(total);
            }

            total += read;
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    #[inline]
    pub fn append(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn append_many(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Makes room for at least `additional` more bytes without changing the length.
    pub fn reserve(&mut self, additional: usize) {
        self.bytes.reserve(additional);
    }

    /// Truncates or zero-extends the buffer to exactly `size` bytes.
    pub fn resize(&mut self, size: usize) {
        self.bytes.resize(size, 0);
    }

    /// Grows the buffer by `additional` zero bytes.
    pub fn expand(&mut self, additional: usize) {
        self.resize(self.len() + additional);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Overwrites the byte at `index`, returning the previous value.
    /// Out of bounds writes are ignored and return `None`.
    pub fn set(&mut self, index: usize, value: u8) -> Option<u8> {
        self.bytes
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value))
    }

    pub fn swap(&mut self, other: &mut SourceBuffer) {
        std::mem::swap(&mut self.bytes, &mut other.bytes);
    }

    /// Empties the buffer and releases its memory.
    pub fn clear(&mut self) {
        self.bytes = Vec::new();
    }
}

impl AsRef<[u8]> for SourceBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for SourceBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        SourceBuffer { bytes }
    }
}

impl From<&[u8]> for SourceBuffer {
    fn from(bytes: &[u8]) -> Self {
        SourceBuffer {
            bytes: bytes.to_vec(),
        }
    }
}

impl From<&str> for SourceBuffer {
    fn from(text: &str) -> Self {
        SourceBuffer::from(text.as_bytes())
    }
}

impl From<SourceBuffer> for Vec<u8> {
    fn from(buffer: SourceBuffer) -> Self {
        buffer.bytes
    }
}

impl Extend<u8> for SourceBuffer {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        self.bytes.extend(iter);
    }
}

/// The run of non-delimiter bytes being accumulated.
///
/// Bounded by `MAX_TOKEN_SIZE` and preallocated to it, so pushing never
/// reallocates.
#[derive(Debug)]
pub(super) struct PendingRun {
    bytes: Vec<u8>,

    /// Where the first byte of the run was seen. `None` while empty.
    start: Option<(Position, ByteOffset)>,
}

impl PendingRun {
    pub(super) fn new() -> Self {
        PendingRun {
            bytes: Vec::with_capacity(MAX_TOKEN_SIZE),
            start: None,
        }
    }

    #[inline]
    pub(super) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub(super) fn start(&self) -> Option<(Position, ByteOffset)> {
        self.start
    }

    #[inline]
    pub(super) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends `byte`, recording `at` as the run start if this is the first one.
    ///
    /// Returns `false` and leaves the run untouched if it is already full.
    #[must_use]
    pub(super) fn push(&mut self, byte: u8, at: Position, at_byte_offset: ByteOffset) -> bool {
        if self.bytes.len() >= MAX_TOKEN_SIZE {
            return false;
        }

        if self.start.is_none() {
            self.start = Some((at, at_byte_offset));
        }

        self.bytes.push(byte);
        true
    }

    /// Empties the run, keeping the allocation.
    pub(super) fn clear(&mut self) {
        self.bytes.clear();
        self.start = None;
    }
}
