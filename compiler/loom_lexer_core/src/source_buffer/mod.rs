//! Padded copy of the source text.
//!
//! At least one `0x00` byte follows the text, and the allocation is a whole
//! number of 64-byte blocks. The cursor reads that zero as end of input and
//! can look two bytes ahead anywhere without a length check.

use crate::Cursor;

const CACHE_LINE: usize = 64;

/// Source bytes followed by zero padding up to the next 64-byte block.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a padded buffer with a trailing sentinel.
    ///
    /// Sources larger than `u32::MAX` bytes are truncated to that length;
    /// `loom_ir::SourceText` refuses to build such texts in the first place.
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let source_len = bytes.len().min(u32::MAX as usize - CACHE_LINE);

        let mut buf = vec![0u8; (source_len + CACHE_LINE) & !(CACHE_LINE - 1)];
        buf[..source_len].copy_from_slice(&bytes[..source_len]);

        Self {
            buf,
            source_len: source_len as u32,
        }
    }

    /// The text itself.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// The text plus its zero padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// A [`Cursor`] at the first byte.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Create a [`Cursor`] positioned at `pos`, clamped to the end of input.
    ///
    /// `pos` must be a character boundary of the original text.
    pub fn cursor_at(&self, pos: u32) -> Cursor<'_> {
        let mut cursor = self.cursor();
        cursor.advance_n(pos.min(self.source_len));
        cursor
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);
