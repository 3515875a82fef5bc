//! Cursor over a sentinel-terminated buffer.
//!
//! The cursor advances byte by byte. End of input is the sentinel (`0x00`)
//! at a position at or past the source length; a NUL before that is an
//! interior null and is scanned as an error token.

/// Returns the earliest of two optional positions.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor). The
/// cursor is [`Copy`], so snapshots for backtracking are free.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position.
    pos: u32,
    /// Length of actual source content.
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// `buf[source_len]` and every byte after it must be `0x00`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Byte at the current position; `0x00` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte one position ahead of current.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    /// Byte two positions ahead of current.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    /// Byte at an absolute position; `0x00` anywhere past the buffer.
    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(0)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// `true` at the sentinel, as opposed to an interior NUL.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Source text between two offsets, or `""` if they split a character.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        std::str::from_utf8(&self.buf[start..end]).unwrap_or_default()
    }

    /// Source text from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Whether the bytes at the current position start with `prefix`.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        let start = self.pos as usize;
        let end = start + prefix.len();
        end <= self.source_len as usize && &self.buf[start..end] == prefix
    }

    /// Advance while `pred` holds for the current byte. `pred(0)` must be
    /// `false` so the sentinel stops the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Number of bytes in the UTF-8 character starting with `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width.min(self.source_len.saturating_sub(self.pos).max(1)));
    }

    /// Advance to the next line break (`\n` or `\r`) or end of input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_line_break(&mut self) {
        let remaining = self.remaining();
        if let Some(offset) = memchr::memchr2(b'\n', b'\r', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance to the next byte that can end a quoted literal: `quote`, `\`,
    /// `\n` or `\r`. Returns that byte, or `0` at end of input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_quote_delim(&mut self, quote: u8) -> u8 {
        let remaining = self.remaining();
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        let cr = memchr::memchr(b'\r', remaining);
        if let Some(off) = earliest_of(primary, cr) {
            self.pos += off as u32;
            self.current()
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance past the closing `*/` of a block comment whose opener was
    /// already consumed. Returns `false` (at end of input) if none exists.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_block_comment_body(&mut self) -> bool {
        loop {
            let remaining = self.remaining();
            match memchr::memchr(b'*', remaining) {
                Some(off) => {
                    self.pos += off as u32 + 1;
                    if self.current() == b'/' && !self.is_eof() {
                        self.pos += 1;
                        return true;
                    }
                }
                None => {
                    self.pos = self.source_len;
                    return false;
                }
            }
        }
    }

    /// Advance past horizontal whitespace (spaces, tabs, form feeds and
    /// vertical tabs).
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(is_horizontal_whitespace);
    }

    /// `true` if only horizontal whitespace (or a leading byte-order mark)
    /// precedes the current position on its line.
    pub fn at_line_start(&self) -> bool {
        let mut i = self.pos as usize;
        while i > 0 {
            match self.buf[i - 1] {
                b'\n' | b'\r' => return true,
                b if is_horizontal_whitespace(b) => i -= 1,
                _ => return i == 3 && self.buf[..3] == BOM_BYTES,
            }
        }
        true
    }

    fn remaining(&self) -> &'a [u8] {
        let start = (self.pos as usize).min(self.source_len as usize);
        &self.buf[start..self.source_len as usize]
    }
}

/// UTF-8 encoding of U+FEFF.
pub(crate) const BOM_BYTES: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Space, tab, vertical tab and form feed.
#[inline]
pub(crate) fn is_horizontal_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | 0x0B | 0x0C)
}
