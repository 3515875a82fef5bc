//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner works on a sentinel-terminated [`Cursor`] and produces
//! [`RawToken`] values with zero heap allocation. It does not resolve
//! keywords or validate directive names; those are deferred to the cooking
//! layer.
//!
//! # Design
//!
//! Main dispatch covers all 256 byte values. Each arm calls a focused method
//! that advances the cursor and returns `RawToken { tag, len }`. The sentinel
//! byte (`0x00`) dispatches to `eof()`.

use crate::cursor::{Cursor, BOM_BYTES};
use crate::tag::{RawTag, RawToken};

/// Scanner configuration.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ScanMode {
    /// Recognize `#name` at line start as a directive instead of an
    /// invalid character.
    pub directives: bool,
}

/// Pure, allocation-free scanner.
///
/// Produces one token at a time. Error conditions are encoded as `RawTag`
/// variants, not as `Result::Err`, and every call makes progress until
/// [`RawTag::Eof`].
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    mode: ScanMode,
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>, mode: ScanMode) -> Self {
        Self { cursor, mode }
    }

    /// Byte offset of the next token.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted.
    /// Subsequent calls after EOF continue to return `Eof`.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.eof(start),
            b' ' | b'\t' | 0x0B | 0x0C => self.whitespace(start),
            b'\r' => self.carriage_return(start),
            b'\n' => self.single(start, RawTag::Newline),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'"' => self.string(start),
            b'\'' => self.char_literal(start),
            b'/' => self.slash_or_comment(start),
            b'#' => self.hash(start),
            b'<' => self.conflict_marker_or(start, b'<', Self::less),
            b'|' => self.conflict_marker_or(start, b'|', Self::pipe),
            b'=' => self.conflict_marker_or(start, b'=', Self::equal),
            b'>' => self.conflict_marker_or(start, b'>', Self::greater),
            b'+' => self.with_equal(start, RawTag::Plus, RawTag::PlusEqual),
            b'*' => self.with_equal(start, RawTag::Star, RawTag::StarEqual),
            b'!' => self.with_equal(start, RawTag::Bang, RawTag::BangEqual),
            b'-' => self.minus(start),
            b'&' => self.ampersand(start),
            b'%' => self.single(start, RawTag::Percent),
            b'^' => self.single(start, RawTag::Caret),
            b'~' => self.single(start, RawTag::Tilde),
            b'.' => self.single(start, RawTag::Dot),
            b'?' => self.single(start, RawTag::Question),
            b':' => self.single(start, RawTag::Colon),
            b',' => self.single(start, RawTag::Comma),
            b';' => self.single(start, RawTag::Semicolon),
            b'(' => self.single(start, RawTag::LeftParen),
            b')' => self.single(start, RawTag::RightParen),
            b'{' => self.single(start, RawTag::LeftBrace),
            b'}' => self.single(start, RawTag::RightBrace),
            b'[' => self.single(start, RawTag::LeftBracket),
            b']' => self.single(start, RawTag::RightBracket),
            0xEF if start == 0 && self.cursor.starts_with(&BOM_BYTES) => {
                self.cursor.advance_n(3);
                self.token(start, RawTag::ByteOrderMark)
            }
            // Control characters, DEL, `@ $ \ backtick` and non-ASCII.
            _ => self.invalid_char(start),
        }
    }

    #[inline]
    fn token(&self, start: u32, tag: RawTag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    // ─── EOF ─────────────────────────────────────────────────────────

    fn eof(&mut self, start: u32) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            self.cursor.advance();
            self.token(start, RawTag::InteriorNull)
        }
    }

    // ─── Whitespace & Newlines ───────────────────────────────────────

    #[inline]
    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        self.token(start, RawTag::Whitespace)
    }

    fn carriage_return(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '\r'
        if self.cursor.current() == b'\n' {
            self.cursor.advance();
        }
        self.token(start, RawTag::Newline)
    }

    // ─── Comments ────────────────────────────────────────────────────

    fn slash_or_comment(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume first '/'
        match self.cursor.current() {
            b'/' => {
                let is_doc = self.cursor.peek() == b'/' && self.cursor.peek2() != b'/';
                self.cursor.eat_until_line_break();
                let tag = if is_doc {
                    RawTag::DocComment
                } else {
                    RawTag::LineComment
                };
                self.token(start, tag)
            }
            b'*' => {
                self.cursor.advance();
                let tag = if self.cursor.eat_block_comment_body() {
                    RawTag::BlockComment
                } else {
                    RawTag::UnterminatedBlockComment
                };
                self.token(start, tag)
            }
            b'=' => {
                self.cursor.advance();
                self.token(start, RawTag::SlashEqual)
            }
            _ => self.token(start, RawTag::Slash),
        }
    }

    // ─── Directives & conflict markers ───────────────────────────────

    fn hash(&mut self, start: u32) -> RawToken {
        if self.mode.directives && self.cursor.at_line_start() {
            self.cursor.eat_until_line_break();
            self.token(start, RawTag::Directive)
        } else {
            self.invalid_char(start)
        }
    }

    /// A conflict marker is seven copies of `byte` at line start; anything
    /// else falls through to the operator scanner `or`.
    fn conflict_marker_or(
        &mut self,
        start: u32,
        byte: u8,
        or: fn(&mut Self, u32) -> RawToken,
    ) -> RawToken {
        if self.cursor.starts_with(&[byte; 7]) && self.cursor.at_line_start() {
            self.cursor.eat_until_line_break();
            self.token(start, RawTag::ConflictMarker)
        } else {
            or(self, start)
        }
    }

    // ─── Identifiers ─────────────────────────────────────────────────

    #[inline]
    fn identifier(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        self.token(start, RawTag::Ident)
    }

    // ─── Operators ───────────────────────────────────────────────────

    /// Single-byte token: advance one byte and emit the given tag.
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.token(start, tag)
    }

    /// `op` or `op=`.
    fn with_equal(&mut self, start: u32, plain: RawTag, compound: RawTag) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == b'=' {
            self.cursor.advance();
            self.token(start, compound)
        } else {
            self.token(start, plain)
        }
    }

    fn minus(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'>' => {
                self.cursor.advance_n(2);
                self.token(start, RawTag::Arrow)
            }
            _ => self.with_equal(start, RawTag::Minus, RawTag::MinusEqual),
        }
    }

    fn less(&mut self, start: u32) -> RawToken {
        self.with_equal(start, RawTag::Less, RawTag::LessEqual)
    }

    fn greater(&mut self, start: u32) -> RawToken {
        self.with_equal(start, RawTag::Greater, RawTag::GreaterEqual)
    }

    fn equal(&mut self, start: u32) -> RawToken {
        self.with_equal(start, RawTag::Equal, RawTag::EqualEqual)
    }

    fn pipe(&mut self, start: u32) -> RawToken {
        self.doubled(start, b'|', RawTag::Pipe, RawTag::PipePipe)
    }

    fn ampersand(&mut self, start: u32) -> RawToken {
        self.doubled(start, b'&', RawTag::Ampersand, RawTag::AmpersandAmpersand)
    }

    /// `op` or `opop`.
    fn doubled(&mut self, start: u32, byte: u8, single: RawTag, double: RawTag) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == byte {
            self.cursor.advance();
            self.token(start, double)
        } else {
            self.token(start, single)
        }
    }

    // ─── Numeric Literals ────────────────────────────────────────────

    fn number(&mut self, start: u32) -> RawToken {
        self.eat_decimal_digits();
        let mut tag = RawTag::Int;

        // Fraction only when a digit follows the dot (`1.x` is member access).
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.eat_decimal_digits();
            tag = RawTag::Float;
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            tag = if self.cursor.current().is_ascii_digit() {
                RawTag::Float
            } else {
                RawTag::InvalidNumber
            };
            self.eat_decimal_digits();
        }

        // Digits running straight into letters (`12ab`, `0x1F`).
        if is_ident_continue(self.cursor.current()) {
            self.cursor.eat_while(is_ident_continue);
            tag = RawTag::InvalidNumber;
        }
        self.token(start, tag)
    }

    fn eat_decimal_digits(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
    }

    // ─── String & Char Literals ──────────────────────────────────────

    fn string(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume opening '"'
        if self.eat_quoted_body(b'"') {
            self.token(start, RawTag::String)
        } else {
            self.token(start, RawTag::UnterminatedString)
        }
    }

    fn char_literal(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume opening '\''
        if self.cursor.current() == b'\'' {
            // Empty literal `''`: both quotes belong to one bad token.
            self.cursor.advance();
            return self.token(start, RawTag::UnterminatedChar);
        }
        if self.eat_quoted_body(b'\'') {
            self.token(start, RawTag::Char)
        } else {
            self.token(start, RawTag::UnterminatedChar)
        }
    }

    /// Consume through the closing `quote`. Stops in front of a line break or
    /// at end of input and returns `false` there.
    fn eat_quoted_body(&mut self, quote: u8) -> bool {
        loop {
            match self.cursor.skip_to_quote_delim(quote) {
                b'\\' => {
                    self.cursor.advance(); // consume '\'
                    if !matches!(self.cursor.current(), b'\n' | b'\r') && !self.cursor.is_eof() {
                        self.cursor.advance_char();
                    }
                }
                b'\n' | b'\r' => return false,
                0 if self.cursor.is_eof() => return false,
                _ => {
                    // Closing quote.
                    self.cursor.advance();
                    return true;
                }
            }
        }
    }

    // ─── Error tokens ────────────────────────────────────────────────

    fn invalid_char(&mut self, start: u32) -> RawToken {
        self.cursor.advance_char();
        self.token(start, RawTag::InvalidByte)
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// 256-byte lookup table for identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, and underscore. The sentinel maps to `false`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Tokenize a whole string, excluding the final `Eof`.
pub fn tokenize(source: &str, mode: ScanMode) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(source);
    RawScanner::new(buf.cursor(), mode).collect()
}
