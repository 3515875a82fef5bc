//! Immutable source text and edits.
//!
//! A [`SourceText`] is a cheaply clonable snapshot. Editing never mutates it:
//! [`SourceText::with_changes`] produces a new snapshot plus the normalized
//! [`TextChangeRange`]s describing what moved, which the incremental
//! re-parser consumes.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::{publish_once, LineCol, LineIndex, Span};

const BOM: char = '\u{FEFF}';

/// Largest text, in bytes, the syntax core accepts. Offsets are `u32`, and
/// the scanner appends up to 64 bytes of padding.
pub const MAX_SOURCE_LEN: u32 = u32::MAX - 64;

fn checked_len(len: usize) -> Result<u32, TextError> {
    u32::try_from(len)
        .ok()
        .filter(|&len| len <= MAX_SOURCE_LEN)
        .ok_or(TextError::TooLarge { len })
}

/// How the text was encoded on disk.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    /// UTF-8 starting with a byte-order mark. The mark stays in the text.
    Utf8WithBom,
}

/// Caller-contract violations on text operations.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TextError {
    #[error("span {span} is out of range for text of length {len}")]
    OutOfRange { span: Span, len: u32 },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: u32 },
    #[error("edits {first} and {second} overlap")]
    OverlappingEdits { first: Span, second: Span },
    #[error("edit {second} comes before edit {first}")]
    UnorderedEdits { first: Span, second: Span },
    #[error("text of {len} bytes exceeds the limit of {} bytes", MAX_SOURCE_LEN)]
    TooLarge { len: usize },
}

/// Replacement of `span` (old text coordinates) with `new_text`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        TextEdit::new(Span::point(at), text)
    }

    pub fn delete(span: Span) -> Self {
        TextEdit::new(span, String::new())
    }

    /// The change this edit describes, without its text.
    pub fn change_range(&self) -> TextChangeRange {
        TextChangeRange::new(self.span, self.new_text.len() as u32)
    }
}

/// An old-text span and the length of what replaced it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextChangeRange {
    pub span: Span,
    pub new_len: u32,
}

impl TextChangeRange {
    #[inline]
    pub const fn new(span: Span, new_len: u32) -> Self {
        TextChangeRange { span, new_len }
    }

    /// Net change in length.
    #[inline]
    pub fn delta(&self) -> i64 {
        i64::from(self.new_len) - i64::from(self.span.len())
    }

    /// The replaced region in new-text coordinates.
    #[inline]
    pub const fn new_span(&self) -> Span {
        Span::at(self.span.start, self.new_len)
    }

    /// Merge ascending, disjoint changes into the single range covering all
    /// of them. `None` for an empty list.
    pub fn collapse(changes: &[TextChangeRange]) -> Option<TextChangeRange> {
        let first = changes.first()?;
        let last = changes.last()?;
        let delta: i64 = changes.iter().map(TextChangeRange::delta).sum();
        let span = Span::new(first.span.start, last.span.end);
        let new_len = i64::from(span.len()) + delta;
        Some(TextChangeRange::new(span, u32::try_from(new_len).unwrap_or(0)))
    }
}

struct TextInner {
    text: Box<str>,
    encoding: Encoding,
    lines: OnceLock<LineIndex>,
}

/// Immutable UTF-8 source text.
///
/// Clones share storage. Positions are byte offsets.
#[derive(Clone)]
pub struct SourceText {
    inner: Arc<TextInner>,
}

impl SourceText {
    /// Wrap `text`.
    ///
    /// # Panics
    ///
    /// If `text` is longer than [`MAX_SOURCE_LEN`]; [`SourceText::try_new`]
    /// reports that as an error instead.
    pub fn new(text: impl Into<String>) -> Self {
        match SourceText::try_new(text) {
            Ok(text) => text,
            Err(error) => panic!("{error}"),
        }
    }

    /// Wrap `text`, rejecting texts longer than [`MAX_SOURCE_LEN`].
    pub fn try_new(text: impl Into<String>) -> Result<Self, TextError> {
        let text: String = text.into();
        checked_len(text.len())?;
        Ok(SourceText::new_unchecked(text))
    }

    fn new_unchecked(text: String) -> Self {
        let encoding = if text.starts_with(BOM) {
            Encoding::Utf8WithBom
        } else {
            Encoding::Utf8
        };
        SourceText {
            inner: Arc::new(TextInner {
                text: text.into_boxed_str(),
                encoding,
                lines: OnceLock::new(),
            }),
        }
    }

    /// Decode raw bytes. Invalid or truncated sequences become U+FFFD, so
    /// every byte input produces a text.
    pub fn from_utf8_lossy(bytes: &[u8]) -> Self {
        SourceText::new(String::from_utf8_lossy(bytes).into_owned())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner.text
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.inner.text.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.text.is_empty()
    }

    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.inner.encoding
    }

    /// Whether two handles share the same storage.
    pub fn ptr_eq(&self, other: &SourceText) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Check that `span` is inside the text and on character boundaries.
    pub fn check_span(&self, span: Span) -> Result<(), TextError> {
        let text = self.as_str();
        if span.start > span.end || span.end as usize > text.len() {
            return Err(TextError::OutOfRange {
                span,
                len: self.len(),
            });
        }
        for offset in [span.start, span.end] {
            if !text.is_char_boundary(offset as usize) {
                return Err(TextError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }

    pub fn slice(&self, span: Span) -> Result<&str, TextError> {
        self.check_span(span)?;
        Ok(&self.as_str()[span.to_range()])
    }

    /// Line table, built on first use and shared by all clones.
    pub fn line_index(&self) -> &LineIndex {
        publish_once(&self.inner.lines, || LineIndex::new(&self.inner.text))
    }

    pub fn line_col(&self, offset: u32) -> Result<LineCol, TextError> {
        self.line_index()
            .line_col(offset)
            .ok_or(TextError::OutOfRange {
                span: Span::point(offset),
                len: self.len(),
            })
    }

    /// Apply `edits` and return the new text with the change ranges.
    ///
    /// Edits are in old-text coordinates and must be ascending and disjoint.
    /// Insertions at the same offset are applied in the given order.
    pub fn with_changes(
        &self,
        edits: &[TextEdit],
    ) -> Result<(SourceText, Vec<TextChangeRange>), TextError> {
        let mut prev: Option<Span> = None;
        for edit in edits {
            self.check_span(edit.span)?;
            if let Some(first) = prev {
                if edit.span.start < first.start {
                    return Err(TextError::UnorderedEdits {
                        first,
                        second: edit.span,
                    });
                }
                if edit.span.start < first.end {
                    return Err(TextError::OverlappingEdits {
                        first,
                        second: edit.span,
                    });
                }
            }
            prev = Some(edit.span);
        }

        let old = self.as_str();
        let removed: usize = edits.iter().map(|e| e.span.len() as usize).sum();
        let added: usize = edits.iter().map(|e| e.new_text.len()).sum();
        let new_len = old.len() - removed + added;
        checked_len(new_len)?;

        let mut out = String::with_capacity(new_len);
        let mut cursor = 0usize;
        for edit in edits {
            out.push_str(&old[cursor..edit.span.start as usize]);
            out.push_str(&edit.new_text);
            cursor = edit.span.end as usize;
        }
        out.push_str(&old[cursor..]);

        let changes = edits.iter().map(TextEdit::change_range).collect();
        Ok((SourceText::new_unchecked(out), changes))
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        SourceText::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        SourceText::new(text)
    }
}

impl PartialEq for SourceText {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_str() == other.as_str()
    }
}

impl Eq for SourceText {}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceText")
            .field("len", &self.len())
            .field("encoding", &self.inner.encoding)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
