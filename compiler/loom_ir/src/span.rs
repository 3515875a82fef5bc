//! Source location spans.
//!
//! Compact 8-byte byte range used for old/new text regions, facade spans
//! and positioned diagnostics.

use std::fmt;

/// Half-open byte range `[start, end)` in a source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Empty span at offset zero.
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a span from a start offset and a length.
    #[inline]
    pub const fn at(start: u32, len: u32) -> Self {
        Span {
            start,
            end: start + len,
        }
    }

    /// Zero-length span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Width in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// `true` for zero-length spans.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `start <= offset < end`. An empty span contains nothing.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// `other` lies inside `self`; equal spans and empty spans at either
    /// end count.
    #[inline]
    pub fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Two ranges `[a, b)` and `[c, d)` intersect iff `a < d && c < b`.
    ///
    /// An empty span touching the interior of the other counts as
    /// intersecting; spans that only share an endpoint do not.
    #[inline]
    pub fn intersects(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest span covering both.
    #[inline]
    #[must_use]
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Shift both ends by `delta` bytes.
    #[inline]
    #[must_use]
    pub const fn shifted(self, delta: u32) -> Span {
        Span {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Byte range for slicing a `str`.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<std::ops::Range<u32>> for Span {
    fn from(range: std::ops::Range<u32>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}
