//! Incremental parsing support.
//!
//! A [`ChangeMarker`] describes the *affected region* of an edit: the part of
//! the old text that must be re-lexed and re-parsed. It is derived from the
//! collapsed [`TextChangeRange`] widened to token boundaries of the old tree:
//!
//! - backward to the start of the token before the token containing the
//!   change start, so a token that might merge with the edited text is redone
//! - forward to the end of the token containing the change end
//!
//! Everything outside the region maps between old and new text by a constant
//! shift of `delta` bytes.

use crate::{Span, TextChangeRange};

/// Affected region of an edit in old-text coordinates, plus the shift that
/// maps positions after it into the new text.
///
/// # Examples
///
/// ```
/// use loom_ir::incremental::ChangeMarker;
/// use loom_ir::{Span, TextChangeRange};
///
/// // "int x = 1;" -> "int x = 42;", widened to the tokens `=` .. `1`.
/// let change = TextChangeRange::new(Span::new(8, 9), 2);
/// let marker = ChangeMarker::from_change(&change, 6, 9);
///
/// assert_eq!(marker.old_position(3), Some(3));
/// assert_eq!(marker.old_position(11), Some(10));
/// assert_eq!(marker.old_position(8), None);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChangeMarker {
    /// Start of the affected region (at or before the change start).
    pub affected_start: u32,
    /// End of the affected region in the old text (at or after the change end).
    pub affected_end: u32,
    /// Position adjustment for everything after the affected region.
    pub delta: i64,
}

impl ChangeMarker {
    /// Create a marker from a collapsed change and the token-aligned bounds
    /// of the region around it.
    #[inline]
    pub fn from_change(change: &TextChangeRange, region_start: u32, region_end: u32) -> Self {
        ChangeMarker {
            affected_start: region_start.min(change.span.start),
            affected_end: region_end.max(change.span.end),
            delta: change.delta(),
        }
    }

    /// Create a marker directly from affected region and delta.
    #[inline]
    pub const fn new(affected_start: u32, affected_end: u32, delta: i64) -> Self {
        ChangeMarker {
            affected_start,
            affected_end,
            delta,
        }
    }

    /// The affected region in the old text.
    #[inline]
    pub const fn old_span(&self) -> Span {
        Span::new(self.affected_start, self.affected_end)
    }

    /// The affected region in the new text.
    #[inline]
    pub fn new_span(&self) -> Span {
        Span::new(self.affected_start, self.shift(self.affected_end))
    }

    /// Check if an old-text span intersects the affected region.
    #[inline]
    pub fn intersects(&self, span: Span) -> bool {
        self.affected_start < span.end && span.start < self.affected_end
    }

    /// Check if an old-text span ends at or before the affected region.
    #[inline]
    pub fn is_before(&self, span: Span) -> bool {
        span.end <= self.affected_start
    }

    /// Check if an old-text span starts at or after the affected region.
    #[inline]
    pub fn is_after(&self, span: Span) -> bool {
        span.start >= self.affected_end
    }

    /// Whether an old subtree covering `span` may be reused as a whole.
    ///
    /// Subtrees before the region must end strictly before it: the parser
    /// looked one token past the subtree's end when it built it, and that
    /// token may be the first one re-lexed.
    #[inline]
    pub fn is_reusable_node(&self, span: Span) -> bool {
        span.end < self.affected_start || self.is_after(span)
    }

    /// Map an old position outside the affected region to the new text.
    ///
    /// Positions inside the region have no counterpart and are returned
    /// unchanged; callers check [`ChangeMarker::intersects`] first.
    #[inline]
    pub fn adjust_position(&self, pos: u32) -> u32 {
        if pos < self.affected_end {
            pos
        } else {
            self.shift(pos)
        }
    }

    /// Map an old span to the new text, or `None` if it must be redone.
    #[inline]
    pub fn adjust_span(&self, span: Span) -> Option<Span> {
        if self.intersects(span) {
            None
        } else {
            Some(Span::new(
                self.adjust_position(span.start),
                self.adjust_position(span.end),
            ))
        }
    }

    /// Map a new-text position back to the old text, or `None` inside the
    /// affected region.
    pub fn old_position(&self, new_pos: u32) -> Option<u32> {
        if new_pos < self.affected_start {
            return Some(new_pos);
        }
        let new_end = self.shift(self.affected_end);
        if new_pos < new_end {
            return None;
        }
        u32::try_from(i64::from(new_pos) - self.delta).ok()
    }

    #[allow(
        clippy::cast_sign_loss,
        reason = "old positions past the region stay non-negative after the shift"
    )]
    fn shift(&self, pos: u32) -> u32 {
        (i64::from(pos) + self.delta).max(0) as u32
    }
}
