//! Loom IR - shared foundation types for the syntax core.
//!
//! This crate contains the data every other Loom crate agrees on:
//! - [`Span`] byte ranges
//! - [`SourceText`], the immutable versioned text buffer, and its edit types
//! - [`ChangeMarker`], the affected region of an incremental edit
//! - [`SyntaxKind`], the single kind space for tokens, trivia and nodes
//! - [`publish_once`], idempotent lazy initialization for derived data
//!
//! All offsets are UTF-8 byte offsets stored as `u32`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod incremental;
mod kind;
mod lazy;
mod line_index;
mod span;
mod text;

pub use incremental::ChangeMarker;
pub use kind::SyntaxKind;
pub use lazy::publish_once;
pub use line_index::{LineCol, LineIndex};
pub use span::Span;
pub use text::{Encoding, SourceText, TextChangeRange, TextEdit, TextError, MAX_SOURCE_LEN};
