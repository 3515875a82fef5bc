//! Core (green) tree.
//!
//! Green elements know their kind, width and children but never their
//! absolute position or their parent. That makes every subtree a value: it
//! can be shared between trees, cached, and reused by the incremental parser
//! at a different offset without being touched.
//!
//! # Layout
//!
//! - [`GreenTrivia`]: one piece of whitespace, comment, directive or skipped text
//! - [`GreenToken`]: leading trivia, text, trailing trivia, plus diagnostics
//! - [`GreenNode`]: children with their relative offsets
//! - [`NodeBuilder`]: bottom-up construction with checkpoints
//!
//! Every element caches [`GreenFlags`] summarizing its subtree so queries like
//! "does this contain diagnostics" never walk the tree.

mod builder;
mod node;
mod token;
mod trivia;

pub use builder::{Checkpoint, NodeBuilder};
pub use node::{GreenChild, GreenElement, GreenNode, GreenNodeData, GreenTokens};
pub use token::{GreenToken, GreenTokenData};
pub use trivia::GreenTrivia;

use bitflags::bitflags;

bitflags! {
    /// Pre-computed subtree facts.
    ///
    /// A parent's flags are the union of its children's, with a child's
    /// `IS_MISSING` turned into `CONTAINS_MISSING`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct GreenFlags: u8 {
        /// This element or a descendant carries diagnostics.
        const CONTAINS_DIAGNOSTICS = 1 << 0;
        /// This element or a descendant carries annotations.
        const CONTAINS_ANNOTATIONS = 1 << 1;
        /// Some trivia in the subtree is skipped text from recovery.
        const CONTAINS_SKIPPED = 1 << 2;
        /// Some token in the subtree was inserted by recovery.
        const CONTAINS_MISSING = 1 << 3;
        /// Some trivia in the subtree is a directive.
        const CONTAINS_DIRECTIVES = 1 << 4;
        /// This token was inserted by recovery and has no text.
        const IS_MISSING = 1 << 5;
    }
}

impl GreenFlags {
    /// Flags a parent inherits from this child.
    #[inline]
    pub(crate) fn inherited(self) -> GreenFlags {
        let mut flags = self - GreenFlags::IS_MISSING;
        if self.contains(GreenFlags::IS_MISSING) {
            flags |= GreenFlags::CONTAINS_MISSING;
        }
        flags
    }
}
