//! Loom syntax trees.
//!
//! Two layers over the same data:
//!
//! - the **core** tree ([`GreenNode`], [`GreenToken`], [`GreenTrivia`]):
//!   immutable, position-free, and shared between trees. Incremental parsing
//!   reuses unchanged core subtrees as they are.
//! - the **facade** ([`SyntaxNode`], [`SyntaxToken`]): built lazily on top of
//!   a core root, adding absolute offsets and parent links for navigation.
//!
//! A [`SyntaxTree`] ties a core root to its text and [`ParseOptions`].
//! Updates are functional: see [`edit`].

mod annotation;
#[cfg(test)]
mod fixture;
pub mod cache;
pub mod edit;
mod green;
#[cfg(feature = "persist")]
pub mod persist;
mod red;
mod tree;

pub use annotation::SyntaxAnnotation;
pub use edit::EditError;
pub use green::{
    Checkpoint, GreenChild, GreenElement, GreenFlags, GreenNode, GreenNodeData, GreenToken,
    GreenTokenData, GreenTokens, GreenTrivia, NodeBuilder,
};
pub use red::{
    Descendants, SyntaxElement, SyntaxElementChildren, SyntaxNode, SyntaxNodeChildren,
    SyntaxToken, SyntaxTokens,
};
pub use tree::{EntryPoint, ParseOptions, SyntaxTree};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{GreenChild, SyntaxToken};
    // Parent handle (8) + index (4) + offset (4) + green handle (8)
    loom_ir::static_assert_size!(SyntaxToken, 24);
    // Offset (4) + padding, then the element enum (16)
    loom_ir::static_assert_size!(GreenChild, 24);
}
