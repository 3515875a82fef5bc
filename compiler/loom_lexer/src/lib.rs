//! Loom lexer.
//!
//! Sits on top of [`loom_lexer_core`]'s raw scanner and produces green
//! tokens with their trivia attached:
//!
//! - [`Lexer`] lexes a text from any character boundary.
//! - [`Blender`] serves tokens (and whole subtrees) for an edited text,
//!   reusing the previous tree outside the edited region.
//! - [`TokenSource`] is what the parser reads from; both implement it.

mod blender;
mod cooker;
mod lexer;
mod source;

pub use blender::{BlendStats, Blender};
pub use lexer::{lex, LexMode, LexedToken, Lexer};
pub use source::TokenSource;
