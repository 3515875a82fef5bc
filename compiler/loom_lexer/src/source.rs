use loom_ir::SyntaxKind;
use loom_syntax::{GreenNode, GreenToken};

use crate::Lexer;

/// Where a parser gets its tokens from.
///
/// Positions are offsets in the text being parsed, at the start of a token's
/// leading trivia. A full parse reads straight from a [`Lexer`]; a re-parse
/// reads from a [`crate::Blender`], which can also hand back whole subtrees of
/// the previous tree.
pub trait TokenSource {
    /// The token whose leading trivia starts at `pos`.
    fn token_at(&mut self, pos: u32) -> GreenToken;

    /// A finished node starting at `pos` that the parser may take over as is.
    ///
    /// `accept` filters by kind; the parser passes the kinds that are valid
    /// at its current position.
    fn reusable_node_at(
        &mut self,
        pos: u32,
        accept: &dyn Fn(SyntaxKind) -> bool,
    ) -> Option<GreenNode> {
        let _ = (pos, accept);
        None
    }
}

impl TokenSource for Lexer {
    fn token_at(&mut self, pos: u32) -> GreenToken {
        self.lex_at(pos).token
    }
}
