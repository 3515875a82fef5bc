//! Token cursor over a [`TokenSource`].
//!
//! The cursor tracks the text position of the current token and buffers a
//! few tokens of lookahead. Tokens are requested lazily, so the source only
//! lexes (or blends) what the parser actually looks at.

use loom_ir::SyntaxKind;
use loom_lexer::TokenSource;
use loom_syntax::{GreenNode, GreenToken};
use smallvec::SmallVec;

pub(crate) struct Cursor<S> {
    source: S,
    /// Text position of `lookahead[0]`.
    pos: u32,
    lookahead: SmallVec<[GreenToken; 4]>,
}

impl<S: TokenSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Cursor {
            source,
            pos: 0,
            lookahead: SmallVec::new(),
        }
    }

    /// Text position where the current token's leading trivia starts.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// The token `n` places ahead of the current one.
    pub fn nth_token(&mut self, n: usize) -> &GreenToken {
        while self.lookahead.len() <= n {
            let end = self.pos + self.lookahead.iter().map(|t| t.width()).sum::<u32>();
            if let Some(last) = self.lookahead.last() {
                if last.kind() == SyntaxKind::EndOfFile {
                    // End of file repeats.
                    let eof = last.clone();
                    self.lookahead.push(eof);
                    continue;
                }
            }
            let token = self.source.token_at(end);
            self.lookahead.push(token);
        }
        &self.lookahead[n]
    }

    #[inline]
    pub fn nth(&mut self, n: usize) -> SyntaxKind {
        self.nth_token(n).kind()
    }

    #[inline]
    pub fn current(&mut self) -> SyntaxKind {
        self.nth(0)
    }

    /// Consume the current token.
    pub fn bump(&mut self) -> GreenToken {
        self.nth_token(0);
        let token = self.lookahead.remove(0);
        if token.kind() == SyntaxKind::EndOfFile {
            self.lookahead.clear();
        }
        self.pos += token.width();
        token
    }

    /// Take over an old node starting at the current position, dropping any
    /// buffered lookahead.
    pub fn take_node(&mut self, accept: &dyn Fn(SyntaxKind) -> bool) -> Option<GreenNode> {
        let node = self.source.reusable_node_at(self.pos, accept)?;
        self.lookahead.clear();
        self.pos += node.width();
        Some(node)
    }

    pub fn into_source(self) -> S {
        self.source
    }
}
