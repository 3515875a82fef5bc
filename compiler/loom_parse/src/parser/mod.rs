//! Parser state and the primitives the grammar is written in.
//!
//! The parser pulls tokens through a [`Cursor`] and emits them into a
//! [`NodeBuilder`]; grammar functions bracket what they consume with
//! `start_node`/`finish_node` or wrap it afterwards via checkpoints.
//!
//! Recovery never fails a parse:
//!
//! - [`Parser::expect`] inserts a zero-width missing token with a diagnostic
//!   when the expected kind is not there.
//! - [`Parser::skip`] consumes a token the grammar has no place for. It is
//!   turned into skipped-text trivia and attached to the next real token,
//!   together with an "unexpected" diagnostic.

use loom_diagnostic::{Diagnostic, ErrorCode};
use loom_ir::SyntaxKind;
use loom_lexer::TokenSource;
use loom_syntax::{Checkpoint, GreenNode, GreenToken, GreenTrivia, NodeBuilder};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::cursor::Cursor;
use crate::ParseError;

pub(crate) struct Parser<'c, S> {
    cursor: Cursor<S>,
    builder: NodeBuilder,
    /// Skipped tokens waiting for the next real token.
    skipped: Vec<GreenTrivia>,
    /// Diagnostics for `skipped`, relative to its start.
    skipped_diagnostics: Vec<Diagnostic>,
    skipped_width: u32,
    cancel: Option<&'c CancellationToken>,
    cancelled: bool,
}

impl<'c, S: TokenSource> Parser<'c, S> {
    pub fn new(source: S, cancel: Option<&'c CancellationToken>) -> Self {
        Parser {
            cursor: Cursor::new(source),
            builder: NodeBuilder::new(),
            skipped: Vec::new(),
            skipped_diagnostics: Vec::new(),
            skipped_width: 0,
            cancel,
            cancelled: false,
        }
    }

    /// Close the tree, or report that the parse was cancelled part way.
    pub fn finish(self) -> Result<(GreenNode, S), ParseError> {
        if self.cancelled {
            return Err(ParseError::Cancelled);
        }
        Ok(self.into_tree())
    }

    /// Close the tree. Only for parses without a cancellation token.
    pub fn into_tree(self) -> (GreenNode, S) {
        debug_assert!(!self.cancelled, "tree of a cancelled parse");
        (self.builder.finish(), self.cursor.into_source())
    }

    // ─── Lookahead ───────────────────────────────────────────────────

    #[inline]
    pub fn current(&mut self) -> SyntaxKind {
        self.cursor.current()
    }

    #[inline]
    pub fn nth(&mut self, n: usize) -> SyntaxKind {
        self.cursor.nth(n)
    }

    #[inline]
    pub fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    #[inline]
    pub fn position(&self) -> u32 {
        self.cursor.position()
    }

    /// Polled between items and statements. Once set it stays set, and every
    /// list loop unwinds.
    pub fn is_cancelled(&mut self) -> bool {
        if !self.cancelled && self.cancel.is_some_and(CancellationToken::is_cancelled) {
            trace!(pos = self.position(), "parse cancelled");
            self.cancelled = true;
        }
        self.cancelled
    }

    // ─── Tree building ───────────────────────────────────────────────

    #[inline]
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind);
    }

    #[inline]
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind);
    }

    #[inline]
    pub fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    // ─── Consuming ───────────────────────────────────────────────────

    /// Consume the current token into the tree.
    pub fn bump(&mut self) {
        let mut token = self.cursor.bump();
        if !self.skipped.is_empty() {
            let trivia = std::mem::take(&mut self.skipped);
            let diagnostics = std::mem::take(&mut self.skipped_diagnostics);
            self.skipped_width = 0;
            token = token.prepend_leading(trivia, diagnostics);
        }
        self.builder.token(token);
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, or insert it as missing with "expected" diagnostic.
    pub fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let diagnostic = Diagnostic::error(ErrorCode::E1001, 0, 0).with_arg(kind.describe());
        self.missing(kind, diagnostic);
        false
    }

    /// Insert a zero-width missing token carrying `diagnostic`.
    pub fn missing(&mut self, kind: SyntaxKind, diagnostic: Diagnostic) {
        let token = GreenToken::missing(kind).with_diagnostics(vec![diagnostic]);
        self.builder.token(token);
    }

    /// Consume the current token as skipped text.
    ///
    /// The token's own trivia stays as it was around a `SkippedText` piece
    /// holding its text. Invalid tokens already carry a lexical diagnostic
    /// and get no second one.
    pub fn skip(&mut self) {
        let token = self.cursor.bump();
        debug_assert!(token.kind() != SyntaxKind::EndOfFile, "skipping end of file");
        let base = self.skipped_width;
        self.skipped_diagnostics
            .extend(token.diagnostics().iter().cloned().map(|d| d.shifted(base)));
        if token.kind() != SyntaxKind::BadToken {
            let offset = base + token.leading_width();
            let width = token.text().len() as u32;
            let diagnostic = Diagnostic::error(ErrorCode::E1003, offset, width)
                .with_arg(token.kind().describe());
            self.skipped_diagnostics.push(diagnostic);
        }
        self.skipped.extend(token.leading_trivia().iter().cloned());
        if !token.text().is_empty() {
            self.skipped
                .push(GreenTrivia::new(SyntaxKind::SkippedText, token.text()));
        }
        self.skipped.extend(token.trailing_trivia().iter().cloned());
        self.skipped_width += token.width();
        trace!(kind = ?token.kind(), pos = self.position(), "skipped token");
    }

    /// Reuse an old node at the current position, if the source offers one.
    ///
    /// Never reuses while skipped text is pending: it belongs in front of
    /// the next token, which would be inside the reused node.
    pub fn reuse(&mut self, accept: &dyn Fn(SyntaxKind) -> bool) -> bool {
        if !self.skipped.is_empty() {
            return false;
        }
        match self.cursor.take_node(accept) {
            Some(node) => {
                self.builder.node(node);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests;
