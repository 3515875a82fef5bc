//! Incremental token blending.
//!
//! After an edit, most of the new text is identical to the old text up to a
//! constant shift. The [`Blender`] serves tokens for the new text by mapping
//! each position back to the old tree: outside the affected region an old
//! token starting at the mapped position is handed out unchanged, and only
//! inside the region is the new text lexed again.
//!
//! The affected region is the collapsed change widened to token bounds:
//! back to the start of the token before the one containing the change
//! start, forward to the end of the token containing the change end.

use loom_ir::{ChangeMarker, Span, SyntaxKind, TextChangeRange};
use loom_syntax::{GreenFlags, GreenNode, GreenToken, SyntaxNode, SyntaxToken};
use tracing::trace;

use crate::{LexMode, Lexer, TokenSource};

/// Counts of what a [`Blender`] handed out.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BlendStats {
    pub reused_nodes: usize,
    pub reused_tokens: usize,
    pub lexed_tokens: usize,
}

/// Token source for re-parsing an edited text against its previous tree.
pub struct Blender {
    lexer: Lexer,
    old_root: SyntaxNode,
    marker: ChangeMarker,
    /// Last old token looked up, for sequential access.
    last: Option<SyntaxToken>,
    stats: BlendStats,
}

impl Blender {
    /// `change` is the collapsed change from `old_root`'s text to `new_text`.
    pub fn new(
        old_root: &GreenNode,
        change: &TextChangeRange,
        new_text: &str,
        mode: LexMode,
    ) -> Self {
        let old_root = SyntaxNode::new_root(old_root.clone());
        let (start, end) = affected_region(&old_root, change);
        let marker = ChangeMarker::from_change(change, start, end);
        trace!(
            affected_start = marker.affected_start,
            affected_end = marker.affected_end,
            delta = marker.delta,
            "blender affected region"
        );
        Blender {
            lexer: Lexer::new(new_text, mode),
            old_root,
            marker,
            last: None,
            stats: BlendStats::default(),
        }
    }

    #[inline]
    pub fn marker(&self) -> &ChangeMarker {
        &self.marker
    }

    /// The affected region in new-text coordinates.
    pub fn affected(&self) -> Span {
        self.marker.new_span()
    }

    #[inline]
    pub fn stats(&self) -> BlendStats {
        self.stats
    }

    /// The old token whose full span starts at `old_pos`.
    fn old_token_at(&mut self, old_pos: u32) -> Option<SyntaxToken> {
        let sequential = self
            .last
            .as_ref()
            .filter(|last| last.full_span().end == old_pos)
            .and_then(next_non_empty);
        let token = match sequential {
            Some(token) => token,
            None => self.old_root.find_token(old_pos).ok()?,
        };
        let found = (token.full_span().start == old_pos).then_some(token);
        self.last.clone_from(&found);
        found
    }

    fn reusable_old_token(&mut self, pos: u32) -> Option<GreenToken> {
        let old_pos = self.marker.old_position(pos)?;
        let token = self.old_token_at(old_pos)?;
        let green = token.green();
        let reusable = green.is_reusable()
            && !green.flags().contains(GreenFlags::CONTAINS_DIRECTIVES)
            && self.marker.is_reusable_node(token.full_span());
        reusable.then(|| green.clone())
    }
}

impl TokenSource for Blender {
    fn token_at(&mut self, pos: u32) -> GreenToken {
        if let Some(token) = self.reusable_old_token(pos) {
            self.stats.reused_tokens += 1;
            return token;
        }
        self.stats.lexed_tokens += 1;
        self.lexer.lex_at(pos).token
    }

    fn reusable_node_at(
        &mut self,
        pos: u32,
        accept: &dyn Fn(SyntaxKind) -> bool,
    ) -> Option<GreenNode> {
        let old_pos = self.marker.old_position(pos)?;
        let token = self.old_token_at(old_pos)?;
        let mut best = None;
        let mut node = Some(token.parent().clone());
        while let Some(current) = node {
            if current.full_span().start != old_pos {
                break;
            }
            if accept(current.kind()) && self.is_reusable_node(&current) {
                best = Some(current.clone());
            }
            node = current.parent();
        }
        let best = best?;
        trace!(kind = ?best.kind(), old_pos, pos, "reusing node");
        self.stats.reused_nodes += 1;
        Some(best.green().clone())
    }
}

impl Blender {
    fn is_reusable_node(&self, node: &SyntaxNode) -> bool {
        let green = node.green();
        let tainted = GreenFlags::CONTAINS_DIAGNOSTICS
            | GreenFlags::CONTAINS_MISSING
            | GreenFlags::CONTAINS_SKIPPED
            | GreenFlags::CONTAINS_DIRECTIVES;
        green.width() > 0
            && !green.flags().intersects(tainted)
            && self.marker.is_reusable_node(node.full_span())
    }
}

fn next_non_empty(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut next = token.next_token()?;
    while next.full_span().is_empty() {
        next = next.next_token()?;
    }
    Some(next)
}

fn prev_non_empty(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut prev = token.prev_token()?;
    while prev.full_span().is_empty() {
        prev = prev.prev_token()?;
    }
    Some(prev)
}

/// Old-text bounds of the region that must be lexed again.
fn affected_region(root: &SyntaxNode, change: &TextChangeRange) -> (u32, u32) {
    let start = match root.find_token(change.span.start) {
        Ok(token) => prev_non_empty(&token)
            .unwrap_or(token)
            .full_span()
            .start,
        Err(_) => 0,
    };
    let end = root
        .find_token(change.span.end)
        .map_or(root.full_span().end, |token| token.full_span().end);
    (start, end)
}
