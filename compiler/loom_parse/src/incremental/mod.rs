//! Incremental re-parsing.
//!
//! A re-parse runs the ordinary grammar over the edited text, reading from a
//! [`Blender`] instead of a plain lexer. Outside the affected region the
//! blender hands back old tokens, and at item and statement boundaries whole
//! old subtrees, so the new tree shares everything the edit did not touch.

use loom_ir::{Span, TextChangeRange, TextEdit};
use loom_lexer::{BlendStats, Blender, LexMode};
use loom_syntax::SyntaxTree;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::parser::Parser;
use crate::ReparseError;

/// What a re-parse reused and what it had to redo.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ReparseStats {
    /// Old subtrees taken over as they were.
    pub reused_nodes: usize,
    /// Old tokens taken over outside reused subtrees.
    pub reused_tokens: usize,
    /// Tokens lexed again.
    pub lexed_tokens: usize,
    /// The affected region in new-text coordinates.
    pub affected: Span,
}

impl ReparseStats {
    fn new(blend: BlendStats, affected: Span) -> Self {
        ReparseStats {
            reused_nodes: blend.reused_nodes,
            reused_tokens: blend.reused_tokens,
            lexed_tokens: blend.lexed_tokens,
            affected,
        }
    }
}

/// Re-parse `old` after applying `edits`.
///
/// Edits are in old-text coordinates, ascending and disjoint. The result is
/// the tree a full parse of the new text would produce.
pub fn reparse(old: &SyntaxTree, edits: &[TextEdit]) -> Result<SyntaxTree, ReparseError> {
    reparse_inner(old, edits, None).map(|(tree, _)| tree)
}

/// [`reparse`] that gives up once `cancel` is triggered.
pub fn reparse_with_cancel(
    old: &SyntaxTree,
    edits: &[TextEdit],
    cancel: &CancellationToken,
) -> Result<SyntaxTree, ReparseError> {
    reparse_inner(old, edits, Some(cancel)).map(|(tree, _)| tree)
}

/// [`reparse`], also reporting what was reused.
pub fn reparse_with_stats(
    old: &SyntaxTree,
    edits: &[TextEdit],
) -> Result<(SyntaxTree, ReparseStats), ReparseError> {
    reparse_inner(old, edits, None)
}

#[tracing::instrument(level = "debug", skip_all, fields(edits = edits.len()))]
fn reparse_inner(
    old: &SyntaxTree,
    edits: &[TextEdit],
    cancel: Option<&CancellationToken>,
) -> Result<(SyntaxTree, ReparseStats), ReparseError> {
    let (text, changes) = old.text().with_changes(edits)?;
    let change = match TextChangeRange::collapse(&changes) {
        Some(change) if !change.span.is_empty() || change.new_len > 0 => change,
        _ => {
            debug!("no change, keeping the old tree");
            return Ok((old.clone(), ReparseStats::default()));
        }
    };

    let options = *old.options();
    let blender = Blender::new(old.green(), &change, text.as_str(), LexMode::from(&options));
    let affected = blender.affected();

    let mut parser = Parser::new(blender, cancel);
    parser.parse_entry(options.entry);
    let (green, blender) = parser.finish()?;

    let stats = ReparseStats::new(blender.stats(), affected);
    debug!(
        reused_nodes = stats.reused_nodes,
        reused_tokens = stats.reused_tokens,
        lexed_tokens = stats.lexed_tokens,
        affected_start = affected.start,
        affected_end = affected.end,
        "re-parsed"
    );
    Ok((SyntaxTree::new(green, text, options), stats))
}

#[cfg(test)]
mod tests;
