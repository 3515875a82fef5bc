//! Loom parser.
//!
//! Error-tolerant recursive descent over a [`loom_lexer::TokenSource`], producing core
//! trees that reproduce their input byte for byte. Malformed input never
//! fails a parse; it is recorded as missing tokens, skipped text and
//! diagnostics inside the tree.
//!
//! - [`parse_text`] lexes and parses a text.
//! - [`parse_tokens`] parses tokens that were lexed elsewhere.
//! - [`reparse`] parses an edited text against the previous tree, reusing
//!   what the edit did not touch.
//!
//! Parses can be cancelled through a [`CancellationToken`], polled between
//! items and statements.

mod cursor;
mod error;
mod grammar;
mod incremental;
mod parser;
mod recovery;
mod tokens;

use std::sync::Once;

use loom_ir::SourceText;
use loom_lexer::{LexMode, Lexer};
use loom_syntax::{EntryPoint, GreenNode, GreenToken, ParseOptions, SyntaxTree};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use error::{ParseError, ReparseError};
pub use incremental::{reparse, reparse_with_cancel, reparse_with_stats, ReparseStats};

use crate::parser::Parser;
use crate::tokens::TokenList;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, or when called again.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Parse `text` from scratch.
#[tracing::instrument(level = "debug", skip_all, fields(entry = ?options.entry))]
pub fn parse_text(text: impl Into<SourceText>, options: ParseOptions) -> SyntaxTree {
    let text = text.into();
    let mut parser = Parser::new(Lexer::new(text.as_str(), LexMode::from(&options)), None);
    parser.parse_entry(options.entry);
    let (green, _) = parser.into_tree();
    debug!(width = green.width(), "parsed");
    SyntaxTree::new(green, text, options)
}

/// [`parse_text`] that gives up once `cancel` is triggered.
#[tracing::instrument(level = "debug", skip_all, fields(entry = ?options.entry))]
pub fn parse_text_with_cancel(
    text: impl Into<SourceText>,
    options: ParseOptions,
    cancel: &CancellationToken,
) -> Result<SyntaxTree, ParseError> {
    let text = text.into();
    let lexer = Lexer::new(text.as_str(), LexMode::from(&options));
    let mut parser = Parser::new(lexer, Some(cancel));
    parser.parse_entry(options.entry);
    let (green, _) = parser.finish()?;
    debug!(width = green.width(), "parsed");
    Ok(SyntaxTree::new(green, text, options))
}

/// Parse an already lexed token stream.
///
/// Tokens are laid end to end; their full texts make up the parsed text. A
/// missing end of file is supplied.
pub fn parse_tokens(tokens: impl IntoIterator<Item = GreenToken>, entry: EntryPoint) -> GreenNode {
    let mut parser = Parser::new(TokenList::new(tokens), None);
    parser.parse_entry(entry);
    parser.into_tree().0
}
