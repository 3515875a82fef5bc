//! Token cooking.
//!
//! Maps raw scanner tags to [`SyntaxKind`]s, resolves keywords, and turns
//! malformed input into diagnostics:
//!
//! ```text
//! source → RawScanner → (RawTag, len) → cook_token / cook_trivia → SyntaxKind
//! ```
//!
//! Cooking never fails. Diagnostics are returned with offset zero, relative
//! to the cooked piece; the lexer shifts them into the owning token.

use loom_diagnostic::{Diagnostic, ErrorCode};
use loom_ir::SyntaxKind;
use loom_lexer_core::RawTag;

use crate::LexMode;

/// Directive names that need no diagnostic.
const KNOWN_DIRECTIVES: [&str; 7] = [
    "region",
    "endregion",
    "pragma",
    "line",
    "nullable",
    "warning",
    "error",
];

/// A cooked piece: its kind and, for malformed input, a diagnostic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Cooked {
    pub kind: SyntaxKind,
    pub diagnostic: Option<Diagnostic>,
}

impl Cooked {
    fn plain(kind: SyntaxKind) -> Self {
        Cooked {
            kind,
            diagnostic: None,
        }
    }

    fn error(kind: SyntaxKind, diagnostic: Diagnostic) -> Self {
        Cooked {
            kind,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Cook a non-trivia raw token whose source text is `text`.
pub(crate) fn cook_token(tag: RawTag, text: &str) -> Cooked {
    let width = text.len() as u32;
    match tag {
        RawTag::Ident => Cooked::plain(SyntaxKind::keyword(text).unwrap_or(SyntaxKind::Identifier)),
        RawTag::Int => Cooked::plain(SyntaxKind::IntLiteral),
        RawTag::Float => Cooked::plain(SyntaxKind::FloatLiteral),
        RawTag::String => Cooked::plain(SyntaxKind::StringLiteral),
        RawTag::Char => Cooked::plain(SyntaxKind::CharLiteral),

        RawTag::Plus => Cooked::plain(SyntaxKind::Plus),
        RawTag::Minus => Cooked::plain(SyntaxKind::Minus),
        RawTag::Star => Cooked::plain(SyntaxKind::Star),
        RawTag::Slash => Cooked::plain(SyntaxKind::Slash),
        RawTag::Percent => Cooked::plain(SyntaxKind::Percent),
        RawTag::Bang => Cooked::plain(SyntaxKind::Bang),
        RawTag::Tilde => Cooked::plain(SyntaxKind::Tilde),
        RawTag::Ampersand => Cooked::plain(SyntaxKind::Amp),
        RawTag::Pipe => Cooked::plain(SyntaxKind::Pipe),
        RawTag::Caret => Cooked::plain(SyntaxKind::Caret),
        RawTag::Equal => Cooked::plain(SyntaxKind::Eq),
        RawTag::EqualEqual => Cooked::plain(SyntaxKind::EqEq),
        RawTag::BangEqual => Cooked::plain(SyntaxKind::BangEq),
        RawTag::Less => Cooked::plain(SyntaxKind::Less),
        RawTag::LessEqual => Cooked::plain(SyntaxKind::LessEq),
        RawTag::Greater => Cooked::plain(SyntaxKind::Greater),
        RawTag::GreaterEqual => Cooked::plain(SyntaxKind::GreaterEq),
        RawTag::AmpersandAmpersand => Cooked::plain(SyntaxKind::AmpAmp),
        RawTag::PipePipe => Cooked::plain(SyntaxKind::PipePipe),
        RawTag::PlusEqual => Cooked::plain(SyntaxKind::PlusEq),
        RawTag::MinusEqual => Cooked::plain(SyntaxKind::MinusEq),
        RawTag::StarEqual => Cooked::plain(SyntaxKind::StarEq),
        RawTag::SlashEqual => Cooked::plain(SyntaxKind::SlashEq),
        RawTag::Arrow => Cooked::plain(SyntaxKind::Arrow),
        RawTag::Dot => Cooked::plain(SyntaxKind::Dot),
        RawTag::Question => Cooked::plain(SyntaxKind::Question),
        RawTag::Colon => Cooked::plain(SyntaxKind::Colon),
        RawTag::Comma => Cooked::plain(SyntaxKind::Comma),
        RawTag::Semicolon => Cooked::plain(SyntaxKind::Semicolon),
        RawTag::LeftParen => Cooked::plain(SyntaxKind::OpenParen),
        RawTag::RightParen => Cooked::plain(SyntaxKind::CloseParen),
        RawTag::LeftBrace => Cooked::plain(SyntaxKind::OpenBrace),
        RawTag::RightBrace => Cooked::plain(SyntaxKind::CloseBrace),
        RawTag::LeftBracket => Cooked::plain(SyntaxKind::OpenBracket),
        RawTag::RightBracket => Cooked::plain(SyntaxKind::CloseBracket),

        RawTag::UnterminatedString => Cooked::error(
            SyntaxKind::StringLiteral,
            Diagnostic::error(ErrorCode::E0001, 0, width),
        ),
        RawTag::UnterminatedChar => Cooked::error(
            SyntaxKind::CharLiteral,
            Diagnostic::error(ErrorCode::E0004, 0, width),
        ),
        RawTag::InvalidNumber => {
            let kind = if text.contains(['.', 'e', 'E']) {
                SyntaxKind::FloatLiteral
            } else {
                SyntaxKind::IntLiteral
            };
            Cooked::error(
                kind,
                Diagnostic::error(ErrorCode::E0003, 0, width).with_arg(text),
            )
        }
        RawTag::InteriorNull => Cooked::error(
            SyntaxKind::BadToken,
            Diagnostic::error(ErrorCode::E0007, 0, width),
        ),
        RawTag::Eof => Cooked::plain(SyntaxKind::EndOfFile),
        // Invalid characters, and trivia tags that reach here by mistake.
        _ => Cooked::error(
            SyntaxKind::BadToken,
            Diagnostic::error(ErrorCode::E0002, 0, width).with_arg(format!("{text:?}")),
        ),
    }
}

/// Cook a trivia raw token whose source text is `text`.
pub(crate) fn cook_trivia(tag: RawTag, text: &str, mode: LexMode) -> Cooked {
    let width = text.len() as u32;
    match tag {
        RawTag::Whitespace => Cooked::plain(SyntaxKind::Whitespace),
        RawTag::Newline => Cooked::plain(SyntaxKind::EndOfLine),
        RawTag::LineComment => Cooked::plain(SyntaxKind::LineComment),
        RawTag::DocComment if mode.doc_comments => Cooked::plain(SyntaxKind::DocComment),
        RawTag::DocComment => Cooked::plain(SyntaxKind::LineComment),
        RawTag::BlockComment => Cooked::plain(SyntaxKind::BlockComment),
        RawTag::UnterminatedBlockComment => Cooked::error(
            SyntaxKind::BlockComment,
            Diagnostic::error(ErrorCode::E0005, 0, width),
        ),
        RawTag::Directive => match directive_name(text) {
            name if KNOWN_DIRECTIVES.contains(&name) => Cooked::plain(SyntaxKind::Directive),
            name => Cooked::error(
                SyntaxKind::Directive,
                Diagnostic::error(ErrorCode::E0008, 0, width).with_arg(name),
            ),
        },
        RawTag::ConflictMarker => Cooked::error(
            SyntaxKind::ConflictMarker,
            Diagnostic::error(ErrorCode::E0006, 0, width),
        ),
        RawTag::ByteOrderMark => Cooked::plain(SyntaxKind::ByteOrderMark),
        _ => Cooked::error(
            SyntaxKind::SkippedText,
            Diagnostic::error(ErrorCode::E0002, 0, width).with_arg(format!("{text:?}")),
        ),
    }
}

/// Name of a `#name ...` directive; whitespace after `#` is allowed.
fn directive_name(text: &str) -> &str {
    let rest = text.trim_start_matches('#').trim_start_matches([' ', '\t']);
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Trivia that may follow a token on its line.
pub(crate) fn is_trailing_candidate(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Whitespace
            | SyntaxKind::EndOfLine
            | SyntaxKind::LineComment
            | SyntaxKind::BlockComment
    )
}
