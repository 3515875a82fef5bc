//! Trivia-grouping lexer.
//!
//! [`Lexer::lex_at`] scans one token starting at any character boundary and
//! attaches trivia around it:
//!
//! 1. **Trailing** trivia is the run of same-line whitespace and comments
//!    right after the token text, up to and including the first line break.
//!    Doc comments, directives, conflict markers and byte-order marks never
//!    trail; collection stops in front of them.
//! 2. Everything else before a token is its **leading** trivia. The
//!    end-of-file token owns whatever trivia is left and has no trailing
//!    trivia.
//!
//! Trivia-free, error-free tokens come from [`loom_syntax::cache`].

use loom_diagnostic::Diagnostic;
use loom_ir::SyntaxKind;
use loom_lexer_core::{RawScanner, RawTag, RawToken, ScanMode, SourceBuffer};
use loom_syntax::{cache, GreenToken, GreenTrivia, ParseOptions};

use crate::cooker::{cook_token, cook_trivia, is_trailing_candidate, Cooked};

/// Lexer configuration, derived from [`ParseOptions`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexMode {
    /// Recognize `#name` directives at line start.
    pub directives: bool,
    /// Keep `///` comments as doc comments.
    pub doc_comments: bool,
}

impl Default for LexMode {
    fn default() -> Self {
        LexMode::from(&ParseOptions::default())
    }
}

impl From<&ParseOptions> for LexMode {
    fn from(options: &ParseOptions) -> Self {
        LexMode {
            directives: options.allow_directives,
            doc_comments: options.documentation_comments,
        }
    }
}

/// A token and the offset of its first byte (leading trivia included).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexedToken {
    pub token: GreenToken,
    pub start: u32,
}

impl LexedToken {
    /// Offset just past the token's trailing trivia.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.token.width()
    }
}

/// Random-access lexer over one text.
pub struct Lexer {
    buffer: SourceBuffer,
    mode: LexMode,
}

impl Lexer {
    pub fn new(text: &str, mode: LexMode) -> Self {
        Lexer {
            buffer: SourceBuffer::new(text),
            mode,
        }
    }

    #[inline]
    pub fn mode(&self) -> LexMode {
        self.mode
    }

    /// Length of the text in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn raw_at(&self, pos: u32) -> RawToken {
        let scan = ScanMode {
            directives: self.mode.directives,
        };
        RawScanner::new(self.buffer.cursor_at(pos), scan).next_token()
    }

    fn text(&self, pos: u32, len: u32) -> &str {
        let bytes = self.buffer.as_bytes();
        let range = pos as usize..(pos + len) as usize;
        std::str::from_utf8(bytes.get(range).unwrap_or_default()).unwrap_or_default()
    }

    /// Lex the token whose leading trivia starts at `pos`.
    ///
    /// `pos` must be a character boundary. Always makes progress unless
    /// `pos` is the end of the text, where the zero-width end-of-file token
    /// is produced.
    pub fn lex_at(&self, pos: u32) -> LexedToken {
        let start = pos.min(self.len());
        let mut pos = start;
        let mut diagnostics = Vec::new();

        let mut leading = Vec::new();
        let raw = loop {
            let raw = self.raw_at(pos);
            if !raw.tag.is_trivia() {
                break raw;
            }
            let text = self.text(pos, raw.len);
            let cooked = cook_trivia(raw.tag, text, self.mode);
            push_diagnostic(&mut diagnostics, cooked.diagnostic, pos - start);
            leading.push(GreenTrivia::new(cooked.kind, text));
            pos += raw.len;
        };

        let text = self.text(pos, raw.len);
        let Cooked { kind, diagnostic } = cook_token(raw.tag, text);
        push_diagnostic(&mut diagnostics, diagnostic, pos - start);
        pos += raw.len;

        let mut trailing = Vec::new();
        if raw.tag != RawTag::Eof {
            loop {
                let next = self.raw_at(pos);
                if !next.tag.is_trivia() {
                    break;
                }
                let trivia_text = self.text(pos, next.len);
                let cooked = cook_trivia(next.tag, trivia_text, self.mode);
                if !is_trailing_candidate(cooked.kind) {
                    break;
                }
                push_diagnostic(&mut diagnostics, cooked.diagnostic, pos - start);
                trailing.push(GreenTrivia::new(cooked.kind, trivia_text));
                pos += next.len;
                if cooked.kind == SyntaxKind::EndOfLine {
                    break;
                }
            }
        }

        let token = if leading.is_empty() && trailing.is_empty() && diagnostics.is_empty() {
            cache::token(kind, text)
        } else {
            let token = GreenToken::with_trivia(kind, text, leading, trailing);
            if diagnostics.is_empty() {
                token
            } else {
                token.with_diagnostics(diagnostics)
            }
        };
        LexedToken { token, start }
    }

    /// Every token of the text, ending with the end-of-file token.
    pub fn tokens(&self) -> Vec<GreenToken> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        loop {
            let lexed = self.lex_at(pos);
            let done = lexed.token.kind() == SyntaxKind::EndOfFile;
            pos = lexed.end();
            tokens.push(lexed.token);
            if done {
                return tokens;
            }
        }
    }
}

fn push_diagnostic(out: &mut Vec<Diagnostic>, diagnostic: Option<Diagnostic>, offset: u32) {
    if let Some(diagnostic) = diagnostic {
        out.push(diagnostic.shifted(offset));
    }
}

/// Lex a whole text.
pub fn lex(text: &str, mode: LexMode) -> Vec<GreenToken> {
    Lexer::new(text, mode).tokens()
}
