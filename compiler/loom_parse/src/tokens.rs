//! Parsing from an already lexed token stream.

use loom_ir::SyntaxKind;
use loom_lexer::TokenSource;
use loom_syntax::GreenToken;

/// A fixed token list served by position.
///
/// Zero-width tokens other than the end of file cannot be addressed by
/// position and are dropped. The list always ends in exactly one end of
/// file; anything after the first one is ignored.
pub(crate) struct TokenList {
    tokens: Vec<GreenToken>,
    /// Full start of each token in `tokens`.
    starts: Vec<u32>,
}

impl TokenList {
    pub fn new(tokens: impl IntoIterator<Item = GreenToken>) -> Self {
        let mut kept = Vec::new();
        let mut starts = Vec::new();
        let mut pos = 0;
        for token in tokens {
            let is_eof = token.kind() == SyntaxKind::EndOfFile;
            if token.width() == 0 && !is_eof {
                continue;
            }
            starts.push(pos);
            pos += token.width();
            kept.push(token);
            if is_eof {
                break;
            }
        }
        if kept.last().map_or(true, |t| t.kind() != SyntaxKind::EndOfFile) {
            starts.push(pos);
            kept.push(GreenToken::new(SyntaxKind::EndOfFile, ""));
        }
        TokenList {
            tokens: kept,
            starts,
        }
    }

    fn end_of_file(&self) -> GreenToken {
        self.tokens
            .last()
            .cloned()
            .unwrap_or_else(|| GreenToken::new(SyntaxKind::EndOfFile, ""))
    }
}

impl TokenSource for TokenList {
    fn token_at(&mut self, pos: u32) -> GreenToken {
        match self.starts.binary_search(&pos) {
            Ok(index) => self.tokens[index].clone(),
            Err(_) => self.end_of_file(),
        }
    }
}
