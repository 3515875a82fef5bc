use std::fmt;
use std::sync::Arc;

use loom_ir::SyntaxKind;

/// One piece of trivia: whitespace, a line break, a comment, a directive,
/// a conflict marker, a byte-order mark, or text skipped by recovery.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct GreenTrivia {
    kind: SyntaxKind,
    text: Arc<str>,
}

impl GreenTrivia {
    /// Create a trivia piece. `kind` must be a trivia kind.
    pub fn new(kind: SyntaxKind, text: impl Into<Arc<str>>) -> Self {
        debug_assert!(kind.is_trivia(), "{kind:?} is not a trivia kind");
        GreenTrivia {
            kind,
            text: text.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.text.len() as u32
    }
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind, self.text())
    }
}
