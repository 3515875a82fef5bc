use std::fmt;
use std::hash::{Hash, Hasher};

use loom_diagnostic::PositionedDiagnostic;
use loom_ir::{Span, SyntaxKind};

use super::{SyntaxElement, SyntaxNode};
use crate::{GreenToken, GreenTrivia};

/// A token of the facade tree.
#[derive(Clone)]
pub struct SyntaxToken {
    parent: SyntaxNode,
    index: u32,
    offset: u32,
    green: GreenToken,
}

impl SyntaxToken {
    pub(super) fn new(green: GreenToken, parent: SyntaxNode, index: usize, offset: u32) -> Self {
        SyntaxToken {
            parent,
            index: index as u32,
            offset,
            green,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    #[inline]
    pub fn parent(&self) -> &SyntaxNode {
        &self.parent
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// The token text, without trivia.
    #[inline]
    pub fn text(&self) -> &str {
        self.green.text()
    }

    pub fn full_text(&self) -> String {
        self.green.full_text()
    }

    #[inline]
    pub fn leading_trivia(&self) -> &[GreenTrivia] {
        self.green.leading_trivia()
    }

    #[inline]
    pub fn trailing_trivia(&self) -> &[GreenTrivia] {
        self.green.trailing_trivia()
    }

    /// Span of the text alone.
    #[inline]
    pub fn span(&self) -> Span {
        Span::at(
            self.offset + self.green.leading_width(),
            self.green.text().len() as u32,
        )
    }

    #[inline]
    pub fn full_span(&self) -> Span {
        Span::at(self.offset, self.green.width())
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn diagnostics(&self) -> Vec<PositionedDiagnostic> {
        self.green
            .diagnostics()
            .iter()
            .map(|d| d.positioned(self.offset))
            .collect()
    }

    /// The next token in source order, crossing node boundaries.
    pub fn next_token(&self) -> Option<SyntaxToken> {
        let mut parent = self.parent.clone();
        let mut index = self.index();
        loop {
            let count = parent.green().children().len();
            for i in index + 1..count {
                match parent.child(i)? {
                    SyntaxElement::Token(token) => return Some(token),
                    SyntaxElement::Node(node) => {
                        if let Some(token) = node.first_token() {
                            return Some(token);
                        }
                    }
                }
            }
            index = parent.index();
            parent = parent.parent()?;
        }
    }

    /// The previous token in source order, crossing node boundaries.
    pub fn prev_token(&self) -> Option<SyntaxToken> {
        let mut parent = self.parent.clone();
        let mut index = self.index();
        loop {
            for i in (0..index).rev() {
                match parent.child(i)? {
                    SyntaxElement::Token(token) => return Some(token),
                    SyntaxElement::Node(node) => {
                        if let Some(token) = node.last_token() {
                            return Some(token);
                        }
                    }
                }
            }
            index = parent.index();
            parent = parent.parent()?;
        }
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &SyntaxToken) -> bool {
        self.green.as_ptr() == other.green.as_ptr() && self.offset == other.offset
    }
}

impl Eq for SyntaxToken {}

impl Hash for SyntaxToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.green.as_ptr().hash(state);
        self.offset.hash(state);
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.span(), self.text())
    }
}
