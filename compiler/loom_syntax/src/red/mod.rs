//! Navigable facade over the core tree.
//!
//! A [`SyntaxNode`] pairs a green node with its absolute offset, its index in
//! its parent and a strong handle to that parent. Facade nodes are created on
//! demand while navigating and hold references only upward, so there are no
//! cycles and a facade can be dropped at any time without affecting the tree.
//!
//! Two facade handles are equal when they wrap the same green allocation at
//! the same offset.

mod iter;
mod node;
mod token;

pub use iter::{Descendants, SyntaxElementChildren, SyntaxNodeChildren, SyntaxTokens};
pub use node::SyntaxNode;
pub use token::SyntaxToken;

use loom_diagnostic::PositionedDiagnostic;
use loom_ir::{Span, SyntaxKind};

use crate::{GreenElement, GreenNode};

/// A facade node or token.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    pub fn full_span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.full_span(),
            SyntaxElement::Token(token) => token.full_span(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span(),
            SyntaxElement::Token(token) => token.span(),
        }
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => node.parent(),
            SyntaxElement::Token(token) => Some(token.parent().clone()),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        SyntaxElement::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        SyntaxElement::Token(token)
    }
}

/// Resolve every diagnostic under `green`, which starts at `offset`, in
/// source order. Subtrees without diagnostics are skipped by flag.
pub(crate) fn collect_diagnostics(
    green: &GreenNode,
    offset: u32,
    out: &mut Vec<PositionedDiagnostic>,
) {
    if !green.contains_diagnostics() {
        return;
    }
    out.extend(green.diagnostics().iter().map(|d| d.positioned(offset)));
    let mut stack = vec![(green.children().iter(), offset)];
    while let Some((children, base)) = stack.last_mut() {
        let base = *base;
        let Some(child) = children.next() else {
            stack.pop();
            continue;
        };
        let start = base + child.rel_offset;
        match &child.element {
            GreenElement::Node(node) => {
                if node.contains_diagnostics() {
                    out.extend(node.diagnostics().iter().map(|d| d.positioned(start)));
                    stack.push((node.children().iter(), start));
                }
            }
            GreenElement::Token(token) => {
                out.extend(token.diagnostics().iter().map(|d| d.positioned(start)));
            }
        }
    }
}
