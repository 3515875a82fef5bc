use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use loom_diagnostic::PositionedDiagnostic;
use loom_ir::{Span, SyntaxKind, TextError};

use super::{
    collect_diagnostics, Descendants, SyntaxElement, SyntaxElementChildren, SyntaxNodeChildren,
    SyntaxToken, SyntaxTokens,
};
use crate::{GreenElement, GreenNode, SyntaxAnnotation};

/// A node of the facade tree.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

struct NodeData {
    green: GreenNode,
    offset: u32,
    index: u32,
    parent: Option<SyntaxNode>,
}

impl Drop for NodeData {
    fn drop(&mut self) {
        // Release the parent chain one link at a time.
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            parent = Arc::into_inner(node.0).and_then(|mut data| data.parent.take());
        }
    }
}

impl SyntaxNode {
    /// Facade root over `green`, starting at offset zero.
    pub fn new_root(green: GreenNode) -> SyntaxNode {
        SyntaxNode(Arc::new(NodeData {
            green,
            offset: 0,
            index: 0,
            parent: None,
        }))
    }

    fn new_child(green: GreenNode, parent: &SyntaxNode, index: usize, offset: u32) -> SyntaxNode {
        SyntaxNode(Arc::new(NodeData {
            green,
            offset,
            index: index as u32,
            parent: Some(parent.clone()),
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    /// Index of this node among its parent's children.
    #[inline]
    pub fn index(&self) -> usize {
        self.0.index as usize
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        self.0.parent.clone()
    }

    pub fn root(&self) -> SyntaxNode {
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// Parent, grandparent, and so on up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(self.parent(), SyntaxNode::parent)
    }

    /// Span including the leading trivia of the first token and the trailing
    /// trivia of the last.
    #[inline]
    pub fn full_span(&self) -> Span {
        Span::at(self.0.offset, self.0.green.width())
    }

    /// Span without the outer trivia.
    pub fn span(&self) -> Span {
        let full = self.full_span();
        let leading = self.0.green.first_token().map_or(0, |t| t.leading_width());
        let trailing = self.0.green.last_token().map_or(0, |t| t.trailing_width());
        if leading + trailing >= full.len() {
            let start = (full.start + leading).min(full.end);
            return Span::point(start);
        }
        Span::new(full.start + leading, full.end - trailing)
    }

    pub fn full_text(&self) -> String {
        self.0.green.full_text()
    }

    /// Text of [`SyntaxNode::span`].
    pub fn text(&self) -> String {
        let full = self.full_span();
        let span = self.span();
        let text = self.full_text();
        let start = (span.start - full.start) as usize;
        let end = (span.end - full.start) as usize;
        text.get(start..end).unwrap_or_default().to_owned()
    }

    pub fn child(&self, index: usize) -> Option<SyntaxElement> {
        let child = self.0.green.children().get(index)?;
        let offset = self.0.offset + child.rel_offset;
        Some(match &child.element {
            GreenElement::Node(node) => {
                SyntaxNode::new_child(node.clone(), self, index, offset).into()
            }
            GreenElement::Token(token) => {
                SyntaxToken::new(token.clone(), self.clone(), index, offset).into()
            }
        })
    }

    pub fn children(&self) -> SyntaxElementChildren {
        SyntaxElementChildren::new(self.clone())
    }

    pub fn child_nodes(&self) -> SyntaxNodeChildren {
        SyntaxNodeChildren::new(self.clone())
    }

    /// This node and every node below it, in preorder.
    pub fn descendants(&self) -> Descendants {
        Descendants::new(self.clone())
    }

    /// Every token of the subtree in source order.
    pub fn tokens(&self) -> SyntaxTokens {
        SyntaxTokens::new(self.clone())
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.tokens().next()
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        let mut stack = vec![(self.clone(), self.0.green.children().len())];
        while let Some((node, remaining)) = stack.last_mut() {
            let Some(index) = remaining.checked_sub(1) else {
                stack.pop();
                continue;
            };
            *remaining = index;
            match node.child(index) {
                Some(SyntaxElement::Token(token)) => return Some(token),
                Some(SyntaxElement::Node(child)) => {
                    let len = child.0.green.children().len();
                    stack.push((child, len));
                }
                None => {}
            }
        }
        None
    }

    /// Diagnostics of this subtree with absolute spans.
    pub fn diagnostics(&self) -> Vec<PositionedDiagnostic> {
        let mut out = Vec::new();
        collect_diagnostics(&self.0.green, self.0.offset, &mut out);
        out
    }

    pub fn annotations(&self) -> &[SyntaxAnnotation] {
        self.0.green.annotations()
    }

    /// Nodes of this subtree carrying an annotation of `kind`, in preorder.
    pub fn annotated_nodes(&self, kind: &str) -> Vec<SyntaxNode> {
        let mut found = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            if node.annotations().iter().any(|a| a.kind() == kind) {
                found.push(node.clone());
            }
            let children: Vec<_> = node
                .child_nodes()
                .filter(|child| child.green().contains_annotations())
                .collect();
            stack.extend(children.into_iter().rev());
        }
        found
    }

    /// The token whose full span contains `offset`. The end of the node maps
    /// to its last token.
    pub fn find_token(&self, offset: u32) -> Result<SyntaxToken, TextError> {
        let full = self.full_span();
        if offset < full.start || offset > full.end {
            return Err(TextError::OutOfRange {
                span: Span::point(offset),
                len: full.end,
            });
        }
        let mut node = self.clone();
        loop {
            let rel = offset - node.0.offset;
            let child = node.0.green.child_index_at(rel).and_then(|i| node.child(i));
            match child {
                Some(SyntaxElement::Token(token)) => return Ok(token),
                Some(SyntaxElement::Node(child)) => node = child,
                None => {
                    return node.last_token().ok_or(TextError::OutOfRange {
                        span: Span::point(offset),
                        len: full.end,
                    })
                }
            }
        }
    }

    /// The innermost node whose full span covers `span`. An empty span picks
    /// the node containing that position.
    pub fn find_node(&self, span: Span) -> Result<SyntaxNode, TextError> {
        let full = self.full_span();
        if !full.contains_span(span) || span.start > span.end {
            return Err(TextError::OutOfRange {
                span,
                len: full.end,
            });
        }
        let fits = |candidate: Span| {
            if span.is_empty() {
                candidate.contains(span.start)
            } else {
                candidate.contains_span(span)
            }
        };
        let mut node = self.clone();
        while let Some(child) = node.child_nodes().find(|child| fits(child.full_span())) {
            node = child;
        }
        Ok(node)
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &SyntaxNode) -> bool {
        self.0.green.as_ptr() == other.0.green.as_ptr() && self.0.offset == other.0.offset
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.green.as_ptr().hash(state);
        self.0.offset.hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.full_span())
    }
}
