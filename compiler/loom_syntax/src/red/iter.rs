use super::{SyntaxElement, SyntaxNode, SyntaxToken};

/// Children of a node, nodes and tokens alike.
#[derive(Clone, Debug)]
pub struct SyntaxElementChildren {
    parent: SyntaxNode,
    next: usize,
}

impl SyntaxElementChildren {
    pub(super) fn new(parent: SyntaxNode) -> Self {
        SyntaxElementChildren { parent, next: 0 }
    }
}

impl Iterator for SyntaxElementChildren {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<SyntaxElement> {
        let child = self.parent.child(self.next)?;
        self.next += 1;
        Some(child)
    }
}

/// Child nodes of a node; tokens are skipped.
#[derive(Clone, Debug)]
pub struct SyntaxNodeChildren {
    inner: SyntaxElementChildren,
}

impl SyntaxNodeChildren {
    pub(super) fn new(parent: SyntaxNode) -> Self {
        SyntaxNodeChildren {
            inner: SyntaxElementChildren::new(parent),
        }
    }
}

impl Iterator for SyntaxNodeChildren {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<SyntaxNode> {
        self.inner.find_map(SyntaxElement::into_node)
    }
}

/// Preorder walk over a subtree's nodes, starting with its root.
#[derive(Clone, Debug)]
pub struct Descendants {
    stack: Vec<SyntaxNode>,
}

impl Descendants {
    pub(super) fn new(root: SyntaxNode) -> Self {
        Descendants { stack: vec![root] }
    }
}

impl Iterator for Descendants {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<SyntaxNode> {
        let node = self.stack.pop()?;
        let first = self.stack.len();
        self.stack.extend(node.child_nodes());
        self.stack[first..].reverse();
        Some(node)
    }
}

/// Tokens of a subtree in source order.
#[derive(Clone, Debug)]
pub struct SyntaxTokens {
    stack: Vec<(SyntaxNode, usize)>,
}

impl SyntaxTokens {
    pub(super) fn new(root: SyntaxNode) -> Self {
        SyntaxTokens {
            stack: vec![(root, 0)],
        }
    }
}

impl Iterator for SyntaxTokens {
    type Item = SyntaxToken;

    fn next(&mut self) -> Option<SyntaxToken> {
        loop {
            let (node, next) = self.stack.last_mut()?;
            let Some(child) = node.child(*next) else {
                self.stack.pop();
                continue;
            };
            *next += 1;
            match child {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(child) => self.stack.push((child, 0)),
            }
        }
    }
}
