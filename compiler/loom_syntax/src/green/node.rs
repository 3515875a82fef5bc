use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use loom_diagnostic::Diagnostic;
use loom_ir::SyntaxKind;

use super::{GreenFlags, GreenToken};
use crate::SyntaxAnnotation;

/// A node of the core tree.
///
/// Cheap to clone. Equality is structural; [`GreenNode::ptr_eq`] tests
/// identity, which is what structural sharing preserves.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct GreenNode(Arc<GreenNodeData>);

/// Contents of a [`GreenNode`].
///
/// Equality, hashing and dropping walk the subtree with a heap work-list, so
/// nesting depth is bounded by memory rather than by the thread's stack.
pub struct GreenNodeData {
    kind: SyntaxKind,
    flags: GreenFlags,
    width: u32,
    children: Box<[GreenChild]>,
    diagnostics: Box<[Diagnostic]>,
    annotations: Box<[SyntaxAnnotation]>,
}

/// A child together with its offset from the start of its parent.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GreenChild {
    pub rel_offset: u32,
    pub element: GreenElement,
}

/// Either a node or a token.
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(node) => node.kind(),
            GreenElement::Token(token) => token.kind(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        match self {
            GreenElement::Node(node) => node.width(),
            GreenElement::Token(token) => token.width(),
        }
    }

    #[inline]
    pub fn flags(&self) -> GreenFlags {
        match self {
            GreenElement::Node(node) => node.flags(),
            GreenElement::Token(token) => token.flags(),
        }
    }

    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            GreenElement::Node(node) => Some(node),
            GreenElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&GreenToken> {
        match self {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(_) => None,
        }
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &GreenElement) -> bool {
        match (self, other) {
            (GreenElement::Node(a), GreenElement::Node(b)) => a.ptr_eq(b),
            (GreenElement::Token(a), GreenElement::Token(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn write_full_text(&self, out: &mut String) {
        match self {
            GreenElement::Node(node) => node.write_full_text(out),
            GreenElement::Token(token) => token.write_full_text(out),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}

impl fmt::Debug for GreenElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreenElement::Node(node) => node.fmt(f),
            GreenElement::Token(token) => token.fmt(f),
        }
    }
}

impl GreenNode {
    /// Build a node, computing child offsets, width and flags.
    pub fn new(kind: SyntaxKind, children: impl IntoIterator<Item = GreenElement>) -> Self {
        Self::from_parts(
            kind,
            children.into_iter(),
            Box::default(),
            Box::default(),
        )
    }

    fn from_parts(
        kind: SyntaxKind,
        children: impl Iterator<Item = GreenElement>,
        diagnostics: Box<[Diagnostic]>,
        annotations: Box<[SyntaxAnnotation]>,
    ) -> Self {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        let mut width = 0u32;
        let mut flags = GreenFlags::empty();
        let children: Box<[GreenChild]> = children
            .map(|element| {
                let rel_offset = width;
                width += element.width();
                flags |= element.flags().inherited();
                GreenChild {
                    rel_offset,
                    element,
                }
            })
            .collect();
        if !diagnostics.is_empty() {
            flags |= GreenFlags::CONTAINS_DIAGNOSTICS;
        }
        if !annotations.is_empty() {
            flags |= GreenFlags::CONTAINS_ANNOTATIONS;
        }
        GreenNode(Arc::new(GreenNodeData {
            kind,
            flags,
            width,
            children,
            diagnostics,
            annotations,
        }))
    }

    fn rebuild(
        &self,
        children: impl Iterator<Item = GreenElement>,
        diagnostics: Box<[Diagnostic]>,
        annotations: Box<[SyntaxAnnotation]>,
    ) -> GreenNode {
        GreenNode::from_parts(self.kind, children, diagnostics, annotations)
    }

    /// Copy of this node with child `index` replaced. Every other child is
    /// shared with `self`.
    ///
    /// `index` must be in range; [`crate::edit::replace_child`] checks it.
    #[must_use]
    pub(crate) fn with_child(&self, index: usize, child: GreenElement) -> GreenNode {
        let mut replacement = Some(child);
        let children = self.children.iter().enumerate().map(|(i, c)| {
            if i == index {
                if let Some(new) = replacement.take() {
                    return new;
                }
            }
            c.element.clone()
        });
        self.rebuild(children, self.diagnostics.clone(), self.annotations.clone())
    }

    /// Copy of this node with `diagnostics` replacing its own.
    #[must_use]
    pub fn with_diagnostics(&self, diagnostics: Vec<Diagnostic>) -> GreenNode {
        let children = self.children.iter().map(|c| c.element.clone());
        self.rebuild(children, diagnostics.into(), self.annotations.clone())
    }

    /// Copy of this node with `annotations` replacing its own.
    #[must_use]
    pub fn with_annotations(&self, annotations: Vec<SyntaxAnnotation>) -> GreenNode {
        let children = self.children.iter().map(|c| c.element.clone());
        self.rebuild(children, self.diagnostics.clone(), annotations.into())
    }

    #[inline]
    pub fn ptr_eq(&self, other: &GreenNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const GreenNodeData {
        Arc::as_ptr(&self.0)
    }
}

impl PartialEq for GreenNodeData {
    fn eq(&self, other: &GreenNodeData) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.kind != b.kind
                || a.flags != b.flags
                || a.width != b.width
                || a.children.len() != b.children.len()
                || a.diagnostics != b.diagnostics
                || a.annotations != b.annotations
            {
                return false;
            }
            for (x, y) in a.children.iter().zip(b.children.iter()) {
                if x.rel_offset != y.rel_offset {
                    return false;
                }
                match (&x.element, &y.element) {
                    (GreenElement::Node(x), GreenElement::Node(y)) => {
                        if !x.ptr_eq(y) {
                            pending.push((&**x, &**y));
                        }
                    }
                    (GreenElement::Token(x), GreenElement::Token(y)) => {
                        if x != y {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for GreenNodeData {}

/// Hashes the node and the shape of its children only; equal nodes still
/// hash equally.
impl Hash for GreenNodeData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.width.hash(state);
        self.children.len().hash(state);
        for child in self.children.iter() {
            child.element.kind().hash(state);
            child.element.width().hash(state);
        }
    }
}

impl Drop for GreenNodeData {
    fn drop(&mut self) {
        let mut orphans = Vec::new();
        detach_child_nodes(&mut self.children, &mut orphans);
        while let Some(node) = orphans.pop() {
            // Shared subtrees stay alive; only sole owners are taken apart.
            if let Some(mut data) = Arc::into_inner(node.0) {
                detach_child_nodes(&mut data.children, &mut orphans);
            }
        }
    }
}

/// Move the child nodes of `children` onto `out`, leaving it empty.
fn detach_child_nodes(children: &mut Box<[GreenChild]>, out: &mut Vec<GreenNode>) {
    if children.iter().all(|c| matches!(c.element, GreenElement::Token(_))) {
        return;
    }
    for child in std::mem::take(children).into_vec() {
        if let GreenElement::Node(node) = child.element {
            out.push(node);
        }
    }
}

impl Deref for GreenNode {
    type Target = GreenNodeData;

    #[inline]
    fn deref(&self) -> &GreenNodeData {
        &self.0
    }
}

impl GreenNodeData {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn flags(&self) -> GreenFlags {
        self.flags
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn children(&self) -> &[GreenChild] {
        &self.children
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn annotations(&self) -> &[SyntaxAnnotation] {
        &self.annotations
    }

    #[inline]
    pub fn contains_diagnostics(&self) -> bool {
        self.flags.contains(GreenFlags::CONTAINS_DIAGNOSTICS)
    }

    #[inline]
    pub fn contains_skipped_text(&self) -> bool {
        self.flags.contains(GreenFlags::CONTAINS_SKIPPED)
    }

    #[inline]
    pub fn contains_missing(&self) -> bool {
        self.flags.contains(GreenFlags::CONTAINS_MISSING)
    }

    #[inline]
    pub fn contains_directives(&self) -> bool {
        self.flags.contains(GreenFlags::CONTAINS_DIRECTIVES)
    }

    #[inline]
    pub fn contains_annotations(&self) -> bool {
        self.flags.contains(GreenFlags::CONTAINS_ANNOTATIONS)
    }

    /// Index of the first child whose range contains `rel_offset`.
    ///
    /// Zero-width children are never returned; `None` when `rel_offset` is at
    /// or past the end.
    pub fn child_index_at(&self, rel_offset: u32) -> Option<usize> {
        let index = self
            .children
            .partition_point(|c| c.rel_offset + c.element.width() <= rel_offset);
        (index < self.children.len()).then_some(index)
    }

    /// Every token of the subtree in source order.
    pub fn tokens(&self) -> GreenTokens<'_> {
        GreenTokens {
            stack: vec![self.children.iter()],
        }
    }

    pub fn first_token(&self) -> Option<&GreenToken> {
        self.tokens().next()
    }

    pub fn last_token(&self) -> Option<&GreenToken> {
        let mut stack = vec![self.children.iter().rev()];
        while let Some(top) = stack.last_mut() {
            match top.next() {
                Some(child) => match &child.element {
                    GreenElement::Token(token) => return Some(token),
                    GreenElement::Node(node) => stack.push(node.children.iter().rev()),
                },
                None => {
                    stack.pop();
                }
            }
        }
        None
    }

    /// Source text of the subtree, trivia included.
    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(self.width as usize);
        self.write_full_text(&mut out);
        out
    }

    pub fn write_full_text(&self, out: &mut String) {
        for token in self.tokens() {
            token.write_full_text(out);
        }
    }

    /// Indented outline of the subtree, one element per line.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:?}@{}", self.kind, self.width);
        let mut stack = vec![self.children.iter()];
        while let Some(top) = stack.last_mut() {
            let Some(child) = top.next() else {
                stack.pop();
                continue;
            };
            let indent = stack.len() * 2;
            match &child.element {
                GreenElement::Node(node) => {
                    let _ = writeln!(out, "{:indent$}{:?}@{}", "", node.kind, node.width);
                    stack.push(node.children.iter());
                }
                GreenElement::Token(token) => {
                    let _ = writeln!(out, "{:indent$}{token:?}", "");
                }
            }
        }
        out
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind, self.width)
    }
}

/// Iterator over the tokens of a subtree.
pub struct GreenTokens<'a> {
    stack: Vec<std::slice::Iter<'a, GreenChild>>,
}

impl<'a> Iterator for GreenTokens<'a> {
    type Item = &'a GreenToken;

    fn next(&mut self) -> Option<&'a GreenToken> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(child) => match &child.element {
                    GreenElement::Token(token) => return Some(token),
                    GreenElement::Node(node) => self.stack.push(node.children.iter()),
                },
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
