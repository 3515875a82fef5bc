//! Immutable syntax trees.

mod options;

pub use options::{EntryPoint, ParseOptions};

use std::fmt;
use std::sync::{Arc, OnceLock};

use loom_diagnostic::{Diagnostic, PositionedDiagnostic};
use loom_ir::{publish_once, LineCol, SourceText, Span, SyntaxKind, TextError};

use crate::{edit, EditError, GreenNode, SyntaxAnnotation, SyntaxNode, SyntaxToken};

/// A parsed text: the core root, the text it was parsed from and the
/// options used.
///
/// Cheap to clone. The root facade node is built on first use and shared by
/// every clone.
#[derive(Clone)]
pub struct SyntaxTree(Arc<TreeInner>);

struct TreeInner {
    green: GreenNode,
    text: SourceText,
    options: ParseOptions,
    root: OnceLock<SyntaxNode>,
}

impl SyntaxTree {
    /// Wrap a core root. `text` must be the full text of `green`.
    pub fn new(green: GreenNode, text: SourceText, options: ParseOptions) -> Self {
        debug_assert_eq!(green.width(), text.len(), "tree width must match its text");
        SyntaxTree(Arc::new(TreeInner {
            green,
            text,
            options,
            root: OnceLock::new(),
        }))
    }

    /// Wrap a core root, rebuilding the text from its tokens.
    pub fn from_green(green: GreenNode, options: ParseOptions) -> Self {
        let text = SourceText::new(green.full_text());
        SyntaxTree::new(green, text, options)
    }

    #[inline]
    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    #[inline]
    pub fn text(&self) -> &SourceText {
        &self.0.text
    }

    #[inline]
    pub fn options(&self) -> &ParseOptions {
        &self.0.options
    }

    /// The facade root, published once per tree.
    pub fn root(&self) -> &SyntaxNode {
        publish_once(&self.0.root, || SyntaxNode::new_root(self.0.green.clone()))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    /// Every diagnostic of the tree, in source order.
    pub fn diagnostics(&self) -> Vec<PositionedDiagnostic> {
        self.root().diagnostics()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().iter().any(PositionedDiagnostic::is_error)
    }

    pub fn find_token(&self, offset: u32) -> Result<SyntaxToken, TextError> {
        self.root().find_token(offset)
    }

    pub fn find_node(&self, span: Span) -> Result<SyntaxNode, TextError> {
        self.root().find_node(span)
    }

    pub fn annotated_nodes(&self, kind: &str) -> Vec<SyntaxNode> {
        self.root().annotated_nodes(kind)
    }

    pub fn line_col(&self, offset: u32) -> Result<LineCol, TextError> {
        self.0.text.line_col(offset)
    }

    /// New tree in which `node` carries `diagnostics`.
    pub fn with_diagnostics(
        &self,
        node: &SyntaxNode,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<SyntaxTree, EditError> {
        let green = edit::with_diagnostics(self.root(), node, diagnostics)?;
        Ok(self.with_same_text(green))
    }

    /// New tree in which `node` also carries `annotation`.
    pub fn with_annotation(
        &self,
        node: &SyntaxNode,
        annotation: SyntaxAnnotation,
    ) -> Result<SyntaxTree, EditError> {
        let mut annotations = node.annotations().to_vec();
        annotations.push(annotation);
        let green = edit::with_annotations(self.root(), node, annotations)?;
        Ok(self.with_same_text(green))
    }

    /// New tree with `node` replaced by `replacement`. The text is rebuilt.
    pub fn replace_node(
        &self,
        node: &SyntaxNode,
        replacement: GreenNode,
    ) -> Result<SyntaxTree, EditError> {
        let green = edit::replace_node(self.root(), node, replacement)?;
        Ok(SyntaxTree::from_green(green, self.0.options))
    }

    fn with_same_text(&self, green: GreenNode) -> SyntaxTree {
        SyntaxTree::new(green, self.0.text.clone(), self.0.options)
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("root", &self.0.green)
            .field("options", &self.0.options)
            .finish_non_exhaustive()
    }
}
