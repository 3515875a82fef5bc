//! Functional updates of the core tree.
//!
//! Every operation returns a new root. Only the nodes on the path from the
//! root to the edited element are reallocated; all other subtrees are the
//! same `Arc`s as before.

use loom_diagnostic::Diagnostic;

use crate::{GreenElement, GreenNode, GreenToken, SyntaxAnnotation, SyntaxNode, SyntaxToken};

/// Misuse of the editing API.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("the node does not belong to this tree")]
    ForeignNode,
    #[error("child index {index} is out of range for a node with {len} children")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Replace child `index` of `parent`.
pub fn replace_child(
    parent: &GreenNode,
    index: usize,
    child: GreenElement,
) -> Result<GreenNode, EditError> {
    let len = parent.children().len();
    if index >= len {
        return Err(EditError::IndexOutOfRange { index, len });
    }
    Ok(parent.with_child(index, child))
}

/// Replace `target`, a node under `root`, with `replacement`.
pub fn replace_node(
    root: &SyntaxNode,
    target: &SyntaxNode,
    replacement: GreenNode,
) -> Result<GreenNode, EditError> {
    ensure_in_tree(root, target)?;
    Ok(match target.parent() {
        Some(parent) => rebuild_ancestors(parent, target.index(), replacement.into()),
        None => replacement,
    })
}

/// Replace `target`, a token under `root`, with `replacement`.
pub fn replace_token(
    root: &SyntaxNode,
    target: &SyntaxToken,
    replacement: GreenToken,
) -> Result<GreenNode, EditError> {
    ensure_in_tree(root, target.parent())?;
    Ok(rebuild_ancestors(
        target.parent().clone(),
        target.index(),
        replacement.into(),
    ))
}

/// Attach `diagnostics` to `target`, replacing the ones it carries.
pub fn with_diagnostics(
    root: &SyntaxNode,
    target: &SyntaxNode,
    diagnostics: Vec<Diagnostic>,
) -> Result<GreenNode, EditError> {
    replace_node(root, target, target.green().with_diagnostics(diagnostics))
}

/// Attach `annotations` to `target`, replacing the ones it carries.
pub fn with_annotations(
    root: &SyntaxNode,
    target: &SyntaxNode,
    annotations: Vec<SyntaxAnnotation>,
) -> Result<GreenNode, EditError> {
    replace_node(root, target, target.green().with_annotations(annotations))
}

fn ensure_in_tree(root: &SyntaxNode, node: &SyntaxNode) -> Result<(), EditError> {
    if root.parent().is_some() || node.root() != *root {
        return Err(EditError::ForeignNode);
    }
    Ok(())
}

fn rebuild_ancestors(parent: SyntaxNode, index: usize, element: GreenElement) -> GreenNode {
    let mut node = parent.green().with_child(index, element);
    let mut current = parent;
    while let Some(parent) = current.parent() {
        node = parent.green().with_child(current.index(), node.into());
        current = parent;
    }
    node
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use loom_diagnostic::ErrorCode;
    use loom_ir::SyntaxKind;

    use super::*;
    use crate::{GreenTrivia, NodeBuilder};

    /// `{a;b;}` as `Block[{, Stmt[a ;], Stmt[b ;], }]`
    fn block() -> GreenNode {
        let mut b = NodeBuilder::new();
        b.start_node(SyntaxKind::Block);
        b.token(GreenToken::new(SyntaxKind::OpenBrace, "{"));
        for name in ["a", "b"] {
            b.start_node(SyntaxKind::ExpressionStatement);
            b.start_node(SyntaxKind::NameExpression);
            b.token(GreenToken::new(SyntaxKind::Identifier, name));
            b.finish_node();
            b.token(GreenToken::new(SyntaxKind::Semicolon, ";"));
            b.finish_node();
        }
        b.token(GreenToken::new(SyntaxKind::CloseBrace, "}"));
        b.finish_node();
        b.finish()
    }

    #[test]
    fn test_replace_child_checks_index() {
        let root = block();
        let err = replace_child(&root, 9, GreenToken::new(SyntaxKind::Semicolon, ";").into());
        assert_eq!(err, Err(EditError::IndexOutOfRange { index: 9, len: 4 }));
    }

    #[test]
    fn test_replace_node_reallocates_only_the_path() {
        let green = block();
        let root = SyntaxNode::new_root(green.clone());
        let second = root.child_nodes().nth(1).unwrap();
        let name = second.child_nodes().next().unwrap();

        let replacement = GreenNode::new(
            SyntaxKind::NameExpression,
            [GreenToken::new(SyntaxKind::Identifier, "c").into()],
        );
        let new_root = replace_node(&root, &name, replacement).unwrap();
        assert_eq!(new_root.full_text(), "{a;c;}");
        assert!(!new_root.ptr_eq(&green));

        let old = green.children();
        let new = new_root.children();
        assert!(new[0].element.ptr_eq(&old[0].element));
        assert!(new[1].element.ptr_eq(&old[1].element));
        assert!(!new[2].element.ptr_eq(&old[2].element));
        assert!(new[3].element.ptr_eq(&old[3].element));

        // Inside the rebuilt statement the `;` is still shared.
        let old_stmt = old[2].element.as_node().unwrap();
        let new_stmt = new[2].element.as_node().unwrap();
        assert!(new_stmt.children()[1].element.ptr_eq(&old_stmt.children()[1].element));
    }

    #[test]
    fn test_foreign_node_is_rejected() {
        let root = SyntaxNode::new_root(block());
        let other = SyntaxNode::new_root(block());
        let stranger = other.child_nodes().next().unwrap();
        let err = with_diagnostics(&root, &stranger, vec![]);
        assert_eq!(err, Err(EditError::ForeignNode));
    }

    #[test]
    fn test_with_diagnostics_on_nested_node() {
        let root = SyntaxNode::new_root(block());
        let first = root.child_nodes().next().unwrap();
        let diag = Diagnostic::error(ErrorCode::E1003, 0, 1).with_arg("a");
        let new_root = with_diagnostics(&root, &first, vec![diag]).unwrap();
        assert!(new_root.contains_diagnostics());
        let positioned = SyntaxNode::new_root(new_root).diagnostics();
        assert_eq!(positioned.len(), 1);
        assert_eq!(positioned[0].span, loom_ir::Span::new(1, 2));
    }

    #[test]
    fn test_replace_token() {
        let root = SyntaxNode::new_root(block());
        let semicolon = root
            .tokens()
            .find(|t| t.kind() == SyntaxKind::Semicolon)
            .unwrap();
        let spaced = GreenToken::with_trivia(
            SyntaxKind::Semicolon,
            ";",
            vec![GreenTrivia::new(SyntaxKind::Whitespace, " ")],
            vec![],
        );
        let new_root = replace_token(&root, &semicolon, spaced).unwrap();
        assert_eq!(new_root.full_text(), "{a ;b;}");
    }
}
