#![allow(clippy::unwrap_used, clippy::expect_used)]

use loom_ir::{Span, SyntaxKind, TextEdit};
use loom_syntax::{EntryPoint, GreenNode, ParseOptions, SyntaxTree};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::parse_text;

const THREE: &str = "a = 1;\nb = 2;\nc = 3;\n";

fn parse(text: &str) -> SyntaxTree {
    parse_text(text, ParseOptions::default())
}

fn child(node: &GreenNode, index: usize) -> GreenNode {
    node.children()[index].element.as_node().unwrap().clone()
}

fn assert_matches_full_parse(tree: &SyntaxTree) {
    let fresh = parse_text(tree.text().as_str(), *tree.options());
    assert_eq!(tree.green().debug_tree(), fresh.green().debug_tree());
    assert_eq!(tree.green(), fresh.green());
}

#[test]
fn untouched_statements_are_shared() {
    let old = parse(THREE);
    let (new, stats) = reparse_with_stats(&old, &[TextEdit::new(Span::new(11, 12), "42")]).unwrap();
    assert_eq!(new.text().as_str(), "a = 1;\nb = 42;\nc = 3;\n");
    assert_matches_full_parse(&new);

    assert!(child(new.green(), 0).ptr_eq(&child(old.green(), 0)));
    assert!(!child(new.green(), 1).ptr_eq(&child(old.green(), 1)));
    assert!(child(new.green(), 2).ptr_eq(&child(old.green(), 2)));
    assert_eq!(stats.reused_nodes, 2);
    assert!(stats.lexed_tokens > 0);
    assert_eq!(stats.affected, Span::new(9, 15));
}

#[test]
fn statements_inside_an_edited_function_are_shared() {
    let text = "fn f() {\n  a;\n  b;\n  c;\n}\n";
    let old = parse(text);
    let new = reparse(&old, &[TextEdit::insert(16, "b")]).unwrap();
    assert_eq!(new.text().as_str(), "fn f() {\n  a;\n  bb;\n  c;\n}\n");
    assert_matches_full_parse(&new);

    let old_fn = child(old.green(), 0);
    let new_fn = child(new.green(), 0);
    assert!(!new_fn.ptr_eq(&old_fn));
    let block = |function: &GreenNode| {
        let index = function.children().len() - 1;
        child(function, index)
    };
    let (old_block, new_block) = (block(&old_fn), block(&new_fn));
    assert_eq!(new_block.kind(), SyntaxKind::Block);
    assert!(child(&new_block, 3).ptr_eq(&child(&old_block, 3)));
}

#[test]
fn no_edits_keep_the_old_tree() {
    let old = parse(THREE);
    let (new, stats) = reparse_with_stats(&old, &[]).unwrap();
    assert!(new.green().ptr_eq(old.green()));
    assert_eq!(stats, ReparseStats::default());

    let noop = reparse(&old, &[TextEdit::insert(3, "")]).unwrap();
    assert!(noop.green().ptr_eq(old.green()));
}

#[test]
fn invalid_edits_are_rejected() {
    let old = parse(THREE);
    let error = reparse(&old, &[TextEdit::delete(Span::new(5, 100))]).unwrap_err();
    assert!(matches!(error, ReparseError::Text(_)));
}

#[test]
fn cancelled_reparse() {
    let old = parse(THREE);
    let token = CancellationToken::new();
    token.cancel();
    let error = reparse_with_cancel(&old, &[TextEdit::insert(0, "x")], &token).unwrap_err();
    assert_eq!(error, ReparseError::Cancelled);
}

#[test]
fn options_carry_over() {
    let options = ParseOptions {
        entry: EntryPoint::Expression,
        ..ParseOptions::default()
    };
    let old = parse_text("a + b", options);
    let new = reparse(&old, &[TextEdit::new(Span::new(4, 5), "c * d")]).unwrap();
    assert_eq!(*new.options(), options);
    assert_eq!(new.kind(), SyntaxKind::ExpressionRoot);
    assert_matches_full_parse(&new);
}

#[test]
fn several_edits_at_once() {
    let old = parse(THREE);
    let edits = [
        TextEdit::new(Span::new(4, 5), "10"),
        TextEdit::new(Span::new(18, 19), "30"),
    ];
    let new = reparse(&old, &edits).unwrap();
    assert_eq!(new.text().as_str(), "a = 10;\nb = 2;\nc = 30;\n");
    assert_matches_full_parse(&new);
}

#[test]
fn edit_that_fixes_an_error() {
    let old = parse("int x = ;\ny;\n");
    assert!(old.has_errors());
    let new = reparse(&old, &[TextEdit::insert(8, "1")]).unwrap();
    assert!(!new.has_errors());
    assert_matches_full_parse(&new);
}

#[test]
fn edit_that_opens_a_comment() {
    let old = parse(THREE);
    let new = reparse(&old, &[TextEdit::insert(7, "/*")]).unwrap();
    assert_matches_full_parse(&new);
    assert!(new.has_errors());
}
