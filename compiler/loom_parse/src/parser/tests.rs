#![allow(clippy::unwrap_used, clippy::expect_used)]

use loom_diagnostic::ErrorCode;
use loom_ir::{Span, SyntaxKind};
use loom_lexer::{LexMode, Lexer};
use loom_syntax::SyntaxNode;
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

use super::*;

fn parser(text: &str) -> Parser<'static, Lexer> {
    Parser::new(Lexer::new(text, LexMode::default()), None)
}

/// Wrap whatever `body` consumes in a compilation unit ending at EOF.
fn unit(text: &str, body: impl FnOnce(&mut Parser<'static, Lexer>)) -> GreenNode {
    let mut p = parser(text);
    p.start_node(SyntaxKind::CompilationUnit);
    body(&mut p);
    assert!(p.at(SyntaxKind::EndOfFile), "body left input behind");
    p.bump();
    p.finish_node();
    p.finish().unwrap().0
}

#[test]
fn expect_inserts_missing_token() {
    let root = unit("x", |p| {
        assert!(!p.expect(SyntaxKind::Semicolon));
        assert!(p.expect(SyntaxKind::Identifier));
    });
    assert_eq!(
        root.debug_tree(),
        "CompilationUnit@1\n  Semicolon@missing\n  Identifier@\"x\"\n  EndOfFile@\"\"\n"
    );
    let diagnostics = SyntaxNode::new_root(root).diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E1001);
    assert_eq!(diagnostics[0].message, "expected ;");
    assert_eq!(diagnostics[0].span, Span::new(0, 0));
}

#[test]
fn skipped_tokens_lead_the_next_token() {
    let root = unit("a ) b", |p| {
        p.bump();
        p.skip();
        p.bump();
    });
    assert_eq!(root.full_text(), "a ) b");
    let b = root.children()[1].element.as_token().unwrap().clone();
    assert_eq!(b.text(), "b");
    let kinds: Vec<_> = b.leading_trivia().iter().map(|t| t.kind()).collect();
    assert_eq!(kinds, [SyntaxKind::SkippedText, SyntaxKind::Whitespace]);
    assert!(b.contains_skipped_text());

    let diagnostics = SyntaxNode::new_root(root).diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E1003);
    assert_eq!(diagnostics[0].message, "unexpected )");
    assert_eq!(diagnostics[0].span, Span::new(2, 3));
}

#[test]
fn skipped_run_keeps_offsets() {
    let root = unit(") ] b", |p| {
        p.skip();
        p.skip();
        p.bump();
    });
    assert_eq!(root.full_text(), ") ] b");
    let spans: Vec<_> = SyntaxNode::new_root(root)
        .diagnostics()
        .iter()
        .map(|d| d.span)
        .collect();
    assert_eq!(spans, [Span::new(0, 1), Span::new(2, 3)]);
}

#[test]
fn invalid_tokens_are_not_reported_twice() {
    let root = unit("@ b", |p| {
        p.skip();
        p.bump();
    });
    let diagnostics = SyntaxNode::new_root(root).diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E0002);
    assert_eq!(diagnostics[0].span, Span::new(0, 1));
}

#[test]
fn skipped_text_reaches_end_of_file() {
    let root = unit("a )", |p| {
        p.bump();
        p.skip();
    });
    let eof = root.children()[1].element.as_token().unwrap().clone();
    assert_eq!(eof.kind(), SyntaxKind::EndOfFile);
    assert_eq!(eof.full_text(), ")");
}

#[test]
fn no_reuse_while_text_is_pending() {
    let mut p = parser(") x");
    p.skip();
    assert!(!p.reuse(&|_| true));
    assert_eq!(p.current(), SyntaxKind::Identifier);
}

#[test]
fn cancellation_is_sticky() {
    let token = CancellationToken::new();
    let mut p = Parser::new(Lexer::new("x", LexMode::default()), Some(&token));
    assert!(!p.is_cancelled());
    token.cancel();
    assert!(p.is_cancelled());
    p.start_node(SyntaxKind::CompilationUnit);
    p.bump();
    p.finish_node();
    assert!(matches!(p.finish(), Err(ParseError::Cancelled)));
}
