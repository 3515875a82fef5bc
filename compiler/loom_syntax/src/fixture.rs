//! Hand-built trees shared by the unit tests.

use loom_ir::SyntaxKind;

use crate::{GreenNode, GreenToken, GreenTrivia, NodeBuilder};

pub(crate) const SAMPLE: &str = "int x = 1;\n/// doc\nx = x + 2;\n";

fn space() -> Vec<GreenTrivia> {
    vec![GreenTrivia::new(SyntaxKind::Whitespace, " ")]
}

fn eol() -> Vec<GreenTrivia> {
    vec![GreenTrivia::new(SyntaxKind::EndOfLine, "\n")]
}

fn spaced(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::with_trivia(kind, text, vec![], space())
}

/// The core tree of [`SAMPLE`].
pub(crate) fn sample() -> GreenNode {
    let mut b = NodeBuilder::new();
    b.start_node(SyntaxKind::CompilationUnit);

    b.start_node(SyntaxKind::LocalDeclaration);
    b.start_node(SyntaxKind::PredefinedType);
    b.token(spaced(SyntaxKind::IntKw, "int"));
    b.finish_node();
    b.token(spaced(SyntaxKind::Identifier, "x"));
    b.start_node(SyntaxKind::EqualsValueClause);
    b.token(spaced(SyntaxKind::Eq, "="));
    b.start_node(SyntaxKind::LiteralExpression);
    b.token(GreenToken::new(SyntaxKind::IntLiteral, "1"));
    b.finish_node();
    b.finish_node();
    b.token(GreenToken::with_trivia(SyntaxKind::Semicolon, ";", vec![], eol()));
    b.finish_node();

    b.start_node(SyntaxKind::ExpressionStatement);
    b.start_node(SyntaxKind::AssignmentExpression);
    b.start_node(SyntaxKind::NameExpression);
    b.token(GreenToken::with_trivia(
        SyntaxKind::Identifier,
        "x",
        vec![
            GreenTrivia::new(SyntaxKind::DocComment, "/// doc"),
            GreenTrivia::new(SyntaxKind::EndOfLine, "\n"),
        ],
        space(),
    ));
    b.finish_node();
    b.token(spaced(SyntaxKind::Eq, "="));
    b.start_node(SyntaxKind::BinaryExpression);
    b.start_node(SyntaxKind::NameExpression);
    b.token(spaced(SyntaxKind::Identifier, "x"));
    b.finish_node();
    b.token(spaced(SyntaxKind::Plus, "+"));
    b.start_node(SyntaxKind::LiteralExpression);
    b.token(GreenToken::new(SyntaxKind::IntLiteral, "2"));
    b.finish_node();
    b.finish_node();
    b.finish_node();
    b.token(GreenToken::with_trivia(SyntaxKind::Semicolon, ";", vec![], eol()));
    b.finish_node();

    b.token(GreenToken::new(SyntaxKind::EndOfFile, ""));
    b.finish_node();
    b.finish()
}
