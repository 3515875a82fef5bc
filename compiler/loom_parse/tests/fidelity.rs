//! Full-fidelity tests: every parse reproduces its input exactly, whatever
//! the input, and always terminates.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use loom_ir::{SourceText, SyntaxKind};
use loom_parse::parse_text;
use loom_syntax::{EntryPoint, ParseOptions, SyntaxTree};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn all_options() -> Vec<ParseOptions> {
    let mut out = Vec::new();
    for entry in [
        EntryPoint::CompilationUnit,
        EntryPoint::Expression,
        EntryPoint::Statement,
    ] {
        for allow_directives in [false, true] {
            out.push(ParseOptions {
                entry,
                allow_directives,
                documentation_comments: allow_directives,
            });
        }
    }
    out
}

fn token_text(tree: &SyntaxTree) -> String {
    tree.root().tokens().map(|token| token.full_text()).collect()
}

fn assert_round_trip(text: impl Into<SourceText>) {
    let text = text.into();
    for options in all_options() {
        let tree = parse_text(text.clone(), options);
        assert_eq!(tree.green().full_text(), text.as_str(), "{options:?}");
        assert_eq!(token_text(&tree), text.as_str(), "{options:?}");
        assert_eq!(tree.root().full_span().len(), text.len());
        let last = tree.root().last_token().unwrap();
        assert_eq!(last.kind(), SyntaxKind::EndOfFile);
    }
}

#[test]
fn empty_text() {
    assert_round_trip("");
    let tree = parse_text("", ParseOptions::default());
    assert_eq!(tree.green().debug_tree(), "CompilationUnit@0\n  EndOfFile@\"\"\n");
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn trivia_only() {
    assert_round_trip("   \n\t// note\n/* block */\n");
}

#[test]
fn mixed_line_endings() {
    assert_round_trip("int a = 1;\r\nint b = 2;\rint c = 3;\n\r\n");
}

#[test]
fn unterminated_comment() {
    assert_round_trip("int a = 1; /* never closed\nint b;");
}

#[test]
fn unterminated_string() {
    assert_round_trip("s = \"open\nt = 'x\n");
}

#[test]
fn non_ascii() {
    assert_round_trip("名前 = \"héllo\"; // ünïcödé\nλ(ω);\n");
}

#[test]
fn byte_order_mark() {
    assert_round_trip("\u{feff}int x;\n");
    let tree = parse_text("\u{feff}int x;", ParseOptions::default());
    let first = tree.root().first_token().unwrap();
    assert_eq!(first.kind(), SyntaxKind::IntKw);
    assert_eq!(first.leading_trivia()[0].kind(), SyntaxKind::ByteOrderMark);
}

#[test]
fn lossy_decoded_bytes() {
    let text = SourceText::from_utf8_lossy(b"int \xffx = \xc3;\n");
    assert_round_trip(text);
}

#[test]
fn directives_and_markers() {
    assert_round_trip("#pragma once\nint x;\n<<<<<<< HEAD\ny;\n=======\nz;\n>>>>>>> other\n");
}

#[test]
fn garbage() {
    assert_round_trip(")))}}}]]] else else @@ $ ` \\ \0 fn fn (((");
}

#[test]
fn worked_example_expression() {
    let options = ParseOptions {
        entry: EntryPoint::Expression,
        ..ParseOptions::default()
    };
    let tree = parse_text("1+", options);
    assert_eq!(
        tree.green().debug_tree(),
        "\
ExpressionRoot@2
  BinaryExpression@2
    LiteralExpression@1
      IntLiteral@\"1\"
    Plus@\"+\"
    NameExpression@0
      Identifier@missing
  EndOfFile@\"\"
"
    );
    let diagnostics = tree.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "expected expression");
    let name = tree
        .root()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::NameExpression)
        .unwrap();
    let identifier = name.first_token().unwrap();
    assert!(identifier.is_missing());
    assert_eq!(identifier.span().start, 2);
    let binary = name.parent().unwrap();
    assert_eq!(binary.kind(), SyntaxKind::BinaryExpression);
    let siblings: Vec<_> = binary.children().map(|child| child.kind()).collect();
    assert_eq!(
        siblings,
        [
            SyntaxKind::LiteralExpression,
            SyntaxKind::Plus,
            SyntaxKind::NameExpression,
        ]
    );
}

#[test]
fn diagnostics_stay_local() {
    let text = "a = 1;\nb = ;\nc = (3;\nd = 4;\n";
    let tree = parse_text(text, ParseOptions::default());
    let statements: Vec<_> = tree.root().child_nodes().collect();
    assert_eq!(statements.len(), 4);
    for diagnostic in tree.diagnostics() {
        let owner = statements
            .iter()
            .find(|statement| statement.full_span().contains_span(diagnostic.span))
            .unwrap();
        assert!(
            owner.text().starts_with('b') || owner.text().starts_with('c'),
            "{diagnostic:?} in {owner:?}"
        );
    }
    assert!(!statements[0].green().contains_diagnostics());
    assert!(!statements[3].green().contains_diagnostics());
}

fn any_source() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        prop::collection::vec(
            prop::sample::select(vec![
                "int ", "x", "y1", "0", "1.5", "\"s\"", "'c'", "fn ", "if ", "else ", "while ",
                "return ", "break", "(", ")", "{", "}", "[", "]", ";", ",", ".", "=", "==",
                "+", "-", "*", "!", "->", " ", "\n", "\r\n", "// c\n", "/*", "*/", "#", "@",
                "\"", "'", "<<<<<<< ", "\u{feff}", "é",
            ]),
            0..40,
        )
        .prop_map(|pieces| pieces.concat()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn any_input_round_trips(text in any_source()) {
        for options in all_options() {
            let tree = parse_text(text.as_str(), options);
            prop_assert_eq!(tree.green().full_text(), text.clone());
            for diagnostic in tree.diagnostics() {
                prop_assert!(diagnostic.span.end <= tree.text().len());
            }
        }
    }
}
