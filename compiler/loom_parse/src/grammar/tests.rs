#![allow(clippy::unwrap_used, clippy::expect_used)]

use loom_diagnostic::ErrorCode;
use loom_ir::{Span, SyntaxKind};
use loom_syntax::{EntryPoint, ParseOptions, SyntaxTree};
use pretty_assertions::assert_eq;

use crate::parse_text;

fn parse(text: &str, entry: EntryPoint) -> SyntaxTree {
    let options = ParseOptions {
        entry,
        ..ParseOptions::default()
    };
    let tree = parse_text(text, options);
    assert_eq!(tree.green().full_text(), text, "round trip");
    tree
}

fn unit(text: &str) -> String {
    parse(text, EntryPoint::CompilationUnit).green().debug_tree()
}

fn expression(text: &str) -> String {
    parse(text, EntryPoint::Expression).green().debug_tree()
}

fn codes(text: &str) -> Vec<(ErrorCode, String)> {
    parse(text, EntryPoint::CompilationUnit)
        .diagnostics()
        .into_iter()
        .map(|d| (d.code, d.message))
        .collect()
}

fn item_kinds(text: &str) -> Vec<SyntaxKind> {
    parse(text, EntryPoint::CompilationUnit)
        .root()
        .children()
        .map(|child| child.kind())
        .collect()
}

// ─── Clean input ─────────────────────────────────────────────────────

#[test]
fn empty_text() {
    assert_eq!(unit(""), "CompilationUnit@0\n  EndOfFile@\"\"\n");
    assert!(codes("").is_empty());
}

#[test]
fn local_declaration() {
    assert_eq!(
        unit("int x = 1;"),
        "\
CompilationUnit@10
  LocalDeclaration@10
    PredefinedType@4
      IntKw@\"int\"
    Identifier@\"x\"
    EqualsValueClause@3
      Eq@\"=\"
      LiteralExpression@1
        IntLiteral@\"1\"
    Semicolon@\";\"
  EndOfFile@\"\"
"
    );
}

#[test]
fn function_declaration() {
    assert_eq!(
        unit("fn f(int a) -> int { return a; }"),
        "\
CompilationUnit@32
  FunctionDeclaration@32
    FnKw@\"fn\"
    Identifier@\"f\"
    ParameterList@8
      OpenParen@\"(\"
      Parameter@5
        PredefinedType@4
          IntKw@\"int\"
        Identifier@\"a\"
      CloseParen@\")\"
    ReturnClause@7
      Arrow@\"->\"
      PredefinedType@4
        IntKw@\"int\"
    Block@13
      OpenBrace@\"{\"
      ReturnStatement@10
        ReturnKw@\"return\"
        NameExpression@1
          Identifier@\"a\"
        Semicolon@\";\"
      CloseBrace@\"}\"
  EndOfFile@\"\"
"
    );
}

#[test]
fn if_else_statement() {
    let tree = parse("if (a) b; else c;", EntryPoint::Statement);
    assert_eq!(
        tree.green().debug_tree(),
        "\
StatementRoot@17
  IfStatement@17
    IfKw@\"if\"
    OpenParen@\"(\"
    NameExpression@1
      Identifier@\"a\"
    CloseParen@\")\"
    ExpressionStatement@3
      NameExpression@1
        Identifier@\"b\"
      Semicolon@\";\"
    ElseClause@7
      ElseKw@\"else\"
      ExpressionStatement@2
        NameExpression@1
          Identifier@\"c\"
        Semicolon@\";\"
  EndOfFile@\"\"
"
    );
}

#[test]
fn statement_forms() {
    assert_eq!(
        item_kinds("{ } ; while (x) break; continue; return; var y = 2; T z;"),
        [
            SyntaxKind::Block,
            SyntaxKind::EmptyStatement,
            SyntaxKind::WhileStatement,
            SyntaxKind::ContinueStatement,
            SyntaxKind::ReturnStatement,
            SyntaxKind::LocalDeclaration,
            SyntaxKind::LocalDeclaration,
            SyntaxKind::EndOfFile,
        ]
    );
    assert!(codes("{ } ; while (x) break; continue; return; var y = 2; T z;").is_empty());
}

#[test]
fn name_followed_by_name_declares() {
    assert_eq!(
        item_kinds("a b; a;"),
        [
            SyntaxKind::LocalDeclaration,
            SyntaxKind::ExpressionStatement,
            SyntaxKind::EndOfFile,
        ]
    );
}

#[test]
fn binary_precedence() {
    assert_eq!(
        expression("a + b * c"),
        "\
ExpressionRoot@9
  BinaryExpression@9
    NameExpression@2
      Identifier@\"a\"
    Plus@\"+\"
    BinaryExpression@5
      NameExpression@2
        Identifier@\"b\"
      Star@\"*\"
      NameExpression@1
        Identifier@\"c\"
  EndOfFile@\"\"
"
    );
}

#[test]
fn binary_is_left_associative() {
    assert_eq!(
        expression("a - b - c"),
        "\
ExpressionRoot@9
  BinaryExpression@9
    BinaryExpression@6
      NameExpression@2
        Identifier@\"a\"
      Minus@\"-\"
      NameExpression@2
        Identifier@\"b\"
    Minus@\"-\"
    NameExpression@1
      Identifier@\"c\"
  EndOfFile@\"\"
"
    );
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(
        expression("a = b += -c"),
        "\
ExpressionRoot@11
  AssignmentExpression@11
    NameExpression@2
      Identifier@\"a\"
    Eq@\"=\"
    AssignmentExpression@7
      NameExpression@2
        Identifier@\"b\"
      PlusEq@\"+=\"
      PrefixUnaryExpression@2
        Minus@\"-\"
        NameExpression@1
          Identifier@\"c\"
  EndOfFile@\"\"
"
    );
}

#[test]
fn prefix_binds_tighter_than_binary() {
    let tree = parse("-a * b", EntryPoint::Expression);
    let binary = tree.root().child_nodes().next().unwrap();
    assert_eq!(binary.kind(), SyntaxKind::BinaryExpression);
    let operand = binary.child_nodes().next().unwrap();
    assert_eq!(operand.kind(), SyntaxKind::PrefixUnaryExpression);
    assert_eq!(operand.text(), "-a");
}

#[test]
fn postfix_chain() {
    assert_eq!(
        expression("f(x, 1).y[0]"),
        "\
ExpressionRoot@12
  ElementAccessExpression@12
    MemberAccessExpression@9
      CallExpression@7
        NameExpression@1
          Identifier@\"f\"
        ArgumentList@6
          OpenParen@\"(\"
          NameExpression@1
            Identifier@\"x\"
          Comma@\",\"
          LiteralExpression@1
            IntLiteral@\"1\"
          CloseParen@\")\"
      Dot@\".\"
      Identifier@\"y\"
    OpenBracket@\"[\"
    LiteralExpression@1
      IntLiteral@\"0\"
    CloseBracket@\"]\"
  EndOfFile@\"\"
"
    );
}

// ─── Recovery ────────────────────────────────────────────────────────

#[test]
fn incomplete_binary_gets_missing_operand() {
    assert_eq!(
        expression("1+"),
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
    let diagnostics = parse("1+", EntryPoint::Expression).diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E1002);
    assert_eq!(diagnostics[0].span, Span::new(2, 2));
}

#[test]
fn missing_initializer_does_not_spill() {
    assert_eq!(
        item_kinds("int x = ;\ny = 2;"),
        [
            SyntaxKind::LocalDeclaration,
            SyntaxKind::ExpressionStatement,
            SyntaxKind::EndOfFile,
        ]
    );
    assert_eq!(
        codes("int x = ;\ny = 2;"),
        [(ErrorCode::E1002, "expected expression".to_string())]
    );
}

#[test]
fn stray_token_is_skipped() {
    assert_eq!(
        item_kinds(") x;"),
        [SyntaxKind::ExpressionStatement, SyntaxKind::EndOfFile]
    );
    assert_eq!(
        codes(") x;"),
        [(ErrorCode::E1003, "unexpected )".to_string())]
    );
}

#[test]
fn stray_close_brace_at_top_level() {
    assert_eq!(unit("}"), "CompilationUnit@1\n  EndOfFile@\"\"\n");
    assert_eq!(
        codes("}"),
        [(ErrorCode::E1003, "unexpected }".to_string())]
    );
}

#[test]
fn keyword_that_starts_nothing_is_skipped() {
    assert_eq!(
        codes("else x;"),
        [(ErrorCode::E1003, "unexpected else".to_string())]
    );
}

#[test]
fn unclosed_block_stops_at_next_function() {
    assert_eq!(
        item_kinds("fn a() { x;\nfn b() {}"),
        [
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::EndOfFile,
        ]
    );
    assert_eq!(
        codes("fn a() { x;\nfn b() {}"),
        [(ErrorCode::E1001, "expected }".to_string())]
    );
}

#[test]
fn parameter_without_name() {
    assert_eq!(
        codes("fn f(a) {}"),
        [(ErrorCode::E1001, "expected identifier".to_string())]
    );
}

#[test]
fn missing_type_is_named() {
    let tree = parse("fn f(, int b) {}", EntryPoint::CompilationUnit);
    let messages: Vec<_> = tree.diagnostics().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, ["expected type", "expected identifier"]);
}

#[test]
fn expression_entry_skips_leftovers() {
    let tree = parse("a b", EntryPoint::Expression);
    assert_eq!(
        tree.green().debug_tree(),
        "ExpressionRoot@3\n  NameExpression@2\n    Identifier@\"a\"\n  EndOfFile@\"\"\n"
    );
    let diagnostics = tree.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "unexpected identifier");
    assert_eq!(diagnostics[0].span, Span::new(2, 3));
}

#[test]
fn non_expression_statement_start() {
    let tree = parse("]", EntryPoint::Statement);
    let messages: Vec<_> = tree.diagnostics().into_iter().map(|d| d.message).collect();
    assert_eq!(
        messages,
        ["expected expression", "expected ;", "unexpected ]"]
    );
}

#[test]
fn nested_parentheses() {
    let depth = 200;
    let text = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let tree = parse(&text, EntryPoint::Expression);
    assert!(tree.diagnostics().is_empty());
    let deepest = tree
        .root()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::ParenthesizedExpression)
        .count();
    assert_eq!(deepest, depth);
}
