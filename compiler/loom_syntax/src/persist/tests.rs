#![allow(clippy::unwrap_used, clippy::expect_used)]

use loom_diagnostic::{Diagnostic, ErrorCode};
use loom_ir::SyntaxKind;
use pretty_assertions::assert_eq;

use super::*;
use crate::fixture::{sample, SAMPLE};
use crate::SyntaxNode;

#[test]
fn decode_restores_structure_and_text() {
    let green = sample();
    let bytes = encode(&green).unwrap();
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded, green);
    assert_eq!(decoded.full_text(), SAMPLE);
    assert_eq!(decoded.debug_tree(), green.debug_tree());
}

#[test]
fn texts_are_interned() {
    // `x`, `=`, ` ` and `;` each occur several times but are stored once.
    let bytes = encode(&sample()).unwrap();
    let tree: PersistedTree = bincode::deserialize(&bytes).unwrap();
    let mut texts = tree.texts.clone();
    texts.sort();
    texts.dedup();
    assert_eq!(texts.len(), tree.texts.len());
    assert!(tree.texts.iter().any(|t| t == "/// doc"));
}

#[test]
fn diagnostics_annotations_and_missing_tokens_survive() {
    let root = SyntaxNode::new_root(sample());
    let decl = root.child_nodes().next().unwrap();
    let mark = SyntaxAnnotation::with_data("format", "keep");
    let green = crate::edit::with_annotations(&root, &decl, vec![mark.clone()]).unwrap();

    let missing = crate::GreenToken::missing(SyntaxKind::Semicolon)
        .with_diagnostics(vec![Diagnostic::error(ErrorCode::E1001, 0, 0).with_arg(";")]);
    let stmt = crate::GreenNode::new(
        SyntaxKind::ExpressionStatement,
        [
            crate::GreenNode::new(
                SyntaxKind::NameExpression,
                [crate::GreenToken::new(SyntaxKind::Identifier, "y").into()],
            )
            .into(),
            missing.into(),
        ],
    );
    let green = crate::edit::replace_child(&green, 1, stmt.into()).unwrap();

    let decoded = decode(&encode(&green).unwrap()).unwrap();
    assert_eq!(decoded, green);
    assert!(decoded.contains_missing());
    assert!(decoded.contains_diagnostics());
    let decl = decoded.children()[0].element.as_node().unwrap();
    assert_eq!(decl.annotations(), &[mark]);
}

#[test]
fn decoded_annotation_ids_stay_unique() {
    let mark = SyntaxAnnotation::new("pinned");
    let green = sample().with_annotations(vec![mark.clone()]);
    let decoded = decode(&encode(&green).unwrap()).unwrap();
    let fresh = SyntaxAnnotation::new("pinned");
    assert!(fresh.id() > decoded.annotations()[0].id());
}

#[test]
fn garbage_is_rejected() {
    assert!(matches!(decode(b"nope"), Err(PersistError::Codec(_))));

    let mut tree: PersistedTree = bincode::deserialize(&encode(&sample()).unwrap()).unwrap();
    tree.magic = *b"JUNK";
    let bytes = bincode::serialize(&tree).unwrap();
    assert!(matches!(decode(&bytes), Err(PersistError::BadMagic)));

    tree.magic = MAGIC;
    tree.version = 99;
    let bytes = bincode::serialize(&tree).unwrap();
    assert!(matches!(
        decode(&bytes),
        Err(PersistError::UnsupportedVersion { found: 99 })
    ));
}

#[test]
fn dangling_text_index_is_an_error() {
    let mut tree: PersistedTree = bincode::deserialize(&encode(&sample()).unwrap()).unwrap();
    tree.texts.truncate(1);
    let bytes = bincode::serialize(&tree).unwrap();
    assert!(matches!(
        decode(&bytes),
        Err(PersistError::TextIndex { len: 1, .. })
    ));
}

#[test]
fn kinds_must_fit_their_role() {
    let mut tree: PersistedTree = bincode::deserialize(&encode(&sample()).unwrap()).unwrap();
    let Some(PersistedElement::Node(root)) = tree.elements.last_mut() else {
        panic!("the root record comes last");
    };
    root.kind = SyntaxKind::Semicolon;
    let bytes = bincode::serialize(&tree).unwrap();
    assert!(matches!(
        decode(&bytes),
        Err(PersistError::KindMismatch { role: "node", .. })
    ));
}

#[test]
fn elements_must_form_one_tree() {
    let tree: PersistedTree = bincode::deserialize(&encode(&sample()).unwrap()).unwrap();
    let reencode = |tree: &PersistedTree| bincode::serialize(tree).unwrap();

    // Without the root record the top-level children are left over.
    let mut headless: PersistedTree = bincode::deserialize(&reencode(&tree)).unwrap();
    headless.elements.pop();
    assert!(matches!(decode(&reencode(&headless)), Err(PersistError::Shape)));

    // A node cannot claim more children than precede it.
    let mut greedy: PersistedTree = bincode::deserialize(&reencode(&tree)).unwrap();
    if let Some(PersistedElement::Node(root)) = greedy.elements.last_mut() {
        root.children += 1;
    }
    assert!(matches!(decode(&reencode(&greedy)), Err(PersistError::Shape)));

    let mut empty = tree;
    empty.elements.clear();
    assert!(matches!(decode(&reencode(&empty)), Err(PersistError::Shape)));
}

#[test]
fn deep_nesting_round_trips() {
    let depth = 100_000;
    let mut green = crate::GreenNode::new(
        SyntaxKind::NameExpression,
        [crate::GreenToken::new(SyntaxKind::Identifier, "x").into()],
    );
    for _ in 0..depth {
        green = crate::GreenNode::new(
            SyntaxKind::ParenthesizedExpression,
            [
                crate::GreenToken::new(SyntaxKind::OpenParen, "(").into(),
                green.into(),
                crate::GreenToken::new(SyntaxKind::CloseParen, ")").into(),
            ],
        );
    }
    let decoded = decode(&encode(&green).unwrap()).unwrap();
    assert_eq!(decoded.width() as usize, 2 * depth + 1);
    assert_eq!(decoded, green);
    assert!(!decoded.ptr_eq(&green));
}

mod properties {
    use proptest::prelude::*;

    use super::*;
    use crate::{GreenToken, GreenTrivia};

    fn trivia() -> impl Strategy<Value = Vec<GreenTrivia>> {
        prop::collection::vec(
            prop_oneof![
                "[ \t]{1,3}".prop_map(|s| GreenTrivia::new(SyntaxKind::Whitespace, s)),
                Just(GreenTrivia::new(SyntaxKind::EndOfLine, "\n")),
                "// [a-z ]{0,8}".prop_map(|s| GreenTrivia::new(SyntaxKind::LineComment, s)),
            ],
            0..3,
        )
    }

    fn token() -> impl Strategy<Value = GreenToken> {
        (
            prop_oneof![
                "[a-z_][a-z0-9_]{0,5}".prop_map(|s| (SyntaxKind::Identifier, s)),
                "[0-9]{1,4}".prop_map(|s| (SyntaxKind::IntLiteral, s)),
                Just((SyntaxKind::Semicolon, ";".to_owned())),
            ],
            trivia(),
            trivia(),
        )
            .prop_map(|((kind, text), leading, trailing)| {
                GreenToken::with_trivia(kind, &text, leading, trailing)
            })
    }

    proptest! {
        #[test]
        fn any_statement_list_survives(tokens in prop::collection::vec(prop::collection::vec(token(), 1..5), 0..8)) {
            let green = crate::GreenNode::new(
                SyntaxKind::CompilationUnit,
                tokens.into_iter().map(|stmt| {
                    crate::GreenNode::new(
                        SyntaxKind::ExpressionStatement,
                        stmt.into_iter().map(Into::into),
                    )
                    .into()
                }),
            );
            let decoded = decode(&encode(&green).unwrap()).unwrap();
            prop_assert_eq!(decoded.full_text(), green.full_text());
            prop_assert_eq!(decoded, green);
        }
    }
}
