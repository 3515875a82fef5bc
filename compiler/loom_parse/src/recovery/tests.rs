use loom_ir::SyntaxKind;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_set_contains_nothing() {
    assert!(SyntaxKind::ALL
        .iter()
        .all(|&kind| !TokenSet::default().contains(kind)));
}

#[test]
fn sets_nest() {
    for kind in SyntaxKind::ALL {
        if EXPR_START.contains(kind) {
            assert!(STMT_START.contains(kind), "{kind:?}");
        }
    }
    assert!(!STMT_START.contains(SyntaxKind::FnKw));
    assert!(!STMT_START.contains(SyntaxKind::CloseBrace));
    assert!(ITEM_RECOVERY.contains(SyntaxKind::FnKw));
}

#[test]
fn predefined_types_match_kind_classification() {
    for kind in SyntaxKind::ALL {
        assert_eq!(PREDEFINED_TYPES.contains(kind), kind.is_predefined_type());
    }
}

#[test]
fn highest_kind_fits() {
    let set = TokenSet::new(&[SyntaxKind::LAST]);
    assert!(set.contains(SyntaxKind::LAST));
    assert!(!set.contains(SyntaxKind::EndOfFile));
}

#[test]
fn precedence_ladder() {
    let power = |kind| infix_binding_power(kind).map(|(left, _, _)| left).unwrap();
    assert!(power(SyntaxKind::Eq) < power(SyntaxKind::PipePipe));
    assert!(power(SyntaxKind::PipePipe) < power(SyntaxKind::AmpAmp));
    assert!(power(SyntaxKind::AmpAmp) < power(SyntaxKind::EqEq));
    assert!(power(SyntaxKind::EqEq) < power(SyntaxKind::Less));
    assert!(power(SyntaxKind::Less) < power(SyntaxKind::Plus));
    assert!(power(SyntaxKind::Plus) < power(SyntaxKind::Star));
    assert!(power(SyntaxKind::Star) < PREFIX_BINDING_POWER);
    assert_eq!(infix_binding_power(SyntaxKind::Amp), None);
    assert_eq!(
        infix_binding_power(SyntaxKind::PlusEq).map(|(_, _, kind)| kind),
        Some(SyntaxKind::AssignmentExpression)
    );
}
