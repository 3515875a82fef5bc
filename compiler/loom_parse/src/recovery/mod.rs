//! Token sets for recovery decisions.
//!
//! Every token kind's discriminant is below 128, so a set is one `u128` and
//! membership is a shift and a mask.

use loom_ir::SyntaxKind;

/// Set of token kinds.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TokenSet(u128);

impl TokenSet {
    pub const fn new(kinds: &[SyntaxKind]) -> TokenSet {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1u128 << kinds[i].index();
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, kind: SyntaxKind) -> bool {
        self.0 & (1u128 << kind.index()) != 0
    }
}

/// Tokens that begin an expression.
pub(crate) const EXPR_START: TokenSet = TokenSet::new(&[
    SyntaxKind::Identifier,
    SyntaxKind::IntLiteral,
    SyntaxKind::FloatLiteral,
    SyntaxKind::StringLiteral,
    SyntaxKind::CharLiteral,
    SyntaxKind::TrueKw,
    SyntaxKind::FalseKw,
    SyntaxKind::NullKw,
    SyntaxKind::OpenParen,
    SyntaxKind::Minus,
    SyntaxKind::Bang,
]);

/// Keywords naming a built-in type.
pub(crate) const PREDEFINED_TYPES: TokenSet = TokenSet::new(&[
    SyntaxKind::IntKw,
    SyntaxKind::FloatKw,
    SyntaxKind::BoolKw,
    SyntaxKind::StringKw,
    SyntaxKind::CharKw,
    SyntaxKind::VoidKw,
    SyntaxKind::VarKw,
]);

/// Tokens that begin a statement.
pub(crate) const STMT_START: TokenSet = EXPR_START.union(PREDEFINED_TYPES).union(TokenSet::new(&[
    SyntaxKind::OpenBrace,
    SyntaxKind::Semicolon,
    SyntaxKind::IfKw,
    SyntaxKind::WhileKw,
    SyntaxKind::ReturnKw,
    SyntaxKind::BreakKw,
    SyntaxKind::ContinueKw,
]));

/// Where anything nested in an item gives up: the next function or the end.
pub(crate) const ITEM_RECOVERY: TokenSet =
    TokenSet::new(&[SyntaxKind::FnKw, SyntaxKind::EndOfFile]);

/// Binary and assignment operators: `(left, right)` binding power and the
/// node kind they build. Assignment is right associative.
pub(crate) fn infix_binding_power(kind: SyntaxKind) -> Option<(u8, u8, SyntaxKind)> {
    let (left, right) = match kind {
        SyntaxKind::Eq
        | SyntaxKind::PlusEq
        | SyntaxKind::MinusEq
        | SyntaxKind::StarEq
        | SyntaxKind::SlashEq => return Some((1, 1, SyntaxKind::AssignmentExpression)),
        SyntaxKind::PipePipe => (2, 3),
        SyntaxKind::AmpAmp => (4, 5),
        SyntaxKind::EqEq | SyntaxKind::BangEq => (6, 7),
        SyntaxKind::Less | SyntaxKind::LessEq | SyntaxKind::Greater | SyntaxKind::GreaterEq => {
            (8, 9)
        }
        SyntaxKind::Plus | SyntaxKind::Minus => (10, 11),
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => (12, 13),
        _ => return None,
    };
    Some((left, right, SyntaxKind::BinaryExpression))
}

/// Binding power of a prefix operand: above every binary operator, below
/// postfix call, member and element access.
pub(crate) const PREFIX_BINDING_POWER: u8 = 14;

#[cfg(test)]
mod tests;
