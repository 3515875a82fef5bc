//! Process-wide cache of trivia-free tokens.
//!
//! Most tokens of a program are short keywords, punctuation and identifiers
//! with no trivia and no diagnostics. Those are immutable values, so every
//! tree in the process can share a single allocation per `(kind, text)`.
//!
//! The map is keyed by kind and an Fx hash of the text. A hit is checked
//! against the requested text, and a hash collision simply yields a fresh,
//! uncached token. The cache stops growing at [`MAX_ENTRIES`].

use std::hash::BuildHasher;
use std::sync::LazyLock;

use dashmap::DashMap;
use loom_ir::SyntaxKind;
use rustc_hash::FxBuildHasher;

use crate::GreenToken;

/// Longest token text the cache stores.
pub const MAX_TEXT_LEN: usize = 16;

/// Upper bound on cached tokens.
pub const MAX_ENTRIES: usize = 1 << 16;

type TokenMap = DashMap<(SyntaxKind, u64), GreenToken, FxBuildHasher>;

static TOKENS: LazyLock<TokenMap> = LazyLock::new(|| DashMap::with_hasher(FxBuildHasher));

/// A trivia-free, diagnostic-free token, shared when possible.
pub fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    if text.len() > MAX_TEXT_LEN {
        return GreenToken::new(kind, text);
    }
    let key = (kind, FxBuildHasher.hash_one(text));

    if let Some(hit) = TOKENS.get(&key) {
        if hit.text() == text {
            return hit.clone();
        }
        return GreenToken::new(kind, text);
    }
    if TOKENS.len() >= MAX_ENTRIES {
        return GreenToken::new(kind, text);
    }

    let cached = TOKENS
        .entry(key)
        .or_insert_with(|| GreenToken::new(kind, text))
        .clone();
    if cached.text() == text {
        cached
    } else {
        GreenToken::new(kind, text)
    }
}

/// Number of cached tokens.
pub fn len() -> usize {
    TOKENS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_shares_allocation() {
        let a = token(SyntaxKind::Semicolon, ";");
        let b = token(SyntaxKind::Semicolon, ";");
        assert!(a.ptr_eq(&b));
        assert!(len() > 0);
    }

    #[test]
    fn test_kind_is_part_of_the_key() {
        let ident = token(SyntaxKind::Identifier, "int");
        let keyword = token(SyntaxKind::IntKw, "int");
        assert!(!ident.ptr_eq(&keyword));
        assert_eq!(keyword.kind(), SyntaxKind::IntKw);
    }

    #[test]
    fn test_long_text_is_not_cached() {
        let text = "a_rather_long_identifier_name";
        let a = token(SyntaxKind::Identifier, text);
        let b = token(SyntaxKind::Identifier, text);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_concurrent_lookups_agree() {
        use rayon::prelude::*;

        let tokens: Vec<_> = (0..64)
            .into_par_iter()
            .map(|_| token(SyntaxKind::Identifier, "shared_x"))
            .collect();
        assert!(tokens.windows(2).all(|w| w[0].ptr_eq(&w[1])));
    }
}
