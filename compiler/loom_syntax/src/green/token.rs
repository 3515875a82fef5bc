use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use loom_diagnostic::Diagnostic;
use loom_ir::SyntaxKind;

use super::{GreenFlags, GreenTrivia};
use crate::SyntaxAnnotation;

/// A token of the core tree.
///
/// Cheap to clone. Two tokens compare equal when their contents are equal;
/// use [`GreenToken::ptr_eq`] for identity.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct GreenToken(Arc<GreenTokenData>);

/// Contents of a [`GreenToken`].
#[derive(Eq, PartialEq, Hash)]
pub struct GreenTokenData {
    kind: SyntaxKind,
    flags: GreenFlags,
    leading_width: u32,
    width: u32,
    text: Box<str>,
    leading: Box<[GreenTrivia]>,
    trailing: Box<[GreenTrivia]>,
    diagnostics: Box<[Diagnostic]>,
    annotations: Box<[SyntaxAnnotation]>,
}

impl GreenToken {
    /// A token without trivia.
    pub fn new(kind: SyntaxKind, text: &str) -> Self {
        Self::with_trivia(kind, text, Vec::new(), Vec::new())
    }

    pub fn with_trivia(
        kind: SyntaxKind,
        text: &str,
        leading: Vec<GreenTrivia>,
        trailing: Vec<GreenTrivia>,
    ) -> Self {
        GreenToken::from_parts(
            kind,
            text.into(),
            leading.into(),
            trailing.into(),
            Box::default(),
            Box::default(),
            false,
        )
    }

    /// A zero-width token inserted by error recovery.
    pub fn missing(kind: SyntaxKind) -> Self {
        GreenToken::from_parts(
            kind,
            Box::default(),
            Box::default(),
            Box::default(),
            Box::default(),
            Box::default(),
            true,
        )
    }

    fn from_parts(
        kind: SyntaxKind,
        text: Box<str>,
        leading: Box<[GreenTrivia]>,
        trailing: Box<[GreenTrivia]>,
        diagnostics: Box<[Diagnostic]>,
        annotations: Box<[SyntaxAnnotation]>,
        missing: bool,
    ) -> Self {
        debug_assert!(kind.is_token(), "{kind:?} is not a token kind");
        let mut flags = GreenFlags::empty();
        for piece in leading.iter().chain(trailing.iter()) {
            match piece.kind() {
                SyntaxKind::SkippedText => flags |= GreenFlags::CONTAINS_SKIPPED,
                SyntaxKind::Directive => flags |= GreenFlags::CONTAINS_DIRECTIVES,
                _ => {}
            }
        }
        flags.set(GreenFlags::CONTAINS_DIAGNOSTICS, !diagnostics.is_empty());
        flags.set(GreenFlags::CONTAINS_ANNOTATIONS, !annotations.is_empty());
        flags.set(GreenFlags::IS_MISSING, missing);

        let leading_width: u32 = leading.iter().map(GreenTrivia::width).sum();
        let trailing_width: u32 = trailing.iter().map(GreenTrivia::width).sum();
        let width = leading_width + text.len() as u32 + trailing_width;

        GreenToken(Arc::new(GreenTokenData {
            kind,
            flags,
            leading_width,
            width,
            text,
            leading,
            trailing,
            diagnostics,
            annotations,
        }))
    }

    /// Copy of this token with `diagnostics` replacing its own.
    #[must_use]
    pub fn with_diagnostics(&self, diagnostics: Vec<Diagnostic>) -> GreenToken {
        GreenToken::from_parts(
            self.kind,
            self.text.clone(),
            self.leading.clone(),
            self.trailing.clone(),
            diagnostics.into(),
            self.annotations.clone(),
            self.is_missing(),
        )
    }

    /// Copy of this token with `annotations` replacing its own.
    #[must_use]
    pub fn with_annotations(&self, annotations: Vec<SyntaxAnnotation>) -> GreenToken {
        GreenToken::from_parts(
            self.kind,
            self.text.clone(),
            self.leading.clone(),
            self.trailing.clone(),
            self.diagnostics.clone(),
            annotations.into(),
            self.is_missing(),
        )
    }

    /// Copy of this token with `trivia` placed in front of its leading trivia.
    ///
    /// Existing diagnostics move right by the added width; `diagnostics` are
    /// added as given, relative to the new token start.
    #[must_use]
    pub fn prepend_leading(
        &self,
        trivia: Vec<GreenTrivia>,
        diagnostics: Vec<Diagnostic>,
    ) -> GreenToken {
        let added: u32 = trivia.iter().map(GreenTrivia::width).sum();
        let mut leading = trivia;
        leading.extend(self.leading.iter().cloned());
        let mut all = diagnostics;
        all.extend(self.diagnostics.iter().cloned().map(|d| d.shifted(added)));
        GreenToken::from_parts(
            self.kind,
            self.text.clone(),
            leading.into(),
            self.trailing.clone(),
            all.into(),
            self.annotations.clone(),
            self.is_missing(),
        )
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &GreenToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const GreenTokenData {
        Arc::as_ptr(&self.0)
    }
}

impl Deref for GreenToken {
    type Target = GreenTokenData;

    #[inline]
    fn deref(&self) -> &GreenTokenData {
        &self.0
    }
}

impl GreenTokenData {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn flags(&self) -> GreenFlags {
        self.flags
    }

    /// The token text, without trivia.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn leading_trivia(&self) -> &[GreenTrivia] {
        &self.leading
    }

    #[inline]
    pub fn trailing_trivia(&self) -> &[GreenTrivia] {
        &self.trailing
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn annotations(&self) -> &[SyntaxAnnotation] {
        &self.annotations
    }

    /// Full width: leading trivia, text and trailing trivia.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn leading_width(&self) -> u32 {
        self.leading_width
    }

    #[inline]
    pub fn trailing_width(&self) -> u32 {
        self.width - self.leading_width - self.text.len() as u32
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(GreenFlags::IS_MISSING)
    }

    /// Whether the token carries skipped text from recovery.
    #[inline]
    pub fn contains_skipped_text(&self) -> bool {
        self.flags.contains(GreenFlags::CONTAINS_SKIPPED)
    }

    /// A token the lexer alone determines: present, error free, and with no
    /// recovery trivia. Only such tokens are carried over by re-lexing.
    pub fn is_reusable(&self) -> bool {
        !self.is_missing()
            && self.diagnostics.is_empty()
            && !self.contains_skipped_text()
            && self.width > 0
    }

    /// Source text including trivia.
    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(self.width as usize);
        self.write_full_text(&mut out);
        out
    }

    pub fn write_full_text(&self, out: &mut String) {
        for piece in self.leading.iter() {
            out.push_str(piece.text());
        }
        out.push_str(&self.text);
        for piece in self.trailing.iter() {
            out.push_str(piece.text());
        }
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            return write!(f, "{:?}@missing", self.kind);
        }
        write!(f, "{:?}@{:?}", self.kind, self.text())
    }
}
