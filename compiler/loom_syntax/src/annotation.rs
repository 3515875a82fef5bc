//! Syntax annotations.
//!
//! An annotation is an opaque marker a client attaches to a node or token
//! (for example "rename target" or "formatter: keep"). Annotations are part of
//! the core element, so they survive structural sharing: a reused subtree
//! carries its annotations into the new tree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A marker attached to a core tree element.
///
/// Each call to [`SyntaxAnnotation::new`] produces a distinct annotation,
/// even with the same kind and data.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SyntaxAnnotation {
    id: u64,
    kind: Arc<str>,
    data: Option<Arc<str>>,
}

impl SyntaxAnnotation {
    pub fn new(kind: impl Into<Arc<str>>) -> Self {
        SyntaxAnnotation {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            kind: kind.into(),
            data: None,
        }
    }

    pub fn with_data(kind: impl Into<Arc<str>>, data: impl Into<Arc<str>>) -> Self {
        SyntaxAnnotation {
            data: Some(data.into()),
            ..SyntaxAnnotation::new(kind)
        }
    }

    /// Rebuild a decoded annotation. Fresh ids stay above every decoded one.
    #[cfg(feature = "persist")]
    pub(crate) fn from_parts(id: u64, kind: &str, data: Option<&str>) -> Self {
        NEXT_ID.fetch_max(id + 1, Ordering::Relaxed);
        SyntaxAnnotation {
            id,
            kind: kind.into(),
            data: data.map(Into::into),
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl fmt::Debug for SyntaxAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(data) => write!(f, "@{}#{}({data})", self.kind, self.id),
            None => write!(f, "@{}#{}", self.kind, self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotations_are_distinct() {
        let a = SyntaxAnnotation::new("rename");
        let b = SyntaxAnnotation::new("rename");
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
        assert_eq!(a.kind(), "rename");
        assert_eq!(a.data(), None);
    }

    #[test]
    fn test_annotation_data() {
        let a = SyntaxAnnotation::with_data("format", "keep");
        assert_eq!(a.data(), Some("keep"));
    }
}
