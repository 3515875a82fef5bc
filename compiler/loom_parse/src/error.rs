//! Parse errors.
//!
//! Malformed source never produces an error here: it becomes diagnostics in
//! the tree. These types cover the caller side only.

use loom_ir::TextError;

/// Why a parse did not produce a tree.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("parse was cancelled")]
    Cancelled,
}

/// Why a re-parse did not produce a tree.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ReparseError {
    /// The edits do not apply to the old text.
    #[error("invalid edit: {0}")]
    Text(#[from] TextError),
    #[error("re-parse was cancelled")]
    Cancelled,
}

impl From<ParseError> for ReparseError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Cancelled => ReparseError::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use loom_ir::Span;

    use super::*;

    #[test]
    fn messages() {
        assert_eq!(ParseError::Cancelled.to_string(), "parse was cancelled");
        let error = ReparseError::from(TextError::OutOfRange {
            span: Span::new(3, 9),
            len: 4,
        });
        assert!(error.to_string().starts_with("invalid edit: "));
        assert_eq!(
            ReparseError::from(ParseError::Cancelled),
            ReparseError::Cancelled
        );
    }
}
