use std::fmt;

use loom_ir::Span;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic attached to a tree element.
///
/// `offset` is relative to the start of the owning token or node (leading
/// trivia included), so the diagnostic travels with the element when an
/// unchanged subtree is reused at a different absolute position.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[must_use = "diagnostics should be attached to a tree element, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    /// Positional arguments for the code's message template.
    pub args: Vec<String>,
    pub offset: u32,
    pub width: u32,
}

impl Diagnostic {
    /// Create an error at `offset..offset + width` of its owner.
    pub fn error(code: ErrorCode, offset: u32, width: u32) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            args: Vec::new(),
            offset,
            width,
        }
    }

    /// Add a message argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Move the diagnostic by `delta` bytes inside a larger owner.
    pub fn shifted(mut self, delta: u32) -> Self {
        self.offset += delta;
        self
    }

    /// Render the message template with this diagnostic's arguments.
    ///
    /// Placeholders without a matching argument are left as written.
    pub fn message(&self) -> String {
        let template = self.code.template();
        let mut out = String::with_capacity(template.len() + 16);
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}');
            let arg = close
                .and_then(|close| after[..close].parse::<usize>().ok())
                .and_then(|index| self.args.get(index));
            match (arg, close) {
                (Some(arg), Some(close)) => {
                    out.push_str(arg);
                    rest = &after[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Resolve against the absolute start of the owner.
    pub fn positioned(&self, owner_start: u32) -> PositionedDiagnostic {
        PositionedDiagnostic {
            code: self.code,
            severity: self.severity,
            message: self.message(),
            span: Span::at(owner_start + self.offset, self.width),
        }
    }
}

/// A diagnostic resolved to an absolute span with its message rendered.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PositionedDiagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl PositionedDiagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for PositionedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {}",
            self.severity, self.code, self.message, self.span
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_substitutes_args() {
        let diag = Diagnostic::error(ErrorCode::E1001, 0, 0).with_arg(";");
        assert_eq!(diag.message(), "expected ;");
    }

    #[test]
    fn test_message_keeps_unmatched_placeholder() {
        let diag = Diagnostic::error(ErrorCode::E1003, 0, 1);
        assert_eq!(diag.message(), "unexpected {0}");
    }

    #[test]
    fn test_positioned_adds_owner_start() {
        let diag = Diagnostic::error(ErrorCode::E1002, 1, 0);
        let positioned = diag.positioned(10);
        assert_eq!(positioned.span, Span::new(11, 11));
        assert_eq!(positioned.message, "expected expression");
        assert!(positioned.is_error());
        assert_eq!(
            positioned.to_string(),
            "error[E1002]: expected expression at 11..11"
        );
    }

    #[test]
    fn test_shifted() {
        let diag = Diagnostic::error(ErrorCode::E0002, 2, 1).shifted(3);
        assert_eq!(diag.offset, 5);
        assert_eq!(diag.width, 1);
    }
}
