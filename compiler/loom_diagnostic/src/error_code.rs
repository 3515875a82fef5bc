use std::fmt;

/// Stable codes for syntax diagnostics. `E0xxx` come from the lexer,
/// `E1xxx` from the parser.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    /// String literal without a closing quote
    E0001,
    /// Character that starts no token
    E0002,
    /// Malformed numeric literal
    E0003,
    /// Character literal without a closing quote
    E0004,
    /// Unterminated block comment
    E0005,
    /// Merge conflict marker
    E0006,
    /// NUL byte inside the text
    E0007,
    /// Unknown preprocessor directive
    E0008,

    /// Expected a specific token
    E1001,
    /// Expected expression
    E1002,
    /// Unexpected token, skipped during recovery
    E1003,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
    ];

    /// Raised while scanning.
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Raised by the grammar or its recovery.
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// The printed code.
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
        }
    }

    /// Message template. `{0}`, `{1}`, ... are replaced by the diagnostic's
    /// arguments in order.
    pub fn template(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character {0}",
            ErrorCode::E0003 => "invalid number literal {0}",
            ErrorCode::E0004 => "unterminated character literal",
            ErrorCode::E0005 => "unterminated block comment",
            ErrorCode::E0006 => "merge conflict marker encountered",
            ErrorCode::E0007 => "unexpected NUL character",
            ErrorCode::E0008 => "unknown directive {0}",
            ErrorCode::E1001 => "expected {0}",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unexpected {0}",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
