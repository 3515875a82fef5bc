//! Raw token tags.
//!
//! Tags are grouped into `#[repr(u8)]` ranges:
//!
//! | Range   | Category |
//! |---------|----------|
//! | 0-15    | Identifiers and literals |
//! | 32-71   | Operators and delimiters |
//! | 112-121 | Trivia |
//! | 240-247 | Errors |
//! | 255     | End of input |

/// Tag of a raw token. Keywords are not resolved at this level.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum RawTag {
    // === Identifiers and literals (0-15) ===
    Ident = 0,
    Int = 1,
    Float = 2,
    String = 3,
    Char = 4,

    // === Operators and delimiters (32-71) ===
    Plus = 32,
    Minus = 33,
    Star = 34,
    Slash = 35,
    Percent = 36,
    Bang = 37,
    Tilde = 38,
    Ampersand = 39,
    Pipe = 40,
    Caret = 41,
    Equal = 42,
    EqualEqual = 43,
    BangEqual = 44,
    Less = 45,
    LessEqual = 46,
    Greater = 47,
    GreaterEqual = 48,
    AmpersandAmpersand = 49,
    PipePipe = 50,
    PlusEqual = 51,
    MinusEqual = 52,
    StarEqual = 53,
    SlashEqual = 54,
    Arrow = 55,
    Dot = 56,
    Question = 57,
    Colon = 58,
    Comma = 59,
    Semicolon = 60,
    LeftParen = 64,
    RightParen = 65,
    LeftBrace = 66,
    RightBrace = 67,
    LeftBracket = 68,
    RightBracket = 69,

    // === Trivia (112-121) ===
    Whitespace = 112,
    /// `\n`, `\r\n`, or a lone `\r`.
    Newline = 113,
    LineComment = 114,
    /// `///` followed by anything but another `/`.
    DocComment = 115,
    BlockComment = 116,
    /// `#name ...` to end of line, at line start, in directive mode.
    Directive = 117,
    /// Seven `<`, `|`, `=` or `>` at line start, through end of line.
    ConflictMarker = 118,
    /// U+FEFF at offset zero.
    ByteOrderMark = 119,

    // === Errors (240-247) ===
    /// A character that starts no token.
    InvalidByte = 240,
    UnterminatedString = 241,
    UnterminatedChar = 242,
    UnterminatedBlockComment = 243,
    /// Digits run into letters, or an exponent without digits.
    InvalidNumber = 244,
    InteriorNull = 245,

    // === Control ===
    Eof = 255,
}

impl RawTag {
    /// Fixed source text for operators and delimiters.
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            RawTag::Plus => "+",
            RawTag::Minus => "-",
            RawTag::Star => "*",
            RawTag::Slash => "/",
            RawTag::Percent => "%",
            RawTag::Bang => "!",
            RawTag::Tilde => "~",
            RawTag::Ampersand => "&",
            RawTag::Pipe => "|",
            RawTag::Caret => "^",
            RawTag::Equal => "=",
            RawTag::EqualEqual => "==",
            RawTag::BangEqual => "!=",
            RawTag::Less => "<",
            RawTag::LessEqual => "<=",
            RawTag::Greater => ">",
            RawTag::GreaterEqual => ">=",
            RawTag::AmpersandAmpersand => "&&",
            RawTag::PipePipe => "||",
            RawTag::PlusEqual => "+=",
            RawTag::MinusEqual => "-=",
            RawTag::StarEqual => "*=",
            RawTag::SlashEqual => "/=",
            RawTag::Arrow => "->",
            RawTag::Dot => ".",
            RawTag::Question => "?",
            RawTag::Colon => ":",
            RawTag::Comma => ",",
            RawTag::Semicolon => ";",
            RawTag::LeftParen => "(",
            RawTag::RightParen => ")",
            RawTag::LeftBrace => "{",
            RawTag::RightBrace => "}",
            RawTag::LeftBracket => "[",
            RawTag::RightBracket => "]",
            _ => return None,
        };
        Some(text)
    }

    /// Whitespace, line breaks, comments, directives, conflict markers and
    /// the byte-order mark.
    #[inline]
    pub fn is_trivia(self) -> bool {
        (self as u8) >= RawTag::Whitespace as u8 && (self as u8) <= RawTag::ByteOrderMark as u8
    }

    /// Malformed input the cooker reports a diagnostic for.
    #[inline]
    pub fn is_error(self) -> bool {
        (self as u8) >= RawTag::InvalidByte as u8 && self != RawTag::Eof
    }
}

/// One scanned token: its tag and byte length. Never longer than the
/// remaining input; zero-length only for [`RawTag::Eof`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

const _: () = assert!(std::mem::size_of::<RawToken>() == 8);
