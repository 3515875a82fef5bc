//! The kind space shared by tokens, trivia and nodes.
//!
//! One `#[repr(u8)]` enum covers everything a core tree can hold, laid out in
//! contiguous ranges so classification is a pair of comparisons:
//!
//! | Range   | Category     |
//! |---------|--------------|
//! | 0-6     | Literal-ish tokens (EOF, identifier, literals, bad token) |
//! | 7-23    | Keywords     |
//! | 24-58   | Punctuation and operators |
//! | 59-67   | Trivia       |
//! | 68-     | Nodes        |
//!
//! Every discriminant stays below 128 so recovery sets fit in a `u128`.

/// Kind of a token, trivia piece, or syntax node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SyntaxKind {
    // === Literal-ish tokens (0-6) ===
    EndOfFile = 0,
    Identifier,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BadToken,

    // === Keywords (7-23) ===
    FnKw,
    IfKw,
    ElseKw,
    WhileKw,
    ReturnKw,
    BreakKw,
    ContinueKw,
    TrueKw,
    FalseKw,
    NullKw,
    IntKw,
    FloatKw,
    BoolKw,
    StringKw,
    CharKw,
    VoidKw,
    VarKw,

    // === Punctuation and operators (24-58) ===
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    Arrow,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Tilde,
    Amp,
    Pipe,
    Caret,
    Eq,
    EqEq,
    BangEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    AmpAmp,
    PipePipe,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    // === Trivia (59-67) ===
    Whitespace,
    EndOfLine,
    LineComment,
    BlockComment,
    DocComment,
    Directive,
    ConflictMarker,
    SkippedText,
    ByteOrderMark,

    // === Nodes (68-) ===
    CompilationUnit,
    ExpressionRoot,
    StatementRoot,
    FunctionDeclaration,
    ParameterList,
    Parameter,
    ReturnClause,
    PredefinedType,
    NamedType,
    Block,
    LocalDeclaration,
    EqualsValueClause,
    IfStatement,
    ElseClause,
    WhileStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ExpressionStatement,
    EmptyStatement,
    LiteralExpression,
    NameExpression,
    ParenthesizedExpression,
    PrefixUnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    CallExpression,
    ArgumentList,
    MemberAccessExpression,
    ElementAccessExpression,
}

impl SyntaxKind {
    const FIRST_KEYWORD: u8 = SyntaxKind::FnKw as u8;
    const LAST_KEYWORD: u8 = SyntaxKind::VarKw as u8;
    const FIRST_PUNCT: u8 = SyntaxKind::OpenParen as u8;
    const LAST_PUNCT: u8 = SyntaxKind::SlashEq as u8;
    const FIRST_TRIVIA: u8 = SyntaxKind::Whitespace as u8;
    const LAST_TRIVIA: u8 = SyntaxKind::ByteOrderMark as u8;
    const FIRST_NODE: u8 = SyntaxKind::CompilationUnit as u8;

    /// Highest discriminant in use.
    pub const LAST: SyntaxKind = SyntaxKind::ElementAccessExpression;

    /// Every kind, in discriminant order.
    pub const ALL: [SyntaxKind; SyntaxKind::LAST as usize + 1] = {
        use SyntaxKind as K;
        [
            K::EndOfFile, K::Identifier, K::IntLiteral, K::FloatLiteral, K::StringLiteral,
            K::CharLiteral, K::BadToken, K::FnKw, K::IfKw, K::ElseKw, K::WhileKw, K::ReturnKw,
            K::BreakKw, K::ContinueKw, K::TrueKw, K::FalseKw, K::NullKw, K::IntKw, K::FloatKw,
            K::BoolKw, K::StringKw, K::CharKw, K::VoidKw, K::VarKw, K::OpenParen, K::CloseParen,
            K::OpenBrace, K::CloseBrace, K::OpenBracket, K::CloseBracket, K::Semicolon, K::Comma,
            K::Dot, K::Colon, K::Question, K::Arrow, K::Plus, K::Minus, K::Star, K::Slash,
            K::Percent, K::Bang, K::Tilde, K::Amp, K::Pipe, K::Caret, K::Eq, K::EqEq, K::BangEq,
            K::Less, K::LessEq, K::Greater, K::GreaterEq, K::AmpAmp, K::PipePipe, K::PlusEq,
            K::MinusEq, K::StarEq, K::SlashEq, K::Whitespace, K::EndOfLine, K::LineComment,
            K::BlockComment, K::DocComment, K::Directive, K::ConflictMarker, K::SkippedText,
            K::ByteOrderMark, K::CompilationUnit, K::ExpressionRoot, K::StatementRoot,
            K::FunctionDeclaration, K::ParameterList, K::Parameter, K::ReturnClause,
            K::PredefinedType, K::NamedType, K::Block, K::LocalDeclaration, K::EqualsValueClause,
            K::IfStatement, K::ElseClause, K::WhileStatement, K::ReturnStatement,
            K::BreakStatement, K::ContinueStatement, K::ExpressionStatement, K::EmptyStatement,
            K::LiteralExpression, K::NameExpression, K::ParenthesizedExpression,
            K::PrefixUnaryExpression, K::BinaryExpression, K::AssignmentExpression,
            K::CallExpression, K::ArgumentList, K::MemberAccessExpression,
            K::ElementAccessExpression,
        ]
    };

    /// Discriminant value, used as a bit index by recovery sets.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Kind for a raw discriminant, or `None` when out of range.
    pub const fn from_raw(raw: u8) -> Option<SyntaxKind> {
        if (raw as usize) < Self::ALL.len() {
            Some(Self::ALL[raw as usize])
        } else {
            None
        }
    }

    /// Tokens: everything below the trivia range.
    #[inline]
    pub const fn is_token(self) -> bool {
        (self as u8) < Self::FIRST_TRIVIA
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        let raw = self as u8;
        raw >= Self::FIRST_TRIVIA && raw <= Self::LAST_TRIVIA
    }

    #[inline]
    pub const fn is_node(self) -> bool {
        (self as u8) >= Self::FIRST_NODE
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        let raw = self as u8;
        raw >= Self::FIRST_KEYWORD && raw <= Self::LAST_KEYWORD
    }

    #[inline]
    pub const fn is_punctuation(self) -> bool {
        let raw = self as u8;
        raw >= Self::FIRST_PUNCT && raw <= Self::LAST_PUNCT
    }

    /// Trivia that ends a line.
    #[inline]
    pub const fn is_end_of_line(self) -> bool {
        matches!(self, SyntaxKind::EndOfLine)
    }

    /// Comment trivia of any flavour.
    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::DocComment
        )
    }

    /// Keywords naming a built-in type.
    #[inline]
    pub const fn is_predefined_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntKw
                | SyntaxKind::FloatKw
                | SyntaxKind::BoolKw
                | SyntaxKind::StringKw
                | SyntaxKind::CharKw
                | SyntaxKind::VoidKw
                | SyntaxKind::VarKw
        )
    }

    /// Node kinds that the statement grammar produces.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::LocalDeclaration
                | SyntaxKind::IfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::BreakStatement
                | SyntaxKind::ContinueStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::EmptyStatement
        )
    }

    /// Node kinds that may appear directly in a compilation unit.
    pub const fn is_item(self) -> bool {
        matches!(self, SyntaxKind::FunctionDeclaration) || self.is_statement()
    }

    /// Keyword for an identifier-shaped lexeme, if it is reserved.
    pub fn keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "fn" => SyntaxKind::FnKw,
            "if" => SyntaxKind::IfKw,
            "else" => SyntaxKind::ElseKw,
            "while" => SyntaxKind::WhileKw,
            "return" => SyntaxKind::ReturnKw,
            "break" => SyntaxKind::BreakKw,
            "continue" => SyntaxKind::ContinueKw,
            "true" => SyntaxKind::TrueKw,
            "false" => SyntaxKind::FalseKw,
            "null" => SyntaxKind::NullKw,
            "int" => SyntaxKind::IntKw,
            "float" => SyntaxKind::FloatKw,
            "bool" => SyntaxKind::BoolKw,
            "string" => SyntaxKind::StringKw,
            "char" => SyntaxKind::CharKw,
            "void" => SyntaxKind::VoidKw,
            "var" => SyntaxKind::VarKw,
            _ => return None,
        };
        Some(kind)
    }

    /// The only text a keyword or punctuation token can have.
    pub const fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::FnKw => "fn",
            SyntaxKind::IfKw => "if",
            SyntaxKind::ElseKw => "else",
            SyntaxKind::WhileKw => "while",
            SyntaxKind::ReturnKw => "return",
            SyntaxKind::BreakKw => "break",
            SyntaxKind::ContinueKw => "continue",
            SyntaxKind::TrueKw => "true",
            SyntaxKind::FalseKw => "false",
            SyntaxKind::NullKw => "null",
            SyntaxKind::IntKw => "int",
            SyntaxKind::FloatKw => "float",
            SyntaxKind::BoolKw => "bool",
            SyntaxKind::StringKw => "string",
            SyntaxKind::CharKw => "char",
            SyntaxKind::VoidKw => "void",
            SyntaxKind::VarKw => "var",
            SyntaxKind::OpenParen => "(",
            SyntaxKind::CloseParen => ")",
            SyntaxKind::OpenBrace => "{",
            SyntaxKind::CloseBrace => "}",
            SyntaxKind::OpenBracket => "[",
            SyntaxKind::CloseBracket => "]",
            SyntaxKind::Semicolon => ";",
            SyntaxKind::Comma => ",",
            SyntaxKind::Dot => ".",
            SyntaxKind::Colon => ":",
            SyntaxKind::Question => "?",
            SyntaxKind::Arrow => "->",
            SyntaxKind::Plus => "+",
            SyntaxKind::Minus => "-",
            SyntaxKind::Star => "*",
            SyntaxKind::Slash => "/",
            SyntaxKind::Percent => "%",
            SyntaxKind::Bang => "!",
            SyntaxKind::Tilde => "~",
            SyntaxKind::Amp => "&",
            SyntaxKind::Pipe => "|",
            SyntaxKind::Caret => "^",
            SyntaxKind::Eq => "=",
            SyntaxKind::EqEq => "==",
            SyntaxKind::BangEq => "!=",
            SyntaxKind::Less => "<",
            SyntaxKind::LessEq => "<=",
            SyntaxKind::Greater => ">",
            SyntaxKind::GreaterEq => ">=",
            SyntaxKind::AmpAmp => "&&",
            SyntaxKind::PipePipe => "||",
            SyntaxKind::PlusEq => "+=",
            SyntaxKind::MinusEq => "-=",
            SyntaxKind::StarEq => "*=",
            SyntaxKind::SlashEq => "/=",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable description used in diagnostic messages.
    pub fn describe(self) -> &'static str {
        if let Some(text) = self.fixed_text() {
            return text;
        }
        match self {
            SyntaxKind::EndOfFile => "end of file",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::IntLiteral => "integer literal",
            SyntaxKind::FloatLiteral => "float literal",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::CharLiteral => "character literal",
            SyntaxKind::BadToken => "invalid token",
            SyntaxKind::PredefinedType | SyntaxKind::NamedType => "type",
            _ if self.is_statement() => "statement",
            _ => "syntax",
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}
