use loom_ir::SyntaxKind;

/// Grammar rule a parse starts from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryPoint {
    /// A whole file: items up to end of input.
    #[default]
    CompilationUnit,
    /// A single expression.
    Expression,
    /// A single statement.
    Statement,
}

impl EntryPoint {
    /// Kind of the root node a parse from this entry point produces.
    pub const fn root_kind(self) -> SyntaxKind {
        match self {
            EntryPoint::CompilationUnit => SyntaxKind::CompilationUnit,
            EntryPoint::Expression => SyntaxKind::ExpressionRoot,
            EntryPoint::Statement => SyntaxKind::StatementRoot,
        }
    }
}

/// Options a tree was parsed with. Re-parsing keeps them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOptions {
    pub entry: EntryPoint,
    /// Recognize `#name` directives at line start.
    pub allow_directives: bool,
    /// Lex `///` as documentation comments rather than plain line comments.
    pub documentation_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            entry: EntryPoint::CompilationUnit,
            allow_directives: true,
            documentation_comments: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, entry: EntryPoint) -> Self {
        self.entry = entry;
        self
    }

    #[must_use]
    pub fn with_directives(mut self, allow: bool) -> Self {
        self.allow_directives = allow;
        self
    }

    #[must_use]
    pub fn with_documentation_comments(mut self, enabled: bool) -> Self {
        self.documentation_comments = enabled;
        self
    }
}
