//! Statements.
//!
//! ```text
//! Statement := Block | LocalDecl | If | While | Return | Break | Continue
//!            | ExprStmt | ';'
//! Block     := '{' Statement* '}'
//! LocalDecl := Type Ident ('=' Expr)? ';'
//! If        := 'if' '(' Expr ')' Statement ('else' Statement)?
//! While     := 'while' '(' Expr ')' Statement
//! Return    := 'return' Expr? ';'
//! ```
//!
//! `recovery` is the set of tokens an enclosing rule can resume at. A block
//! meeting one of them gives up with a missing `}` instead of skipping it.

use loom_ir::SyntaxKind;
use loom_lexer::TokenSource;

use crate::parser::Parser;
use crate::recovery::{TokenSet, EXPR_START, PREDEFINED_TYPES, STMT_START};
use loom_stack::ensure_sufficient_stack;

const CLOSE_BRACE: TokenSet = TokenSet::new(&[SyntaxKind::CloseBrace]);

impl<S: TokenSource> Parser<'_, S> {
    /// Parse one statement. Something that cannot start a statement becomes
    /// an expression statement with a missing expression.
    pub(crate) fn statement(&mut self, recovery: TokenSet) {
        ensure_sufficient_stack(|| self.statement_inner(recovery));
    }

    fn statement_inner(&mut self, recovery: TokenSet) {
        match self.current() {
            SyntaxKind::OpenBrace => self.block(recovery),
            SyntaxKind::Semicolon => {
                self.start_node(SyntaxKind::EmptyStatement);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IfKw => self.if_statement(recovery),
            SyntaxKind::WhileKw => self.while_statement(recovery),
            SyntaxKind::ReturnKw => self.return_statement(),
            SyntaxKind::BreakKw => self.jump_statement(SyntaxKind::BreakStatement),
            SyntaxKind::ContinueKw => self.jump_statement(SyntaxKind::ContinueStatement),
            kind if PREDEFINED_TYPES.contains(kind) => self.local_declaration(),
            SyntaxKind::Identifier if self.nth(1) == SyntaxKind::Identifier => {
                self.local_declaration();
            }
            _ => self.expression_statement(),
        }
    }

    pub(crate) fn block(&mut self, recovery: TokenSet) {
        self.start_node(SyntaxKind::Block);
        self.expect(SyntaxKind::OpenBrace);
        self.statement_list(recovery);
        self.expect(SyntaxKind::CloseBrace);
        self.finish_node();
    }

    fn statement_list(&mut self, recovery: TokenSet) {
        let nested = recovery.union(CLOSE_BRACE);
        loop {
            let kind = self.current();
            if matches!(kind, SyntaxKind::CloseBrace | SyntaxKind::EndOfFile) || self.is_cancelled()
            {
                return;
            }
            let start = self.position();
            if self.reuse(&SyntaxKind::is_statement) {
                continue;
            }
            if STMT_START.contains(kind) {
                self.statement(nested);
            } else if recovery.contains(kind) {
                return;
            } else {
                self.skip();
            }
            if self.position() == start && !self.at(SyntaxKind::EndOfFile) {
                self.skip();
            }
        }
    }

    fn local_declaration(&mut self) {
        self.start_node(SyntaxKind::LocalDeclaration);
        self.type_();
        self.expect(SyntaxKind::Identifier);
        if self.at(SyntaxKind::Eq) {
            self.start_node(SyntaxKind::EqualsValueClause);
            self.bump();
            self.expr();
            self.finish_node();
        }
        self.expect(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn if_statement(&mut self, recovery: TokenSet) {
        self.start_node(SyntaxKind::IfStatement);
        self.bump();
        self.condition();
        self.statement(recovery);
        if self.at(SyntaxKind::ElseKw) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.statement(recovery);
            self.finish_node();
        }
        self.finish_node();
    }

    fn while_statement(&mut self, recovery: TokenSet) {
        self.start_node(SyntaxKind::WhileStatement);
        self.bump();
        self.condition();
        self.statement(recovery);
        self.finish_node();
    }

    /// `'(' Expr ')'` after `if` and `while`.
    fn condition(&mut self) {
        self.expect(SyntaxKind::OpenParen);
        self.expr();
        self.expect(SyntaxKind::CloseParen);
    }

    fn return_statement(&mut self) {
        self.start_node(SyntaxKind::ReturnStatement);
        self.bump();
        if EXPR_START.contains(self.current()) {
            self.expr();
        }
        self.expect(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn jump_statement(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.expect(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn expression_statement(&mut self) {
        self.start_node(SyntaxKind::ExpressionStatement);
        self.expr();
        self.expect(SyntaxKind::Semicolon);
        self.finish_node();
    }
}
