//! The grammar.
//!
//! ```text
//! CompilationUnit := Item* EOF
//! Item            := FunctionDecl | Statement
//! FunctionDecl    := 'fn' Ident ParamList ('->' Type)? Block
//! ParamList       := '(' (Param (',' Param)*)? ')'
//! Param           := Type Ident
//! Type            := predefined type keyword | Ident
//! ```
//!
//! Statements are in `stmt`, expressions in `expr`. Item and statement
//! lists are where old subtrees get reused, where cancellation is polled,
//! and where tokens nothing can start are skipped.

mod expr;
mod stmt;

use loom_diagnostic::{Diagnostic, ErrorCode};
use loom_ir::SyntaxKind;
use loom_lexer::TokenSource;
use loom_syntax::EntryPoint;

use crate::parser::Parser;
use crate::recovery::{TokenSet, ITEM_RECOVERY, PREDEFINED_TYPES, STMT_START};

impl<S: TokenSource> Parser<'_, S> {
    pub(crate) fn parse_entry(&mut self, entry: EntryPoint) {
        self.start_node(entry.root_kind());
        match entry {
            EntryPoint::CompilationUnit => self.item_list(),
            EntryPoint::Expression => self.expr(),
            EntryPoint::Statement => self.statement(TokenSet::new(&[SyntaxKind::EndOfFile])),
        }
        self.end_of_file();
        self.finish_node();
    }

    /// Skip whatever the entry rule left over, then take the end of file.
    fn end_of_file(&mut self) {
        while !self.at(SyntaxKind::EndOfFile) {
            if self.is_cancelled() {
                return;
            }
            self.skip();
        }
        self.bump();
    }

    fn item_list(&mut self) {
        while !self.at(SyntaxKind::EndOfFile) {
            if self.is_cancelled() {
                return;
            }
            let start = self.position();
            if self.reuse(&SyntaxKind::is_item) {
                continue;
            }
            match self.current() {
                SyntaxKind::FnKw => self.function_declaration(),
                kind if STMT_START.contains(kind) => self.statement(ITEM_RECOVERY),
                _ => self.skip(),
            }
            if self.position() == start && !self.at(SyntaxKind::EndOfFile) {
                self.skip();
            }
        }
    }

    fn function_declaration(&mut self) {
        self.start_node(SyntaxKind::FunctionDeclaration);
        self.bump();
        self.expect(SyntaxKind::Identifier);
        self.parameter_list();
        if self.at(SyntaxKind::Arrow) {
            self.start_node(SyntaxKind::ReturnClause);
            self.bump();
            self.type_();
            self.finish_node();
        }
        self.block(ITEM_RECOVERY);
        self.finish_node();
    }

    fn parameter_list(&mut self) {
        self.start_node(SyntaxKind::ParameterList);
        self.expect(SyntaxKind::OpenParen);
        if !self.at(SyntaxKind::CloseParen) {
            loop {
                self.start_node(SyntaxKind::Parameter);
                self.type_();
                self.expect(SyntaxKind::Identifier);
                self.finish_node();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::CloseParen);
        self.finish_node();
    }

    pub(crate) fn type_(&mut self) {
        let kind = self.current();
        if PREDEFINED_TYPES.contains(kind) {
            self.start_node(SyntaxKind::PredefinedType);
            self.bump();
        } else {
            self.start_node(SyntaxKind::NamedType);
            if kind == SyntaxKind::Identifier {
                self.bump();
            } else {
                let diagnostic = Diagnostic::error(ErrorCode::E1001, 0, 0).with_arg("type");
                self.missing(SyntaxKind::Identifier, diagnostic);
            }
        }
        self.finish_node();
    }
}

#[cfg(test)]
mod tests;
