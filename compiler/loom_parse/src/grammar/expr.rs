//! Expressions, by binding power.
//!
//! ```text
//! assignment  = += -= *= /=   right associative, lowest
//! ||  &&  == !=  < <= > >=  + -  * / %
//! prefix - !
//! postfix call (...), member .x, element [...]
//! primary literal, name, ( Expr )
//! ```
//!
//! Binary nodes wrap their left operand through a checkpoint once the
//! operator is seen, so left-associative chains stay iterative.

use loom_diagnostic::{Diagnostic, ErrorCode};
use loom_ir::SyntaxKind;
use loom_lexer::TokenSource;

use crate::parser::Parser;
use crate::recovery::{infix_binding_power, PREFIX_BINDING_POWER};
use loom_stack::ensure_sufficient_stack;

impl<S: TokenSource> Parser<'_, S> {
    pub(crate) fn expr(&mut self) {
        self.expr_bp(0);
    }

    fn expr_bp(&mut self, min: u8) {
        ensure_sufficient_stack(|| self.expr_bp_inner(min));
    }

    fn expr_bp_inner(&mut self, min: u8) {
        let checkpoint = self.checkpoint();
        self.unary();
        while let Some((left, right, kind)) = infix_binding_power(self.current()) {
            if left < min {
                break;
            }
            self.start_node_at(checkpoint, kind);
            self.bump();
            self.expr_bp(right);
            self.finish_node();
        }
    }

    fn unary(&mut self) {
        if matches!(self.current(), SyntaxKind::Minus | SyntaxKind::Bang) {
            self.start_node(SyntaxKind::PrefixUnaryExpression);
            self.bump();
            self.expr_bp(PREFIX_BINDING_POWER);
            self.finish_node();
        } else {
            self.postfix();
        }
    }

    fn postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.primary();
        loop {
            match self.current() {
                SyntaxKind::OpenParen => {
                    self.start_node_at(checkpoint, SyntaxKind::CallExpression);
                    self.argument_list();
                }
                SyntaxKind::Dot => {
                    self.start_node_at(checkpoint, SyntaxKind::MemberAccessExpression);
                    self.bump();
                    self.expect(SyntaxKind::Identifier);
                }
                SyntaxKind::OpenBracket => {
                    self.start_node_at(checkpoint, SyntaxKind::ElementAccessExpression);
                    self.bump();
                    self.expr();
                    self.expect(SyntaxKind::CloseBracket);
                }
                _ => return,
            }
            self.finish_node();
        }
    }

    fn primary(&mut self) {
        match self.current() {
            SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::CharLiteral
            | SyntaxKind::TrueKw
            | SyntaxKind::FalseKw
            | SyntaxKind::NullKw => {
                self.start_node(SyntaxKind::LiteralExpression);
                self.bump();
            }
            SyntaxKind::Identifier => {
                self.start_node(SyntaxKind::NameExpression);
                self.bump();
            }
            SyntaxKind::OpenParen => {
                self.start_node(SyntaxKind::ParenthesizedExpression);
                self.bump();
                self.expr();
                self.expect(SyntaxKind::CloseParen);
            }
            _ => {
                self.start_node(SyntaxKind::NameExpression);
                let diagnostic = Diagnostic::error(ErrorCode::E1002, 0, 0);
                self.missing(SyntaxKind::Identifier, diagnostic);
            }
        }
        self.finish_node();
    }

    fn argument_list(&mut self) {
        self.start_node(SyntaxKind::ArgumentList);
        self.bump();
        if !self.at(SyntaxKind::CloseParen) {
            loop {
                self.expr();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::CloseParen);
        self.finish_node();
    }
}
