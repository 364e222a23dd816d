// Tarn - A tree-walking interpreter for the Tarn scripting language
//
// Copyright (C) 2026 Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Statement and declaration parsing for the parser.
//!
//! This module provides statement parsing functionality:
//! - Variable declarations
//! - Function and class declarations
//! - Print statements, blocks and expression statements

use super::control_flow::ControlFlowParser;
use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::Parser;
use crate::ast::{
    ClassDecl, Expr, ExprKind, FunctionDecl, Param, Statement, StatementKind, VarDecl,
};
use crate::error::{CompileError, ErrorCode, Span};
use crate::lexer::Token;

/// Maximum number of parameters a function may declare.
const MAX_PARAMETERS: usize = 255;

/// Extension trait for statement and declaration parsing.
pub trait StatementParser {
    /// Parse a declaration or statement.
    fn parse_declaration(&mut self) -> Result<Statement, CompileError>;

    /// Parse a variable declaration.
    fn parse_var_declaration(&mut self) -> Result<Statement, CompileError>;

    /// Parse a function declaration.
    fn parse_function_declaration(&mut self) -> Result<Statement, CompileError>;

    /// Parse a class declaration.
    fn parse_class_declaration(&mut self) -> Result<Statement, CompileError>;

    /// Parse a function name, parameter list and body.
    fn parse_function(&mut self, kind: &str) -> Result<FunctionDecl, CompileError>;

    /// Parse the statements of a brace-delimited block.
    fn parse_block_statements(&mut self) -> Result<(Vec<Statement>, Span), CompileError>;

    /// Parse a statement.
    fn parse_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse a print statement.
    fn parse_print_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse an expression statement.
    fn parse_expression_statement(&mut self) -> Result<Statement, CompileError>;
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_declaration(&mut self) -> Result<Statement, CompileError> {
        match self.peek() {
            Some(Token::Var) => self.parse_var_declaration(),
            Some(Token::Fun) => self.parse_function_declaration(),
            Some(Token::Class) => self.parse_class_declaration(),
            _ => self.parse_statement(),
        }
    }

    fn parse_var_declaration(&mut self) -> Result<Statement, CompileError> {
        let start_span = self.peek_span().unwrap();
        self.expect(&Token::Var, "Expected 'var'")?;

        let (name, name_span) = self.expect_identifier("Expected variable name")?;

        let initializer = if self.match_token(&Token::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let (_, end_span) =
            self.expect(&Token::Semicolon, "Expected ';' after variable declaration")?;
        let span = start_span.merge(&end_span);

        let mut decl = VarDecl::new(name, name_span, span.clone());
        if let Some(init) = initializer {
            decl = decl.with_initializer(init);
        }

        Ok(Statement::new(StatementKind::Var(decl), span))
    }

    fn parse_function_declaration(&mut self) -> Result<Statement, CompileError> {
        let start_span = self.peek_span().unwrap();
        self.expect(&Token::Fun, "Expected 'fun'")?;

        let mut decl = self.parse_function("function")?;
        let span = start_span.merge(&decl.span);
        decl.span = span.clone();

        Ok(Statement::new(StatementKind::Function(decl), span))
    }

    fn parse_class_declaration(&mut self) -> Result<Statement, CompileError> {
        let start_span = self.peek_span().unwrap();
        self.expect(&Token::Class, "Expected 'class'")?;

        let (name, name_span) = self.expect_identifier("Expected class name")?;

        let superclass = if self.match_token(&Token::Less) {
            let (super_name, super_span) = self.expect_identifier("Expected superclass name")?;
            Some(Expr::new(
                self.fresh_id(),
                ExprKind::Variable { name: super_name },
                super_span,
            ))
        } else {
            None
        };

        self.expect(&Token::LeftBrace, "Expected '{' before class body")?;

        let mut methods = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            methods.push(self.parse_function("method")?);
        }

        let (_, end_span) = self.expect(&Token::RightBrace, "Expected '}' after class body")?;
        let span = start_span.merge(&end_span);

        let decl = ClassDecl::new(name, name_span, superclass, methods, span.clone());

        Ok(Statement::new(StatementKind::Class(decl), span))
    }

    fn parse_function(&mut self, kind: &str) -> Result<FunctionDecl, CompileError> {
        let (name, name_span) = self.expect_identifier(&format!("Expected {} name", kind))?;

        self.expect(&Token::LeftParen, &format!("Expected '(' after {} name", kind))?;

        let mut params = Vec::new();
        if !self.check(&Token::RightParen) {
            loop {
                if params.len() >= MAX_PARAMETERS {
                    return Err(self.error(
                        ErrorCode::TooManyParameters,
                        format!("Cannot have more than {} parameters", MAX_PARAMETERS),
                    ));
                }
                let (param_name, param_span) = self.expect_identifier("Expected parameter name")?;
                params.push(Param::new(param_name, param_span));
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(&Token::RightParen, "Expected ')' after parameters")?;

        self.expect(&Token::LeftBrace, &format!("Expected '{{' before {} body", kind))?;
        let (body, end_span) = self.parse_block_statements()?;

        let span = name_span.merge(&end_span);

        Ok(FunctionDecl::new(name, name_span, params, body, span))
    }

    fn parse_block_statements(&mut self) -> Result<(Vec<Statement>, Span), CompileError> {
        let mut statements = Vec::new();

        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_declaration()?);
        }

        let (_, close_span) = self.expect(&Token::RightBrace, "Expected '}' after block")?;

        Ok((statements, close_span))
    }

    fn parse_statement(&mut self) -> Result<Statement, CompileError> {
        match self.peek() {
            Some(Token::Print) => self.parse_print_statement(),
            Some(Token::If) => self.parse_if_statement(),
            Some(Token::While) => self.parse_while_statement(),
            Some(Token::For) => self.parse_for_statement(),
            Some(Token::Return) => self.parse_return_statement(),
            Some(Token::LeftBrace) => {
                let start_span = self.peek_span().unwrap();
                self.advance();
                let (statements, end_span) = self.parse_block_statements()?;
                let span = start_span.merge(&end_span);
                Ok(Statement::new(StatementKind::Block(statements), span))
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_print_statement(&mut self) -> Result<Statement, CompileError> {
        let start_span = self.peek_span().unwrap();
        self.expect(&Token::Print, "Expected 'print'")?;

        let value = self.parse_expression()?;
        let (_, end_span) = self.expect(&Token::Semicolon, "Expected ';' after value")?;
        let span = start_span.merge(&end_span);

        Ok(Statement::new(StatementKind::Print(value), span))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, CompileError> {
        let expr = self.parse_expression()?;
        let (_, end_span) = self.expect(&Token::Semicolon, "Expected ';' after expression")?;
        let span = expr.span.merge(&end_span);

        Ok(Statement::new(StatementKind::Expression(expr), span))
    }
}
