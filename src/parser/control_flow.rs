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

//! Control flow statement parsing for the parser.
//!
//! This module provides control flow statement parsing:
//! - If/else statements
//! - While loops
//! - For loops (desugared into while loops)
//! - Return statements

use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::statements::StatementParser;
use super::Parser;
use crate::ast::{Expr, ExprKind, IfStatement, Statement, StatementKind, WhileStatement};
use crate::error::CompileError;
use crate::lexer::Token;

/// Extension trait for control flow parsing.
pub trait ControlFlowParser {
    /// Parse an if statement.
    fn parse_if_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse a while statement.
    fn parse_while_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse a for statement.
    fn parse_for_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse a return statement.
    fn parse_return_statement(&mut self) -> Result<Statement, CompileError>;
}

impl<'a> ControlFlowParser for Parser<'a> {
    fn parse_if_statement(&mut self) -> Result<Statement, CompileError> {
        let start_span = self.peek_span().unwrap();
        self.expect(&Token::If, "Expected 'if'")?;

        self.expect(&Token::LeftParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect(&Token::RightParen, "Expected ')' after if condition")?;

        let then_branch = self.parse_statement()?;

        let else_branch = if self.match_token(&Token::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        let end_span = else_branch
            .as_ref()
            .map(|s| s.span.clone())
            .unwrap_or_else(|| then_branch.span.clone());
        let span = start_span.merge(&end_span);

        let if_stmt = IfStatement {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
            span: span.clone(),
        };

        Ok(Statement::new(StatementKind::If(if_stmt), span))
    }

    fn parse_while_statement(&mut self) -> Result<Statement, CompileError> {
        let start_span = self.peek_span().unwrap();
        self.expect(&Token::While, "Expected 'while'")?;

        self.expect(&Token::LeftParen, "Expected '(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect(&Token::RightParen, "Expected ')' after while condition")?;

        let body = self.parse_statement()?;

        let end_span = body.span.clone();
        let span = start_span.merge(&end_span);

        let while_stmt = WhileStatement {
            condition,
            body: Box::new(body),
            span: span.clone(),
        };

        Ok(Statement::new(StatementKind::While(while_stmt), span))
    }

    fn parse_for_statement(&mut self) -> Result<Statement, CompileError> {
        let start_span = self.peek_span().unwrap();
        self.expect(&Token::For, "Expected 'for'")?;
        self.expect(&Token::LeftParen, "Expected '(' after 'for'")?;

        let initializer = if self.match_token(&Token::Semicolon) {
            None
        } else if self.check(&Token::Var) {
            Some(self.parse_var_declaration()?)
        } else {
            Some(self.parse_expression_statement()?)
        };

        let condition = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&Token::Semicolon, "Expected ';' after loop condition")?;

        let increment = if self.check(&Token::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&Token::RightParen, "Expected ')' after for clauses")?;

        let mut body = self.parse_statement()?;
        let span = start_span.merge(&body.span);

        // Desugar: the increment runs after the body on every iteration.
        if let Some(increment) = increment {
            let increment_span = increment.span.clone();
            let body_span = body.span.clone();
            let increment_stmt =
                Statement::new(StatementKind::Expression(increment), increment_span);
            body = Statement::new(StatementKind::Block(vec![body, increment_stmt]), body_span);
        }

        let condition = match condition {
            Some(condition) => condition,
            None => Expr::new(self.fresh_id(), ExprKind::BoolLiteral(true), span.clone()),
        };

        let while_stmt = WhileStatement {
            condition,
            body: Box::new(body),
            span: span.clone(),
        };
        let mut result = Statement::new(StatementKind::While(while_stmt), span.clone());

        // The initializer runs once, in a scope enclosing the loop.
        if let Some(initializer) = initializer {
            result = Statement::new(StatementKind::Block(vec![initializer, result]), span);
        }

        Ok(result)
    }

    fn parse_return_statement(&mut self) -> Result<Statement, CompileError> {
        let start_span = self.peek_span().unwrap();
        self.expect(&Token::Return, "Expected 'return'")?;

        let value = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let (_, end_span) = self.expect(&Token::Semicolon, "Expected ';' after return value")?;
        let span = start_span.merge(&end_span);

        Ok(Statement::new(StatementKind::Return(value), span))
    }
}
