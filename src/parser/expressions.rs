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

//! Expression parsing for the parser.
//!
//! This module provides expression parsing functionality:
//! - Assignment expressions (right-associative)
//! - Precedence climbing for logical, equality, comparison and arithmetic operators
//! - Unary operators
//! - Postfix expressions (function calls, property access)
//! - Primary expressions (literals, variables, `this`, `super`, grouping)

use super::helpers::ParserHelpers;
use super::Parser;
use crate::ast::{BinaryOp, Expr, ExprKind, LogicalOp, UnaryOp};
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;

/// Maximum number of arguments a call may pass.
const MAX_ARGUMENTS: usize = 255;

/// Extension trait for expression parsing.
pub trait ExpressionParser {
    /// Parse an expression.
    fn parse_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an assignment expression.
    fn parse_assignment(&mut self) -> Result<Expr, CompileError>;

    /// Parse an 'or' expression.
    fn parse_or_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an 'and' expression.
    fn parse_and_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an equality expression.
    fn parse_equality_expression(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse an equality operator.
    fn try_parse_equality_op(&mut self) -> Option<BinaryOp>;

    /// Parse a comparison expression.
    fn parse_comparison_expression(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse a comparison operator.
    fn try_parse_comparison_op(&mut self) -> Option<BinaryOp>;

    /// Parse an additive expression.
    fn parse_additive_expression(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse an additive operator.
    fn try_parse_additive_op(&mut self) -> Option<BinaryOp>;

    /// Parse a multiplicative expression.
    fn parse_multiplicative_expression(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse a multiplicative operator.
    fn try_parse_multiplicative_op(&mut self) -> Option<BinaryOp>;

    /// Parse a unary expression.
    fn parse_unary_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse a postfix expression (function calls, property access).
    fn parse_postfix_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse a function call.
    fn parse_function_call(&mut self, callee: Expr) -> Result<Expr, CompileError>;

    /// Parse a primary expression.
    fn parse_primary_expression(&mut self) -> Result<Expr, CompileError>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expression(&mut self) -> Result<Expr, CompileError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, CompileError> {
        let expr = self.parse_or_expression()?;

        if self.check(&Token::Equal) {
            let equals_span = self.peek_span().unwrap();
            self.advance();
            let value = self.parse_assignment()?;
            let span = expr.span.merge(&value.span);
            let id = expr.id;

            return match expr.kind {
                ExprKind::Variable { name } => Ok(Expr::new(
                    id,
                    ExprKind::Assign {
                        name,
                        value: Box::new(value),
                    },
                    span,
                )),
                ExprKind::Get { object, name } => Ok(Expr::new(
                    id,
                    ExprKind::Set {
                        object,
                        name,
                        value: Box::new(value),
                    },
                    span,
                )),
                _ => Err(CompileError::new(
                    ErrorCode::InvalidAssignmentTarget,
                    "Invalid assignment target",
                    equals_span,
                )),
            };
        }

        Ok(expr)
    }

    fn parse_or_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_and_expression()?;

        while self.check(&Token::Or) {
            self.advance();
            let right = self.parse_and_expression()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                self.fresh_id(),
                ExprKind::LogicalOp {
                    left: Box::new(left),
                    op: LogicalOp::Or,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_and_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_equality_expression()?;

        while self.check(&Token::And) {
            self.advance();
            let right = self.parse_equality_expression()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                self.fresh_id(),
                ExprKind::LogicalOp {
                    left: Box::new(left),
                    op: LogicalOp::And,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_equality_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_comparison_expression()?;

        while let Some(op) = self.try_parse_equality_op() {
            let right = self.parse_comparison_expression()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                self.fresh_id(),
                ExprKind::BinaryOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn try_parse_equality_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::EqualEqual => BinaryOp::Equal,
            Token::BangEqual => BinaryOp::NotEqual,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_comparison_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_additive_expression()?;

        while let Some(op) = self.try_parse_comparison_op() {
            let right = self.parse_additive_expression()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                self.fresh_id(),
                ExprKind::BinaryOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn try_parse_comparison_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::Less => BinaryOp::Less,
            Token::Greater => BinaryOp::Greater,
            Token::LessEqual => BinaryOp::LessEqual,
            Token::GreaterEqual => BinaryOp::GreaterEqual,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_additive_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_multiplicative_expression()?;

        while let Some(op) = self.try_parse_additive_op() {
            let right = self.parse_multiplicative_expression()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                self.fresh_id(),
                ExprKind::BinaryOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn try_parse_additive_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_unary_expression()?;

        while let Some(op) = self.try_parse_multiplicative_op() {
            let right = self.parse_unary_expression()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                self.fresh_id(),
                ExprKind::BinaryOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn try_parse_multiplicative_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_unary_expression(&mut self) -> Result<Expr, CompileError> {
        let op = match self.peek() {
            Some(Token::Minus) => Some(UnaryOp::Negate),
            Some(Token::Bang) => Some(UnaryOp::Not),
            _ => None,
        };

        if let Some(op) = op {
            let op_span = self.peek_span().unwrap();
            self.advance();
            let operand = self.parse_unary_expression()?;
            let span = op_span.merge(&operand.span);
            return Ok(Expr::new(
                self.fresh_id(),
                ExprKind::UnaryOp {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }

        self.parse_postfix_expression()
    }

    fn parse_postfix_expression(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            if self.match_token(&Token::LeftParen) {
                expr = self.parse_function_call(expr)?;
            } else if self.match_token(&Token::Dot) {
                let (name, name_span) = self.expect_identifier("Expected property name after '.'")?;
                let span = expr.span.merge(&name_span);
                expr = Expr::new(
                    self.fresh_id(),
                    ExprKind::Get {
                        object: Box::new(expr),
                        name,
                    },
                    span,
                );
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_function_call(&mut self, callee: Expr) -> Result<Expr, CompileError> {
        let mut args = Vec::new();

        if !self.check(&Token::RightParen) {
            loop {
                if args.len() >= MAX_ARGUMENTS {
                    return Err(self.error(
                        ErrorCode::TooManyArguments,
                        format!("Cannot have more than {} arguments", MAX_ARGUMENTS),
                    ));
                }
                args.push(self.parse_expression()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }

        let (_, close_span) = self.expect(&Token::RightParen, "Expected ')' after arguments")?;
        let span = callee.span.merge(&close_span);

        Ok(Expr::new(
            self.fresh_id(),
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        ))
    }

    fn parse_primary_expression(&mut self) -> Result<Expr, CompileError> {
        match self.advance() {
            Some((Token::Number(value), span)) => Ok(Expr::new(
                self.fresh_id(),
                ExprKind::NumberLiteral(value),
                span,
            )),
            Some((Token::Str(value), span)) => Ok(Expr::new(
                self.fresh_id(),
                ExprKind::StringLiteral(value),
                span,
            )),
            Some((Token::True, span)) => {
                Ok(Expr::new(self.fresh_id(), ExprKind::BoolLiteral(true), span))
            }
            Some((Token::False, span)) => Ok(Expr::new(
                self.fresh_id(),
                ExprKind::BoolLiteral(false),
                span,
            )),
            Some((Token::Nil, span)) => Ok(Expr::new(self.fresh_id(), ExprKind::NilLiteral, span)),
            Some((Token::This, span)) => Ok(Expr::new(self.fresh_id(), ExprKind::This, span)),
            Some((Token::Identifier(name), span)) => Ok(Expr::new(
                self.fresh_id(),
                ExprKind::Variable { name },
                span,
            )),
            Some((Token::Super, span)) => {
                self.expect(&Token::Dot, "Expected '.' after 'super'")?;
                let (method, method_span) =
                    self.expect_identifier("Expected superclass method name")?;
                let span = span.merge(&method_span);
                Ok(Expr::new(self.fresh_id(), ExprKind::Super { method }, span))
            }
            Some((Token::LeftParen, span)) => {
                let inner = self.parse_expression()?;
                let (_, close_span) = self.expect(&Token::RightParen, "Expected ')' after expression")?;
                let span = span.merge(&close_span);
                Ok(Expr::new(
                    self.fresh_id(),
                    ExprKind::Grouped(Box::new(inner)),
                    span,
                ))
            }
            Some((token, span)) => Err(CompileError::new(
                ErrorCode::ExpectedExpression,
                format!("Expected expression, found {}", token),
                span,
            )),
            None => Err(CompileError::new(
                ErrorCode::ExpectedExpression,
                "Expected expression, found end of file",
                self.previous_span(),
            )),
        }
    }
}
