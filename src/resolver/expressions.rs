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

//! Expression resolution.
//!
//! Walks every expression form and records a scope distance for each
//! variable reference, assignment target, `this`, and `super` that binds to
//! an open scope. References that reach no open scope are left for the
//! global environment at runtime.

use super::context::ClassKind;
use super::Resolver;
use crate::ast::{Expr, ExprId, ExprKind};
use crate::error::{CompileError, ErrorCode};

/// Resolution of expressions.
pub trait ExpressionResolver {
    /// Resolve a single expression and all of its children.
    fn resolve_expression(&mut self, expression: &Expr);

    /// Record the scope distance for a reference, if one is in scope.
    fn resolve_local(&mut self, id: ExprId, name: &str);
}

impl<'a> ExpressionResolver for Resolver<'a> {
    fn resolve_expression(&mut self, expression: &Expr) {
        match &expression.kind {
            ExprKind::NumberLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::NilLiteral => {}

            ExprKind::Variable { name } => {
                self.resolve_local(expression.id, name);
            }

            ExprKind::Assign { name, value } => {
                self.resolve_expression(value);
                self.resolve_local(expression.id, name);
            }

            ExprKind::BinaryOp { left, right, .. } | ExprKind::LogicalOp { left, right, .. } => {
                self.resolve_expression(left);
                self.resolve_expression(right);
            }

            ExprKind::UnaryOp { operand, .. } => {
                self.resolve_expression(operand);
            }

            ExprKind::Call { callee, args } => {
                self.resolve_expression(callee);
                for arg in args {
                    self.resolve_expression(arg);
                }
            }

            ExprKind::Get { object, .. } => {
                // Property names are looked up on the object at runtime.
                self.resolve_expression(object);
            }

            ExprKind::Set { object, value, .. } => {
                self.resolve_expression(value);
                self.resolve_expression(object);
            }

            ExprKind::This => {
                if self.context.class == ClassKind::None {
                    self.error(CompileError::new(
                        ErrorCode::ThisOutsideClass,
                        "Cannot use 'this' outside of a class",
                        expression.span.clone(),
                    ));
                    return;
                }
                self.resolve_local(expression.id, "this");
            }

            ExprKind::Super { .. } => match self.context.class {
                ClassKind::None => {
                    self.error(CompileError::new(
                        ErrorCode::SuperOutsideClass,
                        "Cannot use 'super' outside of a class",
                        expression.span.clone(),
                    ));
                }
                ClassKind::Class => {
                    self.error(CompileError::new(
                        ErrorCode::SuperWithoutSuperclass,
                        "Cannot use 'super' in a class with no superclass",
                        expression.span.clone(),
                    ));
                }
                ClassKind::Subclass => {
                    self.resolve_local(expression.id, "super");
                }
            },

            ExprKind::Grouped(inner) => {
                self.resolve_expression(inner);
            }
        }
    }

    fn resolve_local(&mut self, id: ExprId, name: &str) {
        if let Some(depth) = self.scopes.depth_of(name) {
            self.locals.record(id, depth);
        }
    }
}
