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

//! Statement resolution.
//!
//! Walks every statement form, opening and closing scopes around blocks,
//! splitting variable declarations into declare and define steps, and
//! enforcing the contextual rules for `return` and class bodies.

use super::context::{ClassKind, FunctionKind};
use super::expressions::ExpressionResolver;
use super::functions::FunctionResolver;
use super::Resolver;
use crate::ast::{ClassDecl, Expr, ExprKind, FunctionDecl, Statement, StatementKind, VarDecl};
use crate::error::{CompileError, ErrorCode, Span};

/// Resolution of statements and declarations.
pub trait StatementResolver {
    /// Resolve a list of statements in order.
    fn resolve_statements(&mut self, statements: &[Statement]);

    /// Resolve a single statement.
    fn resolve_statement(&mut self, statement: &Statement);

    /// Resolve a variable declaration.
    fn resolve_var_declaration(&mut self, declaration: &VarDecl);

    /// Resolve a function declaration and its body.
    fn resolve_function_declaration(&mut self, declaration: &FunctionDecl);

    /// Resolve a class declaration and its methods.
    fn resolve_class_declaration(&mut self, declaration: &ClassDecl);

    /// Resolve a return statement.
    fn resolve_return(&mut self, value: Option<&Expr>, span: &Span);
}

impl<'a> StatementResolver for Resolver<'a> {
    fn resolve_statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.resolve_statement(statement);
        }
    }

    fn resolve_statement(&mut self, statement: &Statement) {
        match &statement.kind {
            StatementKind::Var(declaration) => self.resolve_var_declaration(declaration),
            StatementKind::Function(declaration) => self.resolve_function_declaration(declaration),
            StatementKind::Class(declaration) => self.resolve_class_declaration(declaration),
            StatementKind::Expression(expression) | StatementKind::Print(expression) => {
                self.resolve_expression(expression);
            }
            StatementKind::If(if_statement) => {
                self.resolve_expression(&if_statement.condition);
                self.resolve_statement(&if_statement.then_branch);
                if let Some(else_branch) = &if_statement.else_branch {
                    self.resolve_statement(else_branch);
                }
            }
            StatementKind::While(while_statement) => {
                self.resolve_expression(&while_statement.condition);
                self.resolve_statement(&while_statement.body);
            }
            StatementKind::Return(value) => self.resolve_return(value.as_ref(), &statement.span),
            StatementKind::Block(statements) => {
                self.scopes.push();
                self.resolve_statements(statements);
                self.scopes.pop();
            }
        }
    }

    fn resolve_var_declaration(&mut self, declaration: &VarDecl) {
        self.declare(&declaration.name, &declaration.name_span);
        if let Some(initializer) = &declaration.initializer {
            self.resolve_expression(initializer);
        }
        self.scopes.define(&declaration.name, declaration.name_span.clone());
    }

    fn resolve_function_declaration(&mut self, declaration: &FunctionDecl) {
        // Defined before the body resolves, so the function can recurse.
        self.declare(&declaration.name, &declaration.name_span);
        self.scopes.define(&declaration.name, declaration.name_span.clone());

        self.resolve_function(declaration, FunctionKind::Function);
    }

    fn resolve_class_declaration(&mut self, declaration: &ClassDecl) {
        let old_context = self.context;
        self.context.class = ClassKind::Class;

        self.declare(&declaration.name, &declaration.name_span);
        self.scopes.define(&declaration.name, declaration.name_span.clone());

        if let Some(superclass) = &declaration.superclass {
            if let ExprKind::Variable { name } = &superclass.kind {
                if name == &declaration.name {
                    self.error(CompileError::new(
                        ErrorCode::SelfInheritance,
                        format!("Class '{}' cannot inherit from itself", name),
                        superclass.span.clone(),
                    ));
                }
            }

            self.context.class = ClassKind::Subclass;
            self.resolve_expression(superclass);

            self.scopes.push();
            self.scopes.define("super", superclass.span.clone());
        }

        self.scopes.push();
        self.scopes.define("this", declaration.name_span.clone());

        for method in &declaration.methods {
            let kind = if method.is_initializer() {
                FunctionKind::Initializer
            } else {
                FunctionKind::Method
            };
            self.resolve_function(method, kind);
        }

        self.scopes.pop();

        if declaration.superclass.is_some() {
            self.scopes.pop();
        }

        self.context = old_context;
    }

    fn resolve_return(&mut self, value: Option<&Expr>, span: &Span) {
        if self.context.function == FunctionKind::None {
            self.error(CompileError::new(
                ErrorCode::ReturnOutsideFunction,
                "Cannot return from top-level code",
                span.clone(),
            ));
        }

        if let Some(value) = value {
            if self.context.function == FunctionKind::Initializer {
                self.error(CompileError::new(
                    ErrorCode::ReturnValueFromInitializer,
                    "Cannot return a value from an initializer",
                    value.span.clone(),
                ));
            }
            self.resolve_expression(value);
        }
    }
}
