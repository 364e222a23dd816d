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

//! Statement execution.
//!
//! Statements either succeed quietly or raise an [`Interrupt`]: a `return`
//! unwinding to the nearest call, or a runtime failure unwinding all the
//! way out.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::class::Class;
use super::environment::Environment;
use super::expressions::ExpressionEvaluator;
use super::function::Function;
use super::value::Value;
use super::{Interpreter, Interrupt};
use crate::ast::{ClassDecl, Statement, StatementKind};
use crate::error::RuntimeError;

/// Execution of statements.
pub trait StatementExecutor {
    /// Execute a single statement.
    fn execute_statement(&mut self, statement: &Statement) -> Result<(), Interrupt>;

    /// Execute a class declaration.
    fn execute_class_declaration(&mut self, declaration: &ClassDecl) -> Result<(), Interrupt>;
}

impl StatementExecutor for Interpreter {
    fn execute_statement(&mut self, statement: &Statement) -> Result<(), Interrupt> {
        match &statement.kind {
            StatementKind::Var(declaration) => {
                let value = match &declaration.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment
                    .borrow_mut()
                    .define(&declaration.name, value);
                Ok(())
            }

            StatementKind::Function(declaration) => {
                let function = Function::new(
                    Rc::new(declaration.clone()),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment
                    .borrow_mut()
                    .define(&declaration.name, Value::Function(Rc::new(function)));
                Ok(())
            }

            StatementKind::Class(declaration) => self.execute_class_declaration(declaration),

            StatementKind::Expression(expression) => {
                self.evaluate(expression)?;
                Ok(())
            }

            StatementKind::Print(expression) => {
                let value = self.evaluate(expression)?;
                self.write_line(&value, &statement.span)?;
                Ok(())
            }

            StatementKind::If(if_statement) => {
                if self.evaluate(&if_statement.condition)?.is_truthy() {
                    self.execute_statement(&if_statement.then_branch)
                } else if let Some(else_branch) = &if_statement.else_branch {
                    self.execute_statement(else_branch)
                } else {
                    Ok(())
                }
            }

            StatementKind::While(while_statement) => {
                while self.evaluate(&while_statement.condition)?.is_truthy() {
                    self.execute_statement(&while_statement.body)?;
                }
                Ok(())
            }

            StatementKind::Return(value) => {
                let value = match value {
                    Some(expression) => self.evaluate(expression)?,
                    None => Value::Nil,
                };
                Err(Interrupt::Return(value))
            }

            StatementKind::Block(statements) => {
                let environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
                    &self.environment,
                ))));
                self.execute_block(statements, environment)
            }
        }
    }

    fn execute_class_declaration(&mut self, declaration: &ClassDecl) -> Result<(), Interrupt> {
        let superclass = match &declaration.superclass {
            Some(expression) => match self.evaluate(expression)? {
                Value::Class(class) => Some(class),
                _ => {
                    return Err(RuntimeError::SuperclassNotClass {
                        span: expression.span.clone(),
                    }
                    .into())
                }
            },
            None => None,
        };

        // Method closures reach the superclass one hop past `this`.
        let method_environment = match &superclass {
            Some(superclass) => {
                let environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
                    &self.environment,
                ))));
                environment
                    .borrow_mut()
                    .define("super", Value::Class(Rc::clone(superclass)));
                environment
            }
            None => Rc::clone(&self.environment),
        };

        let mut methods = HashMap::new();
        for method in &declaration.methods {
            let function = Function::new(
                Rc::new(method.clone()),
                Rc::clone(&method_environment),
                method.is_initializer(),
            );
            methods.insert(method.name.clone(), function);
        }

        let class = Class::new(declaration.name.clone(), superclass, methods);
        self.environment
            .borrow_mut()
            .define(&declaration.name, Value::Class(Rc::new(class)));
        Ok(())
    }
}
