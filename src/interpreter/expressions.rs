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

//! Expression evaluation.
//!
//! Operands evaluate left to right. Arithmetic follows IEEE 754, so
//! division by zero yields an infinity rather than an error. `and` and
//! `or` short-circuit and yield the deciding operand itself, not a
//! boolean.

use std::rc::Rc;

use super::class::{Class, Instance};
use super::value::Value;
use super::Interpreter;
use crate::ast::{BinaryOp, Expr, ExprKind, LogicalOp, UnaryOp};
use crate::error::{RuntimeError, Span};

/// Evaluation of expressions.
pub trait ExpressionEvaluator {
    /// Evaluate a single expression to a value.
    fn evaluate(&mut self, expression: &Expr) -> Result<Value, RuntimeError>;

    /// Evaluate a binary operation.
    fn evaluate_binary(
        &mut self,
        expression: &Expr,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
    ) -> Result<Value, RuntimeError>;

    /// Evaluate a call expression.
    fn evaluate_call(
        &mut self,
        expression: &Expr,
        callee: &Expr,
        args: &[Expr],
    ) -> Result<Value, RuntimeError>;

    /// Evaluate a `super.method` access to a bound method.
    fn evaluate_super(&mut self, expression: &Expr, method: &str)
        -> Result<Value, RuntimeError>;
}

impl ExpressionEvaluator for Interpreter {
    fn evaluate(&mut self, expression: &Expr) -> Result<Value, RuntimeError> {
        match &expression.kind {
            ExprKind::NumberLiteral(value) => Ok(Value::Number(*value)),
            ExprKind::StringLiteral(value) => Ok(Value::Str(value.clone())),
            ExprKind::BoolLiteral(value) => Ok(Value::Boolean(*value)),
            ExprKind::NilLiteral => Ok(Value::Nil),

            ExprKind::Variable { name } => {
                self.look_up_variable(expression.id, name, &expression.span)
            }

            ExprKind::Assign { name, value } => {
                let value = self.evaluate(value)?;
                if self.assign_variable(expression.id, name, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        span: expression.span.clone(),
                    })
                }
            }

            ExprKind::BinaryOp { left, op, right } => {
                self.evaluate_binary(expression, left, *op, right)
            }

            ExprKind::LogicalOp { left, op, right } => {
                let left_value = self.evaluate(left)?;
                let short_circuits = match op {
                    LogicalOp::Or => left_value.is_truthy(),
                    LogicalOp::And => !left_value.is_truthy(),
                };
                if short_circuits {
                    Ok(left_value)
                } else {
                    self.evaluate(right)
                }
            }

            ExprKind::UnaryOp { op, operand } => {
                let value = self.evaluate(operand)?;
                match op {
                    UnaryOp::Negate => match value {
                        Value::Number(number) => Ok(Value::Number(-number)),
                        _ => Err(RuntimeError::OperandNotNumber {
                            span: operand.span.clone(),
                        }),
                    },
                    UnaryOp::Not => Ok(Value::Boolean(!value.is_truthy())),
                }
            }

            ExprKind::Call { callee, args } => self.evaluate_call(expression, callee, args),

            ExprKind::Get { object, name } => {
                let object_value = self.evaluate(object)?;
                match object_value {
                    Value::Instance(instance) => {
                        Instance::get(&instance, name).ok_or_else(|| {
                            RuntimeError::UndefinedProperty {
                                name: name.clone(),
                                span: expression.span.clone(),
                            }
                        })
                    }
                    _ => Err(RuntimeError::NotAnInstance {
                        span: object.span.clone(),
                    }),
                }
            }

            ExprKind::Set {
                object,
                name,
                value,
            } => {
                let object_value = self.evaluate(object)?;
                let instance = match object_value {
                    Value::Instance(instance) => instance,
                    _ => {
                        return Err(RuntimeError::NoFields {
                            span: object.span.clone(),
                        })
                    }
                };

                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());
                Ok(value)
            }

            ExprKind::This => self.look_up_variable(expression.id, "this", &expression.span),

            ExprKind::Super { method } => self.evaluate_super(expression, method),

            ExprKind::Grouped(inner) => self.evaluate(inner),
        }
    }

    fn evaluate_binary(
        &mut self,
        expression: &Expr,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
    ) -> Result<Value, RuntimeError> {
        let left_value = self.evaluate(left)?;
        let right_value = self.evaluate(right)?;

        match op {
            BinaryOp::Add => match (left_value, right_value) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
                _ => Err(RuntimeError::InvalidAddition {
                    span: expression.span.clone(),
                }),
            },

            BinaryOp::Sub => {
                let (a, b) = number_operands(left_value, right_value, &expression.span)?;
                Ok(Value::Number(a - b))
            }
            BinaryOp::Mul => {
                let (a, b) = number_operands(left_value, right_value, &expression.span)?;
                Ok(Value::Number(a * b))
            }
            BinaryOp::Div => {
                let (a, b) = number_operands(left_value, right_value, &expression.span)?;
                Ok(Value::Number(a / b))
            }

            BinaryOp::Equal => Ok(Value::Boolean(left_value == right_value)),
            BinaryOp::NotEqual => Ok(Value::Boolean(left_value != right_value)),

            BinaryOp::Less => {
                let (a, b) = number_operands(left_value, right_value, &expression.span)?;
                Ok(Value::Boolean(a < b))
            }
            BinaryOp::Greater => {
                let (a, b) = number_operands(left_value, right_value, &expression.span)?;
                Ok(Value::Boolean(a > b))
            }
            BinaryOp::LessEqual => {
                let (a, b) = number_operands(left_value, right_value, &expression.span)?;
                Ok(Value::Boolean(a <= b))
            }
            BinaryOp::GreaterEqual => {
                let (a, b) = number_operands(left_value, right_value, &expression.span)?;
                Ok(Value::Boolean(a >= b))
            }
        }
    }

    fn evaluate_call(
        &mut self,
        expression: &Expr,
        callee: &Expr,
        args: &[Expr],
    ) -> Result<Value, RuntimeError> {
        let callee_value = self.evaluate(callee)?;

        let mut arguments = Vec::with_capacity(args.len());
        for arg in args {
            arguments.push(self.evaluate(arg)?);
        }

        match callee_value {
            Value::Function(function) => {
                check_arity(function.arity(), arguments.len(), &expression.span)?;
                function.call(self, arguments, &expression.span)
            }
            Value::Native(native) => {
                check_arity(native.arity, arguments.len(), &expression.span)?;
                Ok((native.function)(&arguments))
            }
            Value::Class(class) => {
                check_arity(class.arity(), arguments.len(), &expression.span)?;
                Class::instantiate(&class, self, arguments, &expression.span)
            }
            _ => Err(RuntimeError::NotCallable {
                span: callee.span.clone(),
            }),
        }
    }

    fn evaluate_super(
        &mut self,
        expression: &Expr,
        method: &str,
    ) -> Result<Value, RuntimeError> {
        let distance = match self.locals.depth(expression.id) {
            Some(distance) => distance,
            None => {
                return Err(RuntimeError::UndefinedVariable {
                    name: "super".to_string(),
                    span: expression.span.clone(),
                })
            }
        };

        let superclass = match self.environment.borrow().get_at(distance, "super") {
            Some(Value::Class(class)) => class,
            _ => {
                return Err(RuntimeError::UndefinedVariable {
                    name: "super".to_string(),
                    span: expression.span.clone(),
                })
            }
        };

        // `this` lives one environment inside the one holding `super`.
        let instance = match self.environment.borrow().get_at(distance - 1, "this") {
            Some(Value::Instance(instance)) => instance,
            _ => {
                return Err(RuntimeError::UndefinedVariable {
                    name: "this".to_string(),
                    span: expression.span.clone(),
                })
            }
        };

        match superclass.find_method(method) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(instance)))),
            None => Err(RuntimeError::UndefinedProperty {
                name: method.to_string(),
                span: expression.span.clone(),
            }),
        }
    }
}

fn number_operands(left: Value, right: Value, span: &Span) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((a, b)),
        _ => Err(RuntimeError::OperandsNotNumbers { span: span.clone() }),
    }
}

fn check_arity(expected: usize, got: usize, span: &Span) -> Result<(), RuntimeError> {
    if expected == got {
        Ok(())
    } else {
        Err(RuntimeError::ArityMismatch {
            expected,
            got,
            span: span.clone(),
        })
    }
}
