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

//! Callable function values.
//!
//! A [`Function`] pairs a declaration with the environment it was declared
//! in. Calling one appends a fresh environment to that captured chain, so
//! the body sees the variables that were lexically in scope at the
//! declaration site no matter where the call happens.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::class::Instance;
use super::environment::Environment;
use super::value::Value;
use super::{Interpreter, Interrupt};
use crate::ast::FunctionDecl;
use crate::error::{RuntimeError, Span};

/// A user-defined function together with its captured environment.
pub struct Function {
    declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl Function {
    /// Create a function value closing over `closure`.
    pub fn new(
        declaration: Rc<FunctionDecl>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    /// The declared name of this function.
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    /// Number of parameters this function expects.
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Create a copy of this function with `this` bound to an instance.
    ///
    /// The binding lives in a one-entry environment spliced between the
    /// function and its original closure, one hop past the call scope.
    pub fn bind(&self, instance: Rc<RefCell<Instance>>) -> Function {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        environment.define("this", Value::Instance(instance));

        Function {
            declaration: Rc::clone(&self.declaration),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    /// Call this function with already evaluated arguments.
    ///
    /// The caller has checked the arity. Initializers hand back `this`
    /// regardless of how the body exits.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        span: &Span,
    ) -> Result<Value, RuntimeError> {
        let environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
            &self.closure,
        ))));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.name, argument);
        }

        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => {
                if self.is_initializer {
                    self.this_value(span)
                } else {
                    Ok(Value::Nil)
                }
            }
            Err(Interrupt::Return(value)) => {
                if self.is_initializer {
                    self.this_value(span)
                } else {
                    Ok(value)
                }
            }
            Err(Interrupt::Failure(error)) => Err(error),
        }
    }

    fn this_value(&self, span: &Span) -> Result<Value, RuntimeError> {
        match self.closure.borrow().get_at(0, "this") {
            Some(value) => Ok(value),
            None => Err(RuntimeError::UndefinedVariable {
                name: "this".to_string(),
                span: span.clone(),
            }),
        }
    }
}

// Closures may capture themselves through their environment, so the
// derived implementation would recurse. Print the name only.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.declaration.name)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// A built-in function implemented in Rust.
#[derive(Debug)]
pub struct NativeFunction {
    /// Name the function is bound to in the global environment.
    pub name: &'static str,
    /// Number of arguments the function expects.
    pub arity: usize,
    /// The wrapped implementation.
    pub function: fn(&[Value]) -> Value,
}
