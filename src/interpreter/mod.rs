// Tarn - A tree-walking interpreter for the Tarn scripting language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Interpreter module for the Tarn language.
//!
//! This module executes a resolved AST directly. Statements run for their
//! effects and expressions evaluate to [`Value`]s. References the resolver
//! recorded are read through fixed environment-chain distances; everything
//! else falls through to the global environment. Because distances are
//! fixed at resolution time, a closure keeps seeing the binding that was
//! in scope where it was written, even when a later declaration shadows
//! the name.
//!
//! # Module Structure
//!
//! - `class` - Runtime classes and instances
//! - `environment` - The environment chain
//! - `expressions` - Expression evaluation (ExpressionEvaluator trait)
//! - `function` - Callable function values
//! - `locals` - The resolver's distance table
//! - `statements` - Statement execution (StatementExecutor trait)
//! - `value` - Runtime values

// Submodules
pub mod class;
pub mod environment;
pub mod expressions;
pub mod function;
pub mod locals;
pub mod statements;
pub mod value;

// Re-exports for the public pipeline surface
pub use environment::Environment;
pub use locals::Locals;
pub use value::Value;

// Internal imports from submodules
use function::NativeFunction;
use statements::StatementExecutor;

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::ast::{ExprId, Program, Statement};
use crate::error::{RuntimeError, Span};

/// Why execution of a statement stopped early.
#[derive(Debug)]
pub enum Interrupt {
    /// A `return` unwinding to the nearest enclosing call.
    Return(Value),
    /// A runtime failure unwinding out of the program.
    Failure(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Failure(error)
    }
}

/// The interpreter state.
///
/// Lives across programs: the REPL feeds one program per line into the
/// same interpreter, so globals and recorded distances accumulate.
pub struct Interpreter {
    /// The global environment.
    globals: Rc<RefCell<Environment>>,
    /// The environment of the code currently executing.
    pub(crate) environment: Rc<RefCell<Environment>>,
    /// Scope distances recorded during resolution.
    pub(crate) locals: Locals,
    /// Sink for `print` output.
    pub(crate) output: Box<dyn Write>,
}

impl Interpreter {
    /// Create an interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Create an interpreter printing to the given sink.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));
        define_natives(&mut globals.borrow_mut());

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: Locals::new(),
            output,
        }
    }

    /// The distance table, writable for the resolver.
    pub fn locals_mut(&mut self) -> &mut Locals {
        &mut self.locals
    }

    /// Read access to the recorded distances.
    pub fn locals(&self) -> &Locals {
        &self.locals
    }

    /// Execute a whole program.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for statement in &program.statements {
            match self.execute_statement(statement) {
                Ok(()) => {}
                // Top-level returns are rejected during resolution.
                Err(Interrupt::Return(_)) => return Ok(()),
                Err(Interrupt::Failure(error)) => return Err(error),
            }
        }
        Ok(())
    }

    /// Execute statements inside `environment`, then restore the previous
    /// environment, also when an interrupt unwinds.
    pub(crate) fn execute_block(
        &mut self,
        statements: &[Statement],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Interrupt> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            if let Err(interrupt) = self.execute_statement(statement) {
                result = Err(interrupt);
                break;
            }
        }

        self.environment = previous;
        result
    }

    /// Read a variable through its recorded distance. References without
    /// a recorded distance go to the global environment.
    pub(crate) fn look_up_variable(
        &self,
        id: ExprId,
        name: &str,
        span: &Span,
    ) -> Result<Value, RuntimeError> {
        let value = match self.locals.depth(id) {
            Some(distance) => self.environment.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        };

        value.ok_or_else(|| RuntimeError::UndefinedVariable {
            name: name.to_string(),
            span: span.clone(),
        })
    }

    /// Assignment counterpart of [`Interpreter::look_up_variable`].
    ///
    /// Returns `false` when the name is bound nowhere.
    pub(crate) fn assign_variable(&mut self, id: ExprId, name: &str, value: Value) -> bool {
        match self.locals.depth(id) {
            Some(distance) => self
                .environment
                .borrow_mut()
                .assign_at(distance, name, value),
            None => self.globals.borrow_mut().assign(name, value),
        }
    }

    /// Print a value followed by a newline to the output sink.
    pub(crate) fn write_line(&mut self, value: &Value, span: &Span) -> Result<(), RuntimeError> {
        writeln!(self.output, "{}", value)
            .and_then(|_| self.output.flush())
            .map_err(|error| RuntimeError::OutputFailed {
                message: error.to_string(),
                span: span.clone(),
            })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the built-in functions into the global environment.
fn define_natives(globals: &mut Environment) {
    globals.define(
        "clock",
        Value::Native(Rc::new(NativeFunction {
            name: "clock",
            arity: 0,
            function: native_clock,
        })),
    );
}

/// Seconds since the Unix epoch, as a floating-point number.
fn native_clock(_arguments: &[Value]) -> Value {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0);
    Value::Number(seconds)
}
