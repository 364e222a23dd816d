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

//! Tarn Interpreter Library
//!
//! This library provides all the components needed to run Tarn source code:
//! a lexer, a recursive descent parser, a static resolution pass, and a
//! tree-walking interpreter.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`lexer`] - Tokenization of source code
//! - [`parser`] - Parsing tokens into an AST
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`resolver`] - Static scope resolution
//! - [`interpreter`] - Tree-walking execution
//! - [`runner`] - File watching for watch mode
//!
//! # Example
//!
//! ```no_run
//! use tarn::Interpreter;
//!
//! fn run(source: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut interpreter = Interpreter::new();
//!
//!     // Tokenize, parse and resolve
//!     let program = tarn::compile(source, interpreter.locals_mut())
//!         .map_err(|errors| errors.into_iter().next().unwrap())?;
//!
//!     // Execute
//!     interpreter.run(&program)?;
//!
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod runner;

// Re-export commonly used types
pub use ast::{ExprId, Program};
pub use error::{
    format_error, format_runtime_error, CompileError, ErrorCode, Result, RuntimeError,
    SourceLocation, Span,
};
pub use interpreter::{Interpreter, Locals, Value};
pub use lexer::Token;

/// The version of the Tarn interpreter.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the interpreter.
pub const NAME: &str = "Tarn";

/// Compile source code into a resolved program.
///
/// This is the main entry point for the static pipeline. It performs all
/// stages that run before execution: lexing, parsing, and resolution.
/// Scope distances are recorded into `locals`, which the interpreter that
/// owns the table reads back during execution.
///
/// # Arguments
///
/// * `source` - The source code to compile
/// * `locals` - The distance table of the interpreter that will run the program
///
/// # Returns
///
/// Returns the resolved program, or every diagnostic the pipeline found.
/// Lexing and parsing stop at their first error; resolution collects all
/// of its diagnostics in one pass.
///
/// # Example
///
/// ```no_run
/// let mut interpreter = tarn::Interpreter::new();
///
/// match tarn::compile("print 1 + 2;", interpreter.locals_mut()) {
///     Ok(program) => {
///         interpreter.run(&program).unwrap();
///     }
///     Err(errors) => {
///         for error in errors {
///             eprintln!("{}", error);
///         }
///     }
/// }
/// ```
pub fn compile(
    source: &str,
    locals: &mut Locals,
) -> std::result::Result<Program, Vec<CompileError>> {
    // Tokenize
    let tokens = lexer::tokenize(source).map_err(|error| vec![error])?;

    // Parse
    let program = parser::parse(&tokens).map_err(|error| vec![error])?;

    // Resolve
    resolver::resolve(&program, locals)?;

    Ok(program)
}
