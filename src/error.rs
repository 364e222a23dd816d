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

//! Error types for the Tarn interpreter.
//!
//! This module defines all error types used throughout the interpreter:
//! lexical, syntax, and semantic errors surface as [`CompileError`] before
//! a program runs, while [`RuntimeError`] covers failures during execution.

use std::io;
use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span from a range.
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::from_range(range)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Error codes for the interpreter's static pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E010)
    UnexpectedCharacter,
    UnterminatedString,

    // Syntax errors (E100-E111)
    UnexpectedToken,
    ExpectedExpression,
    ExpectedIdentifier,
    InvalidAssignmentTarget,
    TooManyArguments,
    TooManyParameters,

    // Semantic errors (E201-E207)
    DuplicateDeclaration,
    SelfInheritance,
    ThisOutsideClass,
    SuperOutsideClass,
    SuperWithoutSuperclass,
    ReturnOutsideFunction,
    ReturnValueFromInitializer,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            // Lexical errors
            ErrorCode::UnexpectedCharacter => "E001",
            ErrorCode::UnterminatedString => "E010",

            // Syntax errors
            ErrorCode::UnexpectedToken => "E100",
            ErrorCode::ExpectedExpression => "E103",
            ErrorCode::ExpectedIdentifier => "E105",
            ErrorCode::InvalidAssignmentTarget => "E109",
            ErrorCode::TooManyArguments => "E110",
            ErrorCode::TooManyParameters => "E111",

            // Semantic errors
            ErrorCode::DuplicateDeclaration => "E201",
            ErrorCode::SelfInheritance => "E202",
            ErrorCode::ThisOutsideClass => "E203",
            ErrorCode::SuperOutsideClass => "E204",
            ErrorCode::SuperWithoutSuperclass => "E205",
            ErrorCode::ReturnOutsideFunction => "E206",
            ErrorCode::ReturnValueFromInitializer => "E207",
        }
    }
}

/// A static error with source location, produced before a program runs.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// An error raised while a program is executing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// A variable reference could not be resolved anywhere, including globals.
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String, span: Span },

    /// A property read found neither a field nor a method.
    #[error("Undefined property '{name}'")]
    UndefinedProperty { name: String, span: Span },

    /// A unary operator was applied to a non-number.
    #[error("Operand must be a number")]
    OperandNotNumber { span: Span },

    /// A binary arithmetic or comparison operator was applied to non-numbers.
    #[error("Operands must be numbers")]
    OperandsNotNumbers { span: Span },

    /// `+` was applied to a mix that is neither two numbers nor two strings.
    #[error("Operands must be two numbers or two strings")]
    InvalidAddition { span: Span },

    /// Call syntax was used on a value that is not a function or class.
    #[error("Can only call functions and classes")]
    NotCallable { span: Span },

    /// A call passed the wrong number of arguments.
    #[error("Expected {expected} arguments but got {got}")]
    ArityMismatch {
        expected: usize,
        got: usize,
        span: Span,
    },

    /// A property read on a value that is not an instance.
    #[error("Only instances have properties")]
    NotAnInstance { span: Span },

    /// A property write on a value that is not an instance.
    #[error("Only instances have fields")]
    NoFields { span: Span },

    /// A superclass expression evaluated to something other than a class.
    #[error("Superclass must be a class")]
    SuperclassNotClass { span: Span },

    /// The interpreter's output sink rejected a write.
    #[error("Failed to write output: {message}")]
    OutputFailed { message: String, span: Span },
}

impl RuntimeError {
    /// Get the source span where the error occurred.
    pub fn span(&self) -> &Span {
        match self {
            RuntimeError::UndefinedVariable { span, .. } => span,
            RuntimeError::UndefinedProperty { span, .. } => span,
            RuntimeError::OperandNotNumber { span } => span,
            RuntimeError::OperandsNotNumbers { span } => span,
            RuntimeError::InvalidAddition { span } => span,
            RuntimeError::NotCallable { span } => span,
            RuntimeError::ArityMismatch { span, .. } => span,
            RuntimeError::NotAnInstance { span } => span,
            RuntimeError::NoFields { span } => span,
            RuntimeError::SuperclassNotClass { span } => span,
            RuntimeError::OutputFailed { span, .. } => span,
        }
    }
}

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        // Extract the line content
        let line_start = last_newline;
        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[line_start..line_end].to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format a compile error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    format_with_context(
        &format!("error[{}]: {}", error.code_str(), error.message),
        &error.span,
        error.hint.as_deref(),
        source,
        filename,
    )
}

/// Format a runtime error with source context.
pub fn format_runtime_error(error: &RuntimeError, source: &str, filename: Option<&str>) -> String {
    format_with_context(
        &format!("runtime error: {}", error),
        error.span(),
        None,
        source,
        filename,
    )
}

fn format_with_context(
    header: &str,
    span: &Span,
    hint: Option<&str>,
    source: &str,
    filename: Option<&str>,
) -> String {
    let loc = SourceLocation::from_offset(source, span.start);
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    // Error header
    output.push_str(&format!("{}\n", header));

    // Location
    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    // Source context
    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    // Underline the error span
    let underline_start = loc.column - 1;
    let underline_len = (span.end - span.start)
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start));
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    // Hint if available
    if let Some(hint) = hint {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}

/// Print a compile error as a rich report on stderr.
pub fn print_report(error: &CompileError, source: &str, filename: &str) -> io::Result<()> {
    let span = clamp_span(&error.span, source);

    let mut report = Report::build(ReportKind::Error, filename, span.start)
        .with_code(error.code_str())
        .with_message(&error.message)
        .with_label(
            Label::new((filename, span))
                .with_message(&error.message)
                .with_color(Color::Red),
        );

    if let Some(hint) = &error.hint {
        report = report.with_note(hint);
    }

    report
        .finish()
        .eprint((filename, Source::from(source)))
}

/// Print a runtime error as a rich report on stderr.
pub fn print_runtime_report(error: &RuntimeError, source: &str, filename: &str) -> io::Result<()> {
    let span = clamp_span(error.span(), source);

    Report::build(ReportKind::Error, filename, span.start)
        .with_message(format!("runtime error: {}", error))
        .with_label(
            Label::new((filename, span))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}

fn clamp_span(span: &Span, source: &str) -> Range<usize> {
    let start = span.start.min(source.len());
    let end = span.end.clamp(start, source.len());
    start..end
}

/// A collection of compile errors.
#[derive(Debug, Default)]
pub struct Errors {
    errors: Vec<CompileError>,
}

impl Errors {
    /// Create a new empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: CompileError) {
        self.errors.push(error);
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get an iterator over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &CompileError> {
        self.errors.iter()
    }

    /// Convert into a vector of errors.
    pub fn into_vec(self) -> Vec<CompileError> {
        self.errors
    }
}

impl IntoIterator for Errors {
    type Item = CompileError;
    type IntoIter = std::vec::IntoIter<CompileError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
