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

//! Parser module for the Tarn interpreter.
//!
//! This module parses a token stream into an Abstract Syntax Tree (AST).
//! It uses recursive descent parsing with precedence climbing for expressions.
//! Every expression node is tagged with a unique [`ExprId`] so later passes
//! can attach per-expression data without walking the tree again.
//!
//! # Module Structure
//!
//! - `control_flow` - Control flow statement parsing (ControlFlowParser trait)
//! - `expressions` - Expression parsing (ExpressionParser trait)
//! - `helpers` - Token stream navigation and error handling (ParserHelpers trait)
//! - `statements` - Statement and declaration parsing (StatementParser trait)

// Submodules
pub mod control_flow;
pub mod expressions;
pub mod helpers;
pub mod statements;

// Internal imports from submodules
use helpers::ParserHelpers;
use statements::StatementParser;

use crate::ast::{ExprId, Program};
use crate::error::{CompileError, Span};
use crate::lexer::Token;

/// The parser state.
pub struct Parser<'a> {
    /// The token stream to parse.
    pub(crate) tokens: &'a [(Token, Span)],
    /// Current position in the token stream.
    pub(crate) position: usize,
    /// The id handed out to the next expression node.
    pub(crate) next_expr_id: u32,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given token stream.
    pub fn new(tokens: &'a [(Token, Span)]) -> Self {
        Self {
            tokens,
            position: 0,
            next_expr_id: 0,
        }
    }

    /// Create a parser whose expression ids start at `first_id`.
    ///
    /// The REPL uses this to keep ids unique across separately parsed
    /// lines that share one resolution table.
    pub fn with_first_id(tokens: &'a [(Token, Span)], first_id: ExprId) -> Self {
        Self {
            tokens,
            position: 0,
            next_expr_id: first_id.index(),
        }
    }

    /// The id the next parsed expression node will receive.
    pub fn next_id(&self) -> ExprId {
        ExprId::new(self.next_expr_id)
    }

    /// Allocate a fresh expression id.
    pub(crate) fn fresh_id(&mut self) -> ExprId {
        let id = ExprId::new(self.next_expr_id);
        self.next_expr_id += 1;
        id
    }

    // ========================================
    // Program Parsing
    // ========================================

    /// Parse the complete program.
    pub fn parse(&mut self) -> Result<Program, CompileError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let statement = self.parse_declaration()?;
            program.add_statement(statement);
        }

        Ok(program)
    }
}

/// Parse a token stream into a program AST.
pub fn parse(tokens: &[(Token, Span)]) -> Result<Program, CompileError> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}
