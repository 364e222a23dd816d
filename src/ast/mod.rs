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

//! Abstract Syntax Tree (AST) definitions for the Tarn interpreter.
//!
//! This module defines the data structures that represent a parsed Tarn
//! program. Every expression node carries an [`ExprId`] assigned by the
//! parser; the resolver keys its scope-distance records on that identity.

mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

/// A stable identity for one expression node, assigned at parse time.
///
/// Ids are unique within a parser session, so a distance table keyed by
/// `ExprId` never confuses two references with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

impl ExprId {
    /// Create an id from a raw index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index of this id.
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// A complete Tarn program.
#[derive(Debug, Clone)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Create a new empty program.
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    /// Add a top-level statement to the program.
    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}
