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

//! Scope management for the resolver.
//!
//! A scope represents a lexical region where names are declared. Scopes are
//! nested strictly LIFO, so they form a stack. The global scope is never
//! modeled here; an empty stack means all lookups fall through to the
//! runtime's global environment.

use crate::error::Span;
use std::collections::HashMap;

/// Declaration state of a name within one scope.
///
/// A name moves from `Declared` to `Defined` once its initializer has been
/// resolved, so an initializer can never observe its own name as usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableState {
    /// Name reserved; its initializer has not finished resolving.
    Declared,
    /// Name fully usable.
    Defined,
}

/// One lexical scope: names mapped to their state and declaration site.
#[derive(Debug, Default)]
pub struct Scope {
    entries: HashMap<String, (VariableState, Span)>,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a name in this scope.
    ///
    /// Returns the span of the previous declaration if the name already has
    /// any state here.
    pub fn declare(&mut self, name: &str, span: Span) -> Result<(), Span> {
        if let Some((_, previous)) = self.entries.get(name) {
            return Err(previous.clone());
        }
        self.entries
            .insert(name.to_string(), (VariableState::Declared, span));
        Ok(())
    }

    /// Mark a name as usable, regardless of prior state.
    pub fn define(&mut self, name: &str, span: Span) {
        self.entries
            .insert(name.to_string(), (VariableState::Defined, span));
    }

    /// Look up the state of a name in this scope.
    pub fn state_of(&self, name: &str) -> Option<VariableState> {
        self.entries.get(name).map(|(state, _)| *state)
    }
}

/// The stack of currently open scopes, innermost last.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// Create an empty scope stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new innermost scope.
    pub fn push(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Close the innermost scope.
    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Check if no scope is open (global depth).
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Reserve `name` in the innermost scope. A no-op at global depth.
    ///
    /// Returns the span of the previous declaration on a duplicate.
    pub fn declare(&mut self, name: &str, span: Span) -> Result<(), Span> {
        match self.scopes.last_mut() {
            Some(scope) => scope.declare(name, span),
            None => Ok(()),
        }
    }

    /// Mark `name` as usable in the innermost scope. A no-op at global depth.
    pub fn define(&mut self, name: &str, span: Span) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.define(name, span);
        }
    }

    /// Find the hop count from the innermost scope to the one defining `name`.
    ///
    /// Scopes holding the name in `Declared` state are skipped, so an
    /// initializer reference like `var a = a;` binds to the enclosing
    /// declaration instead of the name it is about to define. Returns `None`
    /// when no open scope defines the name; such references are left to the
    /// global environment at runtime.
    pub fn depth_of(&self, name: &str) -> Option<usize> {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.state_of(name) == Some(VariableState::Defined) {
                return Some(depth);
            }
        }
        None
    }
}
