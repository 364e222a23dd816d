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

//! Function body resolution.
//!
//! Every function body, whether a free function or a method, resolves in a
//! fresh scope holding its parameters. The surrounding function context is
//! saved and restored so that `return` checks see the innermost function
//! even when declarations nest.

use super::context::FunctionKind;
use super::statements::StatementResolver;
use super::Resolver;
use crate::ast::FunctionDecl;

/// Resolution of function declarations and their bodies.
pub trait FunctionResolver {
    /// Resolve a function body under the given function kind.
    fn resolve_function(&mut self, declaration: &FunctionDecl, kind: FunctionKind);
}

impl<'a> FunctionResolver for Resolver<'a> {
    fn resolve_function(&mut self, declaration: &FunctionDecl, kind: FunctionKind) {
        let old_context = self.context;
        self.context.function = kind;

        // Parameters and body locals share one scope level.
        self.scopes.push();
        for param in &declaration.params {
            self.declare(&param.name, &param.span);
            self.scopes.define(&param.name, param.span.clone());
        }
        self.resolve_statements(&declaration.body);
        self.scopes.pop();

        self.context = old_context;
    }
}
