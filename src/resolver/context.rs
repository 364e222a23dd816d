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

//! Resolution context tracking.
//!
//! The resolver needs to know what kind of code surrounds the statement it
//! is looking at: `return` is only legal inside a function, `this` only
//! inside a class, `super` only inside a subclass. The context is saved and
//! restored around every function body and class declaration, so nesting
//! unwinds correctly.

/// What kind of function body the resolver is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionKind {
    /// Top-level code, outside any function.
    #[default]
    None,
    /// A free function declaration.
    Function,
    /// An `init` method; returning a value is rejected here.
    Initializer,
    /// A method declared in a class body.
    Method,
}

/// What kind of class body the resolver is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    /// Outside any class.
    #[default]
    None,
    /// A class without a superclass; `super` is rejected here.
    Class,
    /// A class with a superclass.
    Subclass,
}

/// The surrounding code kinds for the statement currently being resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverContext {
    /// Nearest enclosing function kind.
    pub function: FunctionKind,
    /// Nearest enclosing class kind.
    pub class: ClassKind,
}

impl ResolverContext {
    /// Create a top-level context.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_is_top_level() {
        let context = ResolverContext::new();

        assert_eq!(context.function, FunctionKind::None);
        assert_eq!(context.class, ClassKind::None);
    }

    #[test]
    fn test_context_is_copied_for_save_restore() {
        let mut context = ResolverContext::new();
        let saved = context;

        context.function = FunctionKind::Method;
        context.class = ClassKind::Subclass;

        assert_eq!(saved.function, FunctionKind::None);
        assert_eq!(saved.class, ClassKind::None);
    }
}
