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

//! Resolver module for the Tarn interpreter.
//!
//! This module runs the static resolution pass between parsing and
//! execution. It walks the AST once, simulating the block structure the
//! interpreter will create at runtime, and records for every local variable
//! reference how many environments separate the use from the definition.
//! The interpreter then reads each variable through that fixed distance, so
//! a closure always sees the variable that was lexically in scope where the
//! closure was written.
//!
//! The pass also rejects code that is structurally wrong regardless of
//! runtime values: duplicate declarations in one scope, `return` outside a
//! function, `this` and `super` outside a class, and a class inheriting
//! from itself. All diagnostics are collected in one walk; resolution never
//! stops at the first problem.
//!
//! # Module Structure
//!
//! - `context` - Tracking of enclosing function and class kinds
//! - `expressions` - Expression resolution (ExpressionResolver trait)
//! - `functions` - Function body resolution (FunctionResolver trait)
//! - `scope` - The scope stack and per-name declaration state
//! - `statements` - Statement resolution (StatementResolver trait)

// Submodules
pub mod context;
pub mod expressions;
pub mod functions;
pub mod scope;
pub mod statements;

// Internal imports from submodules
use context::ResolverContext;
use scope::ScopeStack;
use statements::StatementResolver;

use crate::ast::Program;
use crate::error::{CompileError, ErrorCode, Errors, Span};
use crate::interpreter::Locals;

/// The resolver state.
///
/// Distances are written through to the interpreter's [`Locals`] table,
/// which outlives the resolver; everything else is scratch state for one
/// pass.
pub struct Resolver<'a> {
    /// The stack of currently open scopes.
    pub(crate) scopes: ScopeStack,
    /// The enclosing function and class kinds.
    pub(crate) context: ResolverContext,
    /// Resolved distances, shared with the interpreter.
    pub(crate) locals: &'a mut Locals,
    /// Diagnostics collected so far.
    pub(crate) errors: Errors,
}

impl<'a> Resolver<'a> {
    /// Create a resolver writing distances into the given table.
    pub fn new(locals: &'a mut Locals) -> Self {
        Self {
            scopes: ScopeStack::new(),
            context: ResolverContext::new(),
            locals,
            errors: Errors::new(),
        }
    }

    /// Resolve a whole program.
    ///
    /// On success every local reference in the program has a recorded
    /// distance. On failure all collected diagnostics are returned; the
    /// distance table still holds entries for the references that did
    /// resolve.
    pub fn resolve(&mut self, program: &Program) -> Result<(), Vec<CompileError>> {
        self.resolve_statements(&program.statements);

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors).into_vec())
        }
    }

    /// Reserve `name` in the innermost scope, reporting duplicates.
    pub(crate) fn declare(&mut self, name: &str, span: &Span) {
        if let Err(previous) = self.scopes.declare(name, span.clone()) {
            self.error(
                CompileError::new(
                    ErrorCode::DuplicateDeclaration,
                    format!("'{}' is already declared in this scope", name),
                    span.clone(),
                )
                .with_hint(format!("Previously declared at position {}", previous.start)),
            );
        }
    }

    /// Record a diagnostic and keep resolving.
    pub(crate) fn error(&mut self, error: CompileError) {
        self.errors.push(error);
    }
}

/// Resolve a program, recording scope distances into `locals`.
pub fn resolve(program: &Program, locals: &mut Locals) -> Result<(), Vec<CompileError>> {
    let mut resolver = Resolver::new(locals);
    resolver.resolve(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, ExprId, ExprKind, Statement, StatementKind};
    use crate::lexer::tokenize;
    use crate::parser::parse;

    /// Helper to tokenize, parse and resolve source code.
    fn resolve_source(source: &str) -> (Program, Locals, Vec<CompileError>) {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();
        let mut locals = Locals::new();
        let errors = match resolve(&program, &mut locals) {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };
        (program, locals, errors)
    }

    /// Collect every name reference in source order.
    ///
    /// `this` and `super` expressions appear under those names.
    fn references(program: &Program) -> Vec<(String, ExprId)> {
        let mut refs = Vec::new();
        for statement in &program.statements {
            collect_statement_refs(statement, &mut refs);
        }
        refs
    }

    fn collect_statement_refs(statement: &Statement, refs: &mut Vec<(String, ExprId)>) {
        match &statement.kind {
            StatementKind::Var(decl) => {
                if let Some(init) = &decl.initializer {
                    collect_expr_refs(init, refs);
                }
            }
            StatementKind::Function(decl) => {
                for statement in &decl.body {
                    collect_statement_refs(statement, refs);
                }
            }
            StatementKind::Class(decl) => {
                if let Some(superclass) = &decl.superclass {
                    collect_expr_refs(superclass, refs);
                }
                for method in &decl.methods {
                    for statement in &method.body {
                        collect_statement_refs(statement, refs);
                    }
                }
            }
            StatementKind::Expression(expr) | StatementKind::Print(expr) => {
                collect_expr_refs(expr, refs);
            }
            StatementKind::If(if_stmt) => {
                collect_expr_refs(&if_stmt.condition, refs);
                collect_statement_refs(&if_stmt.then_branch, refs);
                if let Some(else_branch) = &if_stmt.else_branch {
                    collect_statement_refs(else_branch, refs);
                }
            }
            StatementKind::While(while_stmt) => {
                collect_expr_refs(&while_stmt.condition, refs);
                collect_statement_refs(&while_stmt.body, refs);
            }
            StatementKind::Return(value) => {
                if let Some(value) = value {
                    collect_expr_refs(value, refs);
                }
            }
            StatementKind::Block(statements) => {
                for statement in statements {
                    collect_statement_refs(statement, refs);
                }
            }
        }
    }

    fn collect_expr_refs(expr: &Expr, refs: &mut Vec<(String, ExprId)>) {
        match &expr.kind {
            ExprKind::Variable { name } => refs.push((name.clone(), expr.id)),
            ExprKind::Assign { name, value } => {
                refs.push((name.clone(), expr.id));
                collect_expr_refs(value, refs);
            }
            ExprKind::This => refs.push(("this".to_string(), expr.id)),
            ExprKind::Super { .. } => refs.push(("super".to_string(), expr.id)),
            ExprKind::BinaryOp { left, right, .. } | ExprKind::LogicalOp { left, right, .. } => {
                collect_expr_refs(left, refs);
                collect_expr_refs(right, refs);
            }
            ExprKind::UnaryOp { operand, .. } => collect_expr_refs(operand, refs),
            ExprKind::Call { callee, args } => {
                collect_expr_refs(callee, refs);
                for arg in args {
                    collect_expr_refs(arg, refs);
                }
            }
            ExprKind::Get { object, .. } => collect_expr_refs(object, refs),
            ExprKind::Set { object, value, .. } => {
                collect_expr_refs(object, refs);
                collect_expr_refs(value, refs);
            }
            ExprKind::Grouped(inner) => collect_expr_refs(inner, refs),
            ExprKind::NumberLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::NilLiteral => {}
        }
    }

    /// Helper to read the recorded distance of the nth reference to `name`.
    fn distance_of(
        locals: &Locals,
        refs: &[(String, ExprId)],
        name: &str,
        occurrence: usize,
    ) -> Option<usize> {
        let (_, id) = refs
            .iter()
            .filter(|(n, _)| n == name)
            .nth(occurrence)
            .unwrap_or_else(|| panic!("No reference number {} to '{}'", occurrence, name));
        locals.depth(*id)
    }

    // ========================================
    // Reference Distance Tests
    // ========================================

    #[test]
    fn test_global_references_record_nothing() {
        let (_, locals, errors) = resolve_source("var a = 1; print a;");

        assert!(errors.is_empty());
        assert!(locals.is_empty());
    }

    #[test]
    fn test_block_local_resolves_at_distance_zero() {
        let (program, locals, errors) = resolve_source("{ var a = 1; print a; }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(0));
        assert_eq!(locals.len(), 1);
    }

    #[test]
    fn test_nested_blocks_count_hops() {
        let (program, locals, errors) = resolve_source("{ var a = 1; { { print a; } } }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(2));
    }

    #[test]
    fn test_shadowing_binds_to_nearest_declaration() {
        let (program, locals, errors) =
            resolve_source("{ var a = 1; { var a = 2; print a; } }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(0));
        assert_eq!(locals.len(), 1);
    }

    #[test]
    fn test_parameter_resolves_in_function_body() {
        let (program, locals, errors) = resolve_source("fun f(x) { print x; }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "x", 0), Some(0));
    }

    #[test]
    fn test_closure_captures_outer_local() {
        let (program, locals, errors) =
            resolve_source("fun outer() { var a = 1; fun inner() { print a; } }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(1));
    }

    #[test]
    fn test_deeply_nested_closure_counts_every_scope() {
        let (program, locals, errors) =
            resolve_source("fun outer() { var a = 1; { fun inner() { { print a; } } } }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(3));
    }

    #[test]
    fn test_initializer_reference_binds_to_enclosing_scope() {
        let (program, locals, errors) = resolve_source("{ var a = 1; { var a = a; } }");
        let refs = references(&program);

        // The half-declared inner `a` is invisible to its own initializer.
        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(1));
        assert_eq!(locals.len(), 1);
    }

    #[test]
    fn test_global_initializer_self_reference_is_permitted() {
        let (_, locals, errors) = resolve_source("var a = a;");

        assert!(errors.is_empty());
        assert!(locals.is_empty());
    }

    #[test]
    fn test_assignment_records_its_own_distance() {
        let (program, locals, errors) = resolve_source("{ var a = 1; { a = 2; print a; } }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(1));
        assert_eq!(distance_of(&locals, &refs, "a", 1), Some(1));
        assert_eq!(locals.len(), 2);
    }

    #[test]
    fn test_function_can_reference_itself() {
        let (program, locals, errors) = resolve_source("{ fun f() { f(); } }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "f", 0), Some(1));
        assert_eq!(locals.len(), 1);
    }

    // ========================================
    // Class Resolution Tests
    // ========================================

    #[test]
    fn test_this_resolves_inside_method() {
        let (program, locals, errors) = resolve_source("class Cat { speak() { print this; } }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "this", 0), Some(1));
        assert_eq!(locals.len(), 1);
    }

    #[test]
    fn test_super_resolves_one_past_this() {
        let source = "class Animal { speak() { print 1; } } \
                      class Dog < Animal { speak() { super.speak(); print this; } }";
        let (program, locals, errors) = resolve_source(source);
        let refs = references(&program);

        assert!(errors.is_empty());
        let super_distance = distance_of(&locals, &refs, "super", 0);
        let this_distance = distance_of(&locals, &refs, "this", 0);
        assert_eq!(super_distance, Some(2));
        assert_eq!(this_distance, Some(1));
    }

    #[test]
    fn test_this_in_nested_block_counts_hops() {
        let (program, locals, errors) =
            resolve_source("class Cat { speak() { { print this; } } }");
        let refs = references(&program);

        assert!(errors.is_empty());
        assert_eq!(distance_of(&locals, &refs, "this", 0), Some(2));
    }

    #[test]
    fn test_initializer_may_return_bare() {
        let (_, _, errors) = resolve_source("class Cat { init() { return; } }");

        assert!(errors.is_empty());
    }

    #[test]
    fn test_initializer_cannot_return_value() {
        let (_, _, errors) = resolve_source("class Cat { init() { return 42; } }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ReturnValueFromInitializer);
        assert_eq!(errors[0].message, "Cannot return a value from an initializer");
    }

    #[test]
    fn test_this_outside_class_is_rejected() {
        let (_, _, errors) = resolve_source("print this;");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ThisOutsideClass);
        assert_eq!(errors[0].message, "Cannot use 'this' outside of a class");
    }

    #[test]
    fn test_this_in_free_function_is_rejected() {
        let (_, _, errors) = resolve_source("fun f() { print this; }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ThisOutsideClass);
    }

    #[test]
    fn test_super_outside_class_is_rejected() {
        let (_, _, errors) = resolve_source("super.speak();");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::SuperOutsideClass);
        assert_eq!(errors[0].message, "Cannot use 'super' outside of a class");
    }

    #[test]
    fn test_super_without_superclass_is_rejected() {
        let (_, _, errors) = resolve_source("class Cat { speak() { super.speak(); } }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::SuperWithoutSuperclass);
        assert_eq!(
            errors[0].message,
            "Cannot use 'super' in a class with no superclass"
        );
    }

    #[test]
    fn test_self_inheritance_reports_one_error() {
        let (_, locals, errors) = resolve_source("class Ouroboros < Ouroboros {}");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::SelfInheritance);
        assert_eq!(
            errors[0].message,
            "Class 'Ouroboros' cannot inherit from itself"
        );
        assert!(locals.is_empty());
    }

    #[test]
    fn test_self_inheritance_still_resolves_the_superclass() {
        let (program, locals, errors) = resolve_source("{ class Loop < Loop {} }");
        let refs = references(&program);

        // The reference is bogus but it still gets a distance, so the
        // runtime fails with its own diagnostic instead of a lost lookup.
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::SelfInheritance);
        assert_eq!(distance_of(&locals, &refs, "Loop", 0), Some(0));
        assert_eq!(locals.len(), 1);
    }

    // ========================================
    // Duplicate Declaration Tests
    // ========================================

    #[test]
    fn test_duplicate_in_block_is_rejected() {
        let (_, _, errors) = resolve_source("{ var a = 1; var a = 2; }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::DuplicateDeclaration);
        assert_eq!(errors[0].message, "'a' is already declared in this scope");
        assert_eq!(errors[0].span, Span::new(17, 18));
        assert_eq!(
            errors[0].hint.as_deref(),
            Some("Previously declared at position 6")
        );
    }

    #[test]
    fn test_global_redeclaration_is_permitted() {
        let (_, _, errors) = resolve_source("var a = 1; var a = 2;");

        assert!(errors.is_empty());
    }

    #[test]
    fn test_duplicate_parameter_is_rejected() {
        let (_, _, errors) = resolve_source("fun f(x, x) {}");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::DuplicateDeclaration);
        assert_eq!(errors[0].message, "'x' is already declared in this scope");
    }

    #[test]
    fn test_resolution_continues_after_duplicate() {
        let (program, locals, errors) = resolve_source("{ var a = 1; var a = 2; print a; }");
        let refs = references(&program);

        assert_eq!(errors.len(), 1);
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(0));
        assert_eq!(locals.len(), 1);
    }

    // ========================================
    // Return Statement Tests
    // ========================================

    #[test]
    fn test_return_at_top_level_is_rejected() {
        let (_, _, errors) = resolve_source("return 42;");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ReturnOutsideFunction);
        assert_eq!(errors[0].message, "Cannot return from top-level code");
        assert_eq!(errors[0].span, Span::new(0, 10));
    }

    #[test]
    fn test_return_inside_function_is_permitted() {
        let (_, _, errors) = resolve_source("fun f() { return 1; }");

        assert!(errors.is_empty());
    }

    #[test]
    fn test_rejected_return_still_resolves_its_value() {
        let (program, locals, errors) = resolve_source("{ var a = 1; return a; }");
        let refs = references(&program);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ReturnOutsideFunction);
        assert_eq!(distance_of(&locals, &refs, "a", 0), Some(0));
    }

    #[test]
    fn test_multiple_errors_are_reported_in_order() {
        let (_, _, errors) = resolve_source("return 1; print this;");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, ErrorCode::ReturnOutsideFunction);
        assert_eq!(errors[1].code, ErrorCode::ThisOutsideClass);
    }

    // ========================================
    // Resolver State Tests
    // ========================================

    #[test]
    fn test_resolution_is_idempotent() {
        let source = "fun outer() { var a = 1; fun inner() { print a; } } \
                      class A { m() { print this; } } \
                      { var b = 2; b = b + 1; }";
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();

        let mut first = Locals::new();
        let mut second = Locals::new();
        resolve(&program, &mut first).unwrap();
        resolve(&program, &mut second).unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_scopes_are_balanced_after_success() {
        let source = "{ fun f(x) { { print x; } } class C { m() { print this; } } }";
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();

        let mut locals = Locals::new();
        let mut resolver = Resolver::new(&mut locals);
        resolver.resolve(&program).unwrap();

        assert!(resolver.scopes.is_empty());
    }

    #[test]
    fn test_scopes_are_balanced_after_errors() {
        let source = "{ class A < A { init() { return 42; } } }";
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();

        let mut locals = Locals::new();
        let mut resolver = Resolver::new(&mut locals);
        let result = resolver.resolve(&program);

        assert!(result.is_err());
        assert!(resolver.scopes.is_empty());
    }
}
