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

//! Property-based tests for the Tarn interpreter.
//!
//! These tests verify important invariants and properties that should
//! hold for all inputs, using proptest for random input generation.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use proptest::prelude::*;
use tarn::{lexer, parser, resolver, Interpreter, Locals};

/// Clonable write target so a test can read back what a program printed.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

/// Compile and run one source text, returning everything it printed.
fn run_source(source: &str) -> Result<String, String> {
    let buffer = SharedBuffer::default();
    let mut interpreter = Interpreter::with_output(Box::new(buffer.clone()));

    let program = tarn::compile(source, interpreter.locals_mut())
        .map_err(|errors| format!("compile failed: {:?}", errors))?;

    interpreter
        .run(&program)
        .map_err(|error| format!("runtime failed: {:?}", error))?;

    Ok(buffer.contents())
}

// ============================================================================
// Lexer Property Tests
// ============================================================================

proptest! {
    /// Property: All tokens have non-negative length spans.
    #[test]
    fn prop_lexer_spans_valid(source in "[a-zA-Z0-9_ +\\-*/=;(){}\\n]{0,200}") {
        if let Ok(tokens) = lexer::tokenize(&source) {
            for (_, span) in &tokens {
                prop_assert!(
                    span.start <= span.end,
                    "Invalid span: start {} > end {}", span.start, span.end
                );
            }
        }
    }

    /// Property: Token spans are within source bounds.
    #[test]
    fn prop_lexer_spans_in_bounds(source in "[a-zA-Z0-9_ +\\-*/=;(){}\\n]{0,200}") {
        if let Ok(tokens) = lexer::tokenize(&source) {
            let source_len = source.len();
            for (token, span) in &tokens {
                prop_assert!(
                    span.end <= source_len,
                    "Token {:?} span end {} exceeds source length {}",
                    token, span.end, source_len
                );
            }
        }
    }

    /// Property: Token spans are non-overlapping and ordered.
    #[test]
    fn prop_lexer_spans_non_overlapping(source in "[a-zA-Z0-9_ ]{0,100}") {
        if let Ok(tokens) = lexer::tokenize(&source) {
            for window in tokens.windows(2) {
                let (_, span1) = &window[0];
                let (_, span2) = &window[1];
                prop_assert!(
                    span1.end <= span2.start,
                    "Overlapping spans: {:?} and {:?}", span1, span2
                );
            }
        }
    }

    /// Property: Lexer produces consistent results (deterministic).
    #[test]
    fn prop_lexer_deterministic(source in "[a-zA-Z0-9_ ]{0,100}") {
        let result1 = lexer::tokenize(&source);
        let result2 = lexer::tokenize(&source);

        match (result1, result2) {
            (Ok(tokens1), Ok(tokens2)) => {
                prop_assert_eq!(tokens1.len(), tokens2.len(),
                    "Different token counts on same input");
            }
            (Err(_), Err(_)) => {
                // Both failed, that's consistent
            }
            _ => {
                prop_assert!(false, "Inconsistent lexer results");
            }
        }
    }

    /// Property: Integer literals tokenize.
    #[test]
    fn prop_lexer_integers(n in 0u32..=1_000_000u32) {
        let source = format!("var x = {};", n);
        let result = lexer::tokenize(&source);
        prop_assert!(result.is_ok(), "Valid number {} should tokenize", n);
    }

    /// Property: Decimal literals tokenize.
    #[test]
    fn prop_lexer_decimals(whole in 0u32..10_000u32, frac in 0u32..10_000u32) {
        let source = format!("var x = {}.{};", whole, frac);
        let result = lexer::tokenize(&source);
        prop_assert!(result.is_ok(), "Decimal {}.{} should tokenize", whole, frac);
    }

    /// Property: Prefixed identifiers never collide with keywords.
    #[test]
    fn prop_lexer_identifiers(name in "v_[a-z][a-z0-9_]{0,10}") {
        let source = format!("var {} = 1;", name);
        let tokens = lexer::tokenize(&source);
        prop_assert!(tokens.is_ok(), "Identifier {} should tokenize", name);
    }
}

// ============================================================================
// Parser Property Tests
// ============================================================================

proptest! {
    /// Property: Minimal valid programs always parse.
    #[test]
    fn prop_parser_minimal_programs(
        name in "v_[a-z][a-z0-9]{0,6}",
        val in 0u32..1000,
    ) {
        let source = format!("var {} = {}; print {};", name, val, name);
        let tokens = lexer::tokenize(&source).unwrap();
        let result = parser::parse(&tokens);
        prop_assert!(result.is_ok(),
            "Minimal program should parse: {}", source);
    }

    /// Property: Parser is deterministic.
    #[test]
    fn prop_parser_deterministic(val in 0u32..1000) {
        let source = format!("print {} + {};", val, val);
        let tokens = lexer::tokenize(&source).unwrap();

        let result1 = parser::parse(&tokens);
        let result2 = parser::parse(&tokens);

        match (&result1, &result2) {
            (Ok(_), Ok(_)) | (Err(_), Err(_)) => {
                // Consistent
            }
            _ => {
                prop_assert!(false, "Parser gave inconsistent results");
            }
        }
    }

    /// Property: Valid programs produce a statement per semicolon.
    #[test]
    fn prop_parser_produces_statements(count in 1usize..20) {
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("print {};\n", i));
        }

        let tokens = lexer::tokenize(&source).unwrap();
        let program = parser::parse(&tokens).unwrap();

        prop_assert_eq!(program.statements.len(), count);
    }

    /// Property: Nested groupings parse without stack overflow.
    #[test]
    fn prop_parser_nested_expressions(depth in 1usize..30) {
        let opens: String = "(".repeat(depth);
        let closes: String = ")".repeat(depth);
        let source = format!("print {}1{};", opens, closes);

        let tokens = lexer::tokenize(&source).unwrap();
        // Should not panic or stack overflow
        let _ = parser::parse(&tokens);
    }
}

// ============================================================================
// Resolution Property Tests
// ============================================================================

proptest! {
    /// Property: Global-only programs record no distances.
    #[test]
    fn prop_resolution_globals_record_nothing(count in 1usize..15) {
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("var g{} = {}; print g{};\n", i, i, i));
        }

        let mut locals = Locals::new();
        tarn::compile(&source, &mut locals).unwrap();

        prop_assert!(locals.is_empty(),
            "Global references must not be recorded");
    }

    /// Property: Every read of a block-scoped name is recorded.
    #[test]
    fn prop_resolution_block_reads_recorded(reads in 1usize..15) {
        let mut source = String::from("{ var x = 1;");
        for _ in 0..reads {
            source.push_str(" print x;");
        }
        source.push_str(" }");

        let mut locals = Locals::new();
        tarn::compile(&source, &mut locals).unwrap();

        prop_assert_eq!(locals.len(), reads,
            "Each read records its own distance");
    }

    /// Property: Resolving the same program twice gives the same table.
    #[test]
    fn prop_resolution_deterministic(depth in 1usize..10) {
        let source = format!(
            "{}var x = 1; print x;{}",
            "{ ".repeat(depth),
            " }".repeat(depth)
        );
        let tokens = lexer::tokenize(&source).unwrap();
        let program = parser::parse(&tokens).unwrap();

        let mut locals1 = Locals::new();
        let mut locals2 = Locals::new();
        resolver::resolve(&program, &mut locals1).unwrap();
        resolver::resolve(&program, &mut locals2).unwrap();

        prop_assert_eq!(locals1, locals2);
    }

    /// Property: A read finds its declaration across any nesting depth.
    /// The printed value proves the recorded distance matched the
    /// runtime environment chain exactly.
    #[test]
    fn prop_resolution_depth_alignment(depth in 0usize..40) {
        let source = format!(
            "{{ var v = 7; {}print v;{} }}",
            "{ ".repeat(depth),
            " }".repeat(depth)
        );

        let output = run_source(&source);
        prop_assert_eq!(output, Ok("7\n".to_string()));
    }
}

// ============================================================================
// Interpreter Property Tests
// ============================================================================

proptest! {
    /// Property: Arithmetic matches IEEE 754 double arithmetic.
    #[test]
    fn prop_arithmetic_matches_rust(a in -1000i32..1000, b in -1000i32..1000) {
        let sum = run_source(&format!("print {} + {};", a, b));
        prop_assert_eq!(sum, Ok(format!("{}\n", a as f64 + b as f64)));

        let difference = run_source(&format!("print {} - {};", a, b));
        prop_assert_eq!(difference, Ok(format!("{}\n", a as f64 - b as f64)));

        let product = run_source(&format!("print {} * {};", a, b));
        prop_assert_eq!(product, Ok(format!("{}\n", a as f64 * b as f64)));
    }

    /// Property: Division matches IEEE 754, including division by zero.
    #[test]
    fn prop_division_matches_rust(a in -1000i32..1000, b in -1000i32..1000) {
        let quotient = run_source(&format!("print {} / {};", a, b));
        prop_assert_eq!(quotient, Ok(format!("{}\n", a as f64 / b as f64)));
    }

    /// Property: Comparisons match Rust's ordering on doubles.
    #[test]
    fn prop_comparisons_match_rust(a in -1000i32..1000, b in -1000i32..1000) {
        let less = run_source(&format!("print {} < {};", a, b));
        prop_assert_eq!(less, Ok(format!("{}\n", a < b)));

        let at_most = run_source(&format!("print {} <= {};", a, b));
        prop_assert_eq!(at_most, Ok(format!("{}\n", a <= b)));

        let equal = run_source(&format!("print {} == {};", a, b));
        prop_assert_eq!(equal, Ok(format!("{}\n", a == b)));
    }

    /// Property: String concatenation preserves both operands.
    #[test]
    fn prop_string_concat(left in "[a-zA-Z ]{0,20}", right in "[a-zA-Z ]{0,20}") {
        let output = run_source(&format!("print \"{}\" + \"{}\";", left, right));
        prop_assert_eq!(output, Ok(format!("{}{}\n", left, right)));
    }

    /// Property: A stored value reads back unchanged.
    #[test]
    fn prop_variable_roundtrip(val in -100_000i32..100_000) {
        let output = run_source(&format!("var x = {}; print x;", val));
        prop_assert_eq!(output, Ok(format!("{}\n", val as f64)));
    }

    /// Property: The same program prints the same output every run.
    #[test]
    fn prop_interpreter_deterministic(a in 0u32..100, b in 0u32..100) {
        let source = format!(
            "fun f(n) {{ return n * {}; }} print f({});",
            a, b
        );

        let first = run_source(&source);
        let second = run_source(&source);

        prop_assert_eq!(first, second);
    }

    /// Property: The pipeline never panics, whatever the input.
    #[test]
    fn prop_no_panic_on_arbitrary_source(source in "[a-zA-Z0-9_ +\\-*/=;(){}.\"\\n]{0,200}") {
        let result = std::panic::catch_unwind(|| {
            let mut locals = Locals::new();
            let _ = tarn::compile(&source, &mut locals);
        });
        prop_assert!(result.is_ok(), "Compilation panicked");
    }

    /// Property: Failed compilation always explains itself.
    #[test]
    fn prop_errors_have_messages(source in "[!@#$%^&]{1,20}") {
        let mut locals = Locals::new();
        if let Err(errors) = tarn::compile(&source, &mut locals) {
            prop_assert!(!errors.is_empty(), "Error list should not be empty");
            for error in &errors {
                prop_assert!(!error.message.is_empty(), "Error should have message");
            }
        }
    }
}

// ============================================================================
// Regression Property Tests
// ============================================================================

proptest! {
    /// Property: Keywords are not valid variable names.
    #[test]
    fn prop_keywords_reserved(
        keyword in prop::sample::select(vec![
            "var", "fun", "class", "if", "else", "while", "for", "return",
            "print", "and", "or", "true", "false", "nil", "this", "super",
        ])
    ) {
        let source = format!("var {} = 1;", keyword);
        let mut locals = Locals::new();
        let result = tarn::compile(&source, &mut locals);
        prop_assert!(result.is_err(),
            "Keyword '{}' should not be valid as variable name", keyword);
    }

    /// Property: Duplicate parameter names are rejected.
    #[test]
    fn prop_duplicate_parameters_rejected(name in "p_[a-z][a-z0-9]{0,5}") {
        let source = format!("fun f({}, {}) {{}}", name, name);
        let mut locals = Locals::new();
        let result = tarn::compile(&source, &mut locals);
        prop_assert!(result.is_err(),
            "Duplicate parameter '{}' should be rejected", name);
    }

    /// Property: Reading an undefined name compiles but fails at runtime.
    #[test]
    fn prop_undefined_reads_fail_late(name in "und_[a-z][a-z0-9]{0,5}") {
        let source = format!("fun f() {{ print {}; }} f();", name);

        let result = run_source(&source);
        prop_assert!(result.is_err(),
            "Undefined name '{}' should fail when the read executes", name);
    }
}
