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

//! Property-based fuzz tests for the Tarn interpreter.
//!
//! These tests use proptest to generate random inputs and verify
//! that the pipeline handles them gracefully (no panics).
//!
//! Unlike cargo-fuzz, these tests run on stable Rust.

use proptest::prelude::*;
use tarn::{Interpreter, Locals};

fn compile(source: &str) -> Result<tarn::Program, Vec<tarn::CompileError>> {
    let mut locals = Locals::new();
    tarn::compile(source, &mut locals)
}

/// Compile and, if that worked, execute with output discarded.
/// Generated programs must be guaranteed to terminate.
fn compile_and_run(source: &str) {
    let mut interpreter = Interpreter::with_output(Box::new(std::io::sink()));
    if let Ok(program) = tarn::compile(source, interpreter.locals_mut()) {
        let _ = interpreter.run(&program);
    }
}

// ============================================================================
// Lexer Fuzzing
// ============================================================================

proptest! {
    /// Fuzz the lexer with random ASCII strings.
    /// The lexer should never panic, only return Ok or Err.
    #[test]
    fn fuzz_lexer_ascii(s in "[ -~]{0,500}") {
        let _ = tarn::lexer::tokenize(&s);
    }

    /// Fuzz the lexer with random bytes (may include invalid UTF-8).
    #[test]
    fn fuzz_lexer_bytes(bytes in prop::collection::vec(any::<u8>(), 0..500)) {
        if let Ok(s) = String::from_utf8(bytes) {
            let _ = tarn::lexer::tokenize(&s);
        }
    }

    /// Fuzz with strings that look like Tarn code.
    #[test]
    fn fuzz_lexer_codelike(
        keyword in prop::sample::select(vec!["var", "fun", "class", "if", "else", "while", "for", "return", "print", "nil"]),
        ident in "[a-z_][a-z0-9_]{0,10}",
        num in 0u16..65535,
        op in prop::sample::select(vec!["+", "-", "*", "/", "=", "==", "!=", "<", ">", ";", "(", ")", ",", "."]),
    ) {
        let source = format!("{} {} {} {} {}", keyword, ident, op, num, ident);
        let _ = tarn::lexer::tokenize(&source);
    }
}

// ============================================================================
// Parser Fuzzing
// ============================================================================

proptest! {
    /// Fuzz the parser with random function-like structures.
    #[test]
    fn fuzz_parser_function(
        name in "[a-z_][a-z0-9_]{0,10}",
        body in "[ a-z0-9_=+\\-*/();]{0,100}",
    ) {
        let source = format!("fun {}() {{ {} }}", name, body);
        if let Ok(tokens) = tarn::lexer::tokenize(&source) {
            let _ = tarn::parser::parse(&tokens);
        }
    }

    /// Fuzz with nested control structures.
    #[test]
    fn fuzz_parser_control_flow(
        depth in 1usize..5,
        var in "[a-z]",
    ) {
        let mut source = format!("var {} = 5;\n", var);

        for _ in 0..depth {
            source.push_str(&format!("if ({} > 0) {{\n", var));
        }
        source.push_str(&format!("print {};\n", var));
        for _ in 0..depth {
            source.push_str("}\n");
        }

        if let Ok(tokens) = tarn::lexer::tokenize(&source) {
            let _ = tarn::parser::parse(&tokens);
        }
    }
}

// ============================================================================
// Interpreter Pipeline Fuzzing
// ============================================================================

proptest! {
    /// Fuzz the complete pipeline with minimal valid-looking programs.
    #[test]
    fn fuzz_pipeline_minimal(
        stmt in prop::sample::select(vec![
            "print 1;",
            "var x = 1;",
            "{}",
            "if (true) {}",
            "while (false) {}",
            "fun f() {} f();",
        ]),
    ) {
        compile_and_run(stmt);
    }

    /// Fuzz with variable declarations.
    #[test]
    fn fuzz_pipeline_variables(
        name in "tmp_[a-z0-9_]{0,8}",
        value in 0u16..256,
    ) {
        let source = format!("var {} = {}; print {};", name, value, name);
        compile_and_run(&source);
    }

    /// Fuzz with arithmetic expressions.
    #[test]
    fn fuzz_pipeline_arithmetic(
        a in 0u8..100,
        b in 1u8..100,
        op in prop::sample::select(vec!["+", "-", "*", "/"]),
    ) {
        let source = format!("print {} {} {};", a, op, b);
        compile_and_run(&source);
    }

    /// Fuzz with print statements.
    #[test]
    fn fuzz_pipeline_print(
        s in "[A-Za-z ]{0,20}",
    ) {
        let source = format!("print \"{}\";", s);
        compile_and_run(&source);
    }
}

// ============================================================================
// Edge Case Fuzzing
// ============================================================================

proptest! {
    /// Fuzz with deeply nested parentheses.
    #[test]
    fn fuzz_nested_parens(depth in 1usize..20) {
        let opens: String = "(".repeat(depth);
        let closes: String = ")".repeat(depth);
        let source = format!("print {}1{};", opens, closes);
        let _ = compile(&source);
    }

    /// Fuzz with long identifiers.
    #[test]
    fn fuzz_long_identifiers(name in "[a-z_]{1,100}") {
        let source = format!("var {} = 1;", name);
        let _ = compile(&source);
    }

    /// Fuzz with boundary numbers.
    #[test]
    fn fuzz_boundary_numbers(n in prop::sample::select(vec![
        0u64, 1, 255, 256, 65535, 16_777_216, 9_007_199_254_740_991,
    ])) {
        let source = format!("var x = {}; print x;", n);
        compile_and_run(&source);
    }

    /// Fuzz with string content, including literal backslashes.
    /// String literals have no escape sequences.
    #[test]
    fn fuzz_string_content(
        content in prop::sample::select(vec![
            r#""#,
            r#"A"#,
            r#"\n"#,
            r#"\t"#,
            r#"\\"#,
            r#"hello world"#,
            r#"with  double  spaces"#,
        ])
    ) {
        let source = format!("print \"{}\";", content);
        compile_and_run(&source);
    }
}

// ============================================================================
// Stress Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    /// Stress test with many statements.
    #[test]
    fn fuzz_many_statements(count in 1usize..50) {
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("var x{} = {};\n", i, i));
        }
        compile_and_run(&source);
    }

    /// Stress test with many functions.
    #[test]
    fn fuzz_many_functions(count in 1usize..20) {
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("fun func{}() {{ return {}; }}\n", i, i));
        }
        for i in 0..count {
            source.push_str(&format!("func{}();\n", i));
        }
        compile_and_run(&source);
    }
}

// ============================================================================
// Invariant Tests
// ============================================================================

proptest! {
    /// Verify that tokenizing never produces overlapping spans.
    #[test]
    fn invariant_token_spans_non_overlapping(s in "[a-z0-9 +\\-*/=;(){}]{0,200}") {
        if let Ok(tokens) = tarn::lexer::tokenize(&s) {
            let mut last_end = 0;
            for (_, span) in &tokens {
                prop_assert!(span.start >= last_end,
                    "Token spans overlap: last_end={}, span.start={}", last_end, span.start);
                prop_assert!(span.start <= span.end,
                    "Invalid span: start={} > end={}", span.start, span.end);
                last_end = span.end;
            }
        }
    }

    /// Verify that compilation either succeeds or fails gracefully.
    #[test]
    fn invariant_no_panic(s in "[ -~]{0,300}") {
        // This test passes if compile() doesn't panic
        let result = std::panic::catch_unwind(|| {
            let _ = compile(&s);
        });
        prop_assert!(result.is_ok(), "Pipeline panicked on input");
    }
}
