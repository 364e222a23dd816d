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

//! Lexer module for the Tarn interpreter.
//!
//! This module tokenizes Tarn source code into a stream of spanned tokens.
//! It handles:
//! - Keywords and identifiers
//! - Number literals (64-bit floats)
//! - String literals (no escapes, multi-line allowed)
//! - Operators and punctuation
//! - Comments (starting with //)
//!
//! The token definitions live in [`tokens`] as a `logos`-derived enum;
//! this module drives the generated lexer and converts its failures into
//! spanned [`CompileError`]s.

mod tokens;

pub use tokens::Token;

use std::ops::Range;

use logos::Logos;

use crate::error::{CompileError, ErrorCode, Span};

/// Tokenize source code into a vector of tokens with spans.
///
/// Stops at the first lexical error. The parser treats the end of the
/// returned vector as the end of input; there is no explicit EOF token.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, CompileError> {
    let mut tokens = Vec::new();

    for (result, range) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, Span::from_range(range))),
            Err(()) => return Err(lexical_error(source, range)),
        }
    }

    Ok(tokens)
}

/// Classify a rejected input slice into a concrete lexical error.
fn lexical_error(source: &str, range: Range<usize>) -> CompileError {
    let slice = &source[range.clone()];

    if slice.starts_with('"') {
        // The string regex only matches terminated literals, so a rejected
        // slice opening with a quote ran into end of input.
        CompileError::new(
            ErrorCode::UnterminatedString,
            "Unterminated string literal",
            Span::new(range.start, source.len()),
        )
        .with_hint("Add a closing '\"' before the end of the file")
    } else {
        CompileError::new(
            ErrorCode::UnexpectedCharacter,
            format!("Unexpected character '{}'", slice),
            Span::from_range(range),
        )
    }
}
