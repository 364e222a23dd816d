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

//! Token definitions for the Tarn language.

use logos::Logos;

/// A token in the Tarn language.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Literals
    /// Number literal. All Tarn numbers are 64-bit floats.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
    /// String literal. No escape sequences; may span multiple lines.
    #[regex(r#""[^"]*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    Str(String),
    /// Identifier (variable, function, class, or property name).
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Declaration keywords
    /// `var` - variable declaration.
    #[token("var")]
    Var,
    /// `fun` - function declaration.
    #[token("fun")]
    Fun,
    /// `class` - class declaration.
    #[token("class")]
    Class,

    // Control flow keywords
    /// `if` - conditional statement.
    #[token("if")]
    If,
    /// `else` - else branch.
    #[token("else")]
    Else,
    /// `while` - while loop.
    #[token("while")]
    While,
    /// `for` - C-style for loop.
    #[token("for")]
    For,
    /// `return` - return from function.
    #[token("return")]
    Return,
    /// `print` - print statement.
    #[token("print")]
    Print,

    // Logical keywords
    /// `and` - short-circuiting logical AND.
    #[token("and")]
    And,
    /// `or` - short-circuiting logical OR.
    #[token("or")]
    Or,

    // Literal keywords
    /// `true` - boolean true value.
    #[token("true")]
    True,
    /// `false` - boolean false value.
    #[token("false")]
    False,
    /// `nil` - the absent value.
    #[token("nil")]
    Nil,

    // Object keywords
    /// `this` - the current instance inside a method.
    #[token("this")]
    This,
    /// `super` - superclass method access inside a subclass method.
    #[token("super")]
    Super,

    // Operators
    /// `+` - addition or string concatenation.
    #[token("+")]
    Plus,
    /// `-` - subtraction or negation.
    #[token("-")]
    Minus,
    /// `*` - multiplication.
    #[token("*")]
    Star,
    /// `/` - division.
    #[token("/")]
    Slash,
    /// `!` - logical NOT.
    #[token("!")]
    Bang,
    /// `=` - assignment.
    #[token("=")]
    Equal,
    /// `==` - equal.
    #[token("==")]
    EqualEqual,
    /// `!=` - not equal.
    #[token("!=")]
    BangEqual,
    /// `<` - less than.
    #[token("<")]
    Less,
    /// `>` - greater than.
    #[token(">")]
    Greater,
    /// `<=` - less or equal.
    #[token("<=")]
    LessEqual,
    /// `>=` - greater or equal.
    #[token(">=")]
    GreaterEqual,

    // Punctuation
    /// `(` - left parenthesis.
    #[token("(")]
    LeftParen,
    /// `)` - right parenthesis.
    #[token(")")]
    RightParen,
    /// `{` - left brace.
    #[token("{")]
    LeftBrace,
    /// `}` - right brace.
    #[token("}")]
    RightBrace,
    /// `,` - comma.
    #[token(",")]
    Comma,
    /// `.` - property access.
    #[token(".")]
    Dot,
    /// `;` - statement terminator.
    #[token(";")]
    Semicolon,
}

impl Token {
    /// Get a human-readable name for this token type.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Number(_) => "number",
            Token::Str(_) => "string",
            Token::Identifier(_) => "identifier",
            Token::Var => "'var'",
            Token::Fun => "'fun'",
            Token::Class => "'class'",
            Token::If => "'if'",
            Token::Else => "'else'",
            Token::While => "'while'",
            Token::For => "'for'",
            Token::Return => "'return'",
            Token::Print => "'print'",
            Token::And => "'and'",
            Token::Or => "'or'",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Nil => "'nil'",
            Token::This => "'this'",
            Token::Super => "'super'",
            Token::Plus => "'+'",
            Token::Minus => "'-'",
            Token::Star => "'*'",
            Token::Slash => "'/'",
            Token::Bang => "'!'",
            Token::Equal => "'='",
            Token::EqualEqual => "'=='",
            Token::BangEqual => "'!='",
            Token::Less => "'<'",
            Token::Greater => "'>'",
            Token::LessEqual => "'<='",
            Token::GreaterEqual => "'>='",
            Token::LeftParen => "'('",
            Token::RightParen => "')'",
            Token::LeftBrace => "'{'",
            Token::RightBrace => "'}'",
            Token::Comma => "','",
            Token::Dot => "'.'",
            Token::Semicolon => "';'",
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Identifier(s) => write!(f, "{}", s),
            _ => write!(f, "{}", self.name()),
        }
    }
}
