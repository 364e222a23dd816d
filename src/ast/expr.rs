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

//! Expression AST nodes for the Tarn interpreter.

use crate::error::Span;

use super::ExprId;

/// An expression in the Tarn language.
#[derive(Debug, Clone)]
pub struct Expr {
    /// The parse-time identity of this node.
    pub id: ExprId,
    /// The kind of expression.
    pub kind: ExprKind,
    /// The source span of this expression.
    pub span: Span,
}

impl Expr {
    /// Create a new expression.
    pub fn new(id: ExprId, kind: ExprKind, span: Span) -> Self {
        Self { id, kind, span }
    }
}

/// The kind of expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// A number literal.
    NumberLiteral(f64),

    /// A string literal.
    StringLiteral(String),

    /// A boolean literal.
    BoolLiteral(bool),

    /// The `nil` literal.
    NilLiteral,

    /// A variable reference.
    Variable { name: String },

    /// An assignment to a variable.
    Assign { name: String, value: Box<Expr> },

    /// A binary operation.
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// A short-circuiting logical operation.
    LogicalOp {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },

    /// A unary operation.
    UnaryOp { op: UnaryOp, operand: Box<Expr> },

    /// A call with evaluated callee and arguments.
    Call { callee: Box<Expr>, args: Vec<Expr> },

    /// A property read (`object.name`).
    Get { object: Box<Expr>, name: String },

    /// A property write (`object.name = value`).
    Set {
        object: Box<Expr>,
        name: String,
        value: Box<Expr>,
    },

    /// The `this` keyword.
    This,

    /// A `super.method` access.
    Super { method: String },

    /// A parenthesized expression.
    Grouped(Box<Expr>),
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl BinaryOp {
    /// Get a string representation of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A short-circuiting logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `and` - yields the left value when falsey.
    And,
    /// `or` - yields the left value when truthy.
    Or,
}

impl LogicalOp {
    /// Get a string representation of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`!x`).
    Not,
}

impl UnaryOp {
    /// Get a string representation of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::fmt::Display for ExprKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprKind::NumberLiteral(n) => write!(f, "{}", n),
            ExprKind::StringLiteral(s) => write!(f, "\"{}\"", s),
            ExprKind::BoolLiteral(b) => write!(f, "{}", b),
            ExprKind::NilLiteral => write!(f, "nil"),
            ExprKind::Variable { name } => write!(f, "{}", name),
            ExprKind::Assign { name, value } => write!(f, "{} = {}", name, value),
            ExprKind::BinaryOp { left, op, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
            ExprKind::LogicalOp { left, op, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
            ExprKind::UnaryOp { op, operand } => {
                write!(f, "({}{})", op, operand)
            }
            ExprKind::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            ExprKind::Get { object, name } => write!(f, "{}.{}", object, name),
            ExprKind::Set {
                object,
                name,
                value,
            } => write!(f, "{}.{} = {}", object, name, value),
            ExprKind::This => write!(f, "this"),
            ExprKind::Super { method } => write!(f, "super.{}", method),
            ExprKind::Grouped(expr) => write!(f, "({})", expr),
        }
    }
}
