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

//! Runtime values.
//!
//! Every expression evaluates to a [`Value`]. Numbers are IEEE doubles,
//! strings are immutable, and callables are reference-counted so closures
//! and bound methods can share state.

use std::fmt;
use std::rc::Rc;

use super::class::{Class, Instance};
use super::function::{Function, NativeFunction};
use std::cell::RefCell;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value.
    Nil,
    /// A boolean.
    Boolean(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable string.
    Str(String),
    /// A user-defined function or bound method.
    Function(Rc<Function>),
    /// A built-in function.
    Native(Rc<NativeFunction>),
    /// A class object.
    Class(Rc<Class>),
    /// An instance of a class.
    Instance(Rc<RefCell<Instance>>),
}

impl Value {
    /// Check the truthiness of this value.
    ///
    /// Only `nil` and `false` are falsey; every other value, including
    /// zero and the empty string, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Boolean(value) => *value,
            _ => true,
        }
    }

    /// Get a short name of this value's type for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::Native(_) => "native function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }
}

impl PartialEq for Value {
    /// Value equality for primitives, identity for everything else.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Number(value) => write!(f, "{}", value),
            Value::Str(value) => write!(f, "{}", value),
            Value::Function(function) => write!(f, "<fn {}>", function.name()),
            Value::Native(_) => write!(f, "<native fn>"),
            Value::Class(class) => write!(f, "{}", class.name),
            Value::Instance(instance) => write!(f, "{} instance", instance.borrow().class_name()),
        }
    }
}
