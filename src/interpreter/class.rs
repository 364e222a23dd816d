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

//! Classes and instances.
//!
//! A class is a name, an optional superclass, and a method table. Method
//! lookup walks the superclass chain. Instances carry their own field map;
//! fields shadow methods of the same name.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::function::Function;
use super::value::Value;
use super::Interpreter;
use crate::error::{RuntimeError, Span};

/// A runtime class object.
#[derive(Debug)]
pub struct Class {
    /// The declared class name.
    pub name: String,
    /// The superclass, when one was declared.
    pub superclass: Option<Rc<Class>>,
    methods: HashMap<String, Function>,
}

impl Class {
    /// Create a new class.
    pub fn new(
        name: String,
        superclass: Option<Rc<Class>>,
        methods: HashMap<String, Function>,
    ) -> Self {
        Self {
            name,
            superclass,
            methods,
        }
    }

    /// Look up a method by name, walking the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<&Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method);
        }
        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }

    /// Number of arguments a constructor call expects.
    pub fn arity(&self) -> usize {
        self.find_method("init").map_or(0, Function::arity)
    }

    /// Create an instance of `class` and run its initializer, if any.
    pub fn instantiate(
        class: &Rc<Class>,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        span: &Span,
    ) -> Result<Value, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(class))));

        if let Some(initializer) = class.find_method("init") {
            initializer
                .bind(Rc::clone(&instance))
                .call(interpreter, arguments, span)?;
        }

        Ok(Value::Instance(instance))
    }
}

/// An instance of a class.
pub struct Instance {
    class: Rc<Class>,
    fields: HashMap<String, Value>,
}

impl Instance {
    /// Create a new instance with no fields.
    pub fn new(class: Rc<Class>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    /// The name of the class this instance belongs to.
    pub fn class_name(&self) -> &str {
        &self.class.name
    }

    /// Write a field, creating it on first assignment.
    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    /// Read a field or method.
    ///
    /// Fields shadow methods. Takes the shared handle rather than `&self`
    /// because a found method is bound to the instance.
    pub fn get(instance: &Rc<RefCell<Instance>>, name: &str) -> Option<Value> {
        let borrowed = instance.borrow();

        if let Some(value) = borrowed.fields.get(name) {
            return Some(value.clone());
        }

        if let Some(method) = borrowed.class.find_method(name) {
            return Some(Value::Function(Rc::new(method.bind(Rc::clone(instance)))));
        }

        None
    }
}

// Fields may hold the instance itself, so the derived implementation
// would recurse. Print the class name only.
impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .finish_non_exhaustive()
    }
}
