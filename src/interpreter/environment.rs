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

//! Runtime environments.
//!
//! An environment maps names to values for one lexical scope and points at
//! the environment of the enclosing scope. The chain mirrors the scope
//! stack the resolver simulated, which is what makes distance-based lookup
//! sound: `get_at(d, name)` walks exactly `d` hops, never searching by
//! name on the way.

use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;
use std::cell::RefCell;

/// A single scope's bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Create a new environment with no enclosing scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new environment nested inside `enclosing`.
    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Bind a name in this environment, replacing any previous binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look up a name, searching enclosing environments outward.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get(name),
            None => None,
        }
    }

    /// Assign to an existing binding, searching enclosing environments
    /// outward. Returns `false` when the name is bound nowhere.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => false,
        }
    }

    /// Look up a name exactly `distance` environments out.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Value> {
        if distance == 0 {
            return self.values.get(name).cloned();
        }

        let mut environment = self.enclosing.clone()?;
        for _ in 1..distance {
            let next = environment.borrow().enclosing.clone()?;
            environment = next;
        }
        let value = environment.borrow().values.get(name).cloned();
        value
    }

    /// Assign to a binding exactly `distance` environments out.
    ///
    /// Returns `false` when the chain is shorter than `distance` or the
    /// target environment has no such binding.
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Value) -> bool {
        if distance == 0 {
            if let Some(slot) = self.values.get_mut(name) {
                *slot = value;
                return true;
            }
            return false;
        }

        let mut environment = match self.enclosing.clone() {
            Some(enclosing) => enclosing,
            None => return false,
        };
        for _ in 1..distance {
            let next = match environment.borrow().enclosing.clone() {
                Some(enclosing) => enclosing,
                None => return false,
            };
            environment = next;
        }

        let mut target = environment.borrow_mut();
        if let Some(slot) = target.values.get_mut(name) {
            *slot = value;
            true
        } else {
            false
        }
    }
}
