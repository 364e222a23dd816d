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

//! Resolved scope distances for variable references.
//!
//! The resolver writes one entry per local reference; the interpreter reads
//! them back to walk the environment chain by a fixed number of hops.
//! References without an entry fall through to the global environment.

use crate::ast::ExprId;
use std::collections::HashMap;

/// Scope distances keyed by expression id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locals {
    depths: HashMap<ExprId, usize>,
}

impl Locals {
    /// Create an empty distance table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scope distance for a reference.
    pub fn record(&mut self, id: ExprId, depth: usize) {
        self.depths.insert(id, depth);
    }

    /// Look up the recorded distance for a reference.
    pub fn depth(&self, id: ExprId) -> Option<usize> {
        self.depths.get(&id).copied()
    }

    /// The number of recorded references.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Check if no references were recorded.
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_depth() {
        let mut locals = Locals::new();
        locals.record(ExprId::new(3), 2);

        assert_eq!(locals.depth(ExprId::new(3)), Some(2));
        assert_eq!(locals.depth(ExprId::new(4)), None);
        assert_eq!(locals.len(), 1);
    }

    #[test]
    fn test_record_overwrites() {
        let mut locals = Locals::new();
        locals.record(ExprId::new(0), 1);
        locals.record(ExprId::new(0), 3);

        assert_eq!(locals.depth(ExprId::new(0)), Some(3));
        assert_eq!(locals.len(), 1);
    }

    #[test]
    fn test_empty_table() {
        let locals = Locals::new();
        assert!(locals.is_empty());
        assert_eq!(locals.depth(ExprId::new(0)), None);
    }
}
