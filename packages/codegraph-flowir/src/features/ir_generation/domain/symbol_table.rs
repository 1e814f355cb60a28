//! Scoped symbol table
//!
//! Stack of scopes mapping identifier names to the data vertex currently
//! bound to them. Cloning yields an independent copy, which is how branch
//! translation diverges without touching the parent table.

use crate::features::ir_graph::VertexId;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    /// Outermost (global) scope first
    scopes: Vec<FxHashMap<String, VertexId>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Table with a single global scope
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// The global scope is never popped
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Innermost binding of `name`
    pub fn get(&self, name: &str) -> Option<VertexId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Bind `name` in the innermost scope, shadowing outer bindings
    pub fn declare(&mut self, name: impl Into<String>, value: VertexId) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    /// Rebind `name` in the scope that declared it; unknown names are bound
    /// in the innermost scope
    pub fn set(&mut self, name: &str, value: VertexId) {
        let declaring = self
            .scopes
            .iter_mut()
            .rev()
            .find(|scope| scope.contains_key(name));
        match declaring {
            Some(scope) => {
                scope.insert(name.to_string(), value);
            }
            None => self.declare(name, value),
        }
    }

    /// Copy every binding of `other` into this table. Scopes are aligned
    /// from the outermost; scopes of `other` deeper than this table land in
    /// the innermost scope.
    pub fn override_with(&mut self, other: &SymbolTable) {
        let last = self.scopes.len() - 1;
        for (depth, scope) in other.scopes.iter().enumerate() {
            let target = &mut self.scopes[depth.min(last)];
            for (name, &value) in scope {
                target.insert(name.clone(), value);
            }
        }
    }

    /// Every name visible from the innermost scope, sorted
    pub fn visible_names(&self) -> BTreeSet<String> {
        self.scopes
            .iter()
            .flat_map(|scope| scope.keys().cloned())
            .collect()
    }
}
