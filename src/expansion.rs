//! Which directories are open in the interactive view.
//!
//! Kept apart from the tree and keyed by canonical path, so one tree can be
//! shown under any number of expansion states.

use std::collections::BTreeSet;

use crate::tree::Tree;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
}

impl ExpansionState {
    /// Initial state for a freshly built tree.
    pub fn for_tree(tree: &Tree, collapsed_by_default: bool) -> Self {
        let mut state = Self::default();
        if !collapsed_by_default {
            state.expand_all(tree);
        }
        state
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Flip membership of `path`. Returns whether it is now expanded.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.to_string());
            true
        }
    }

    pub fn expand_all(&mut self, tree: &Tree) {
        self.expanded = tree.directory_paths().into_iter().collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn is_fully_expanded(&self, tree: &Tree) -> bool {
        tree.directory_paths()
            .iter()
            .all(|p| self.expanded.contains(p))
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}
