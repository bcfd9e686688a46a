//! Category data and source state management.
//!
//! This module encapsulates all state related to the loaded snapshot,
//! including the category tree itself and where it came from.

use catlist::CategoryTree;

/// State related to the loaded category tree.
///
/// Responsibilities:
/// - Managing category tree lifetime
/// - Tracking the source description shown in the status bar
#[derive(Default)]
pub struct DataState {
    /// The currently loaded category tree (if any)
    tree: Option<CategoryTree>,
    /// File path or virtual source description
    source: Option<String>,
}

impl DataState {
    /// Creates a new data state with no loaded tree.
    pub fn new() -> Self {
        Self {
            tree: None,
            source: None,
        }
    }

    /// Loads a new category tree.
    ///
    /// # Arguments
    /// * `tree` - The tree to load
    /// * `source` - Description of where the tree came from
    pub fn load_tree(&mut self, tree: CategoryTree, source: String) {
        self.tree = Some(tree);
        self.source = Some(source);
    }

    /// Clears all data state.
    pub fn clear(&mut self) {
        self.tree = None;
        self.source = None;
    }

    pub fn tree(&self) -> Option<&CategoryTree> {
        self.tree.as_ref()
    }

    /// Mutable access for marking transactions and re-deliveries.
    pub fn tree_mut(&mut self) -> Option<&mut CategoryTree> {
        self.tree.as_mut()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catlist::Snapshot;

    #[test]
    fn test_load_and_clear() {
        let mut state = DataState::new();
        assert!(state.tree().is_none());

        let tree = CategoryTree::from_snapshot(&Snapshot::default()).unwrap();
        state.load_tree(tree, "empty.json".to_string());
        assert!(state.tree().is_some());
        assert_eq!(state.source(), Some("empty.json"));

        state.clear();
        assert!(state.tree().is_none());
        assert!(state.source().is_none());
    }
}
