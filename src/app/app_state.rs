//! Centralized application state for the category list viewer.
//!
//! The state is composed of focused components so that the list panel can
//! borrow the controller, the guard and the tree independently.

use catlist::{CategoryListController, CategoryTree, ListConfig, ListProperties, PropertySet, RenderGuard};
use crate::state::{DataState, PanelState, RenderStats, StylingState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Loaded category tree and its source
    pub data: DataState,

    /// Flattened items, scroll position, scrollbar and selection
    pub list: CategoryListController,

    /// Host-side property values with change tracking
    pub properties: PropertySet,

    /// Error, row-limit and staleness handling around every paint
    pub guard: RenderGuard,

    /// Styling presets and current selection
    pub styling: StylingState,

    /// Search buffer and settings popout
    pub panel: PanelState,

    /// Render completion counter
    pub stats: RenderStats,

    // ===== Top-Level State =====
    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new application state with default values.
    pub fn new() -> Self {
        Self::with_settings("Light", ListProperties::default(), ListConfig::default())
    }

    /// Creates a new AppState with styling, properties and configuration loaded from storage.
    pub fn with_settings(styling_name: &str, properties: ListProperties, config: ListConfig) -> Self {
        let mut list = CategoryListController::new(config.clone());
        list.set_properties(properties.clone());

        Self {
            data: DataState::new(),
            list,
            properties: PropertySet::from_properties(&properties),
            guard: RenderGuard::new(&config),
            styling: StylingState::with_styling(styling_name),
            panel: PanelState::with_search_text(properties.search_expression),
            stats: RenderStats::new(),
            error_message: None,
        }
    }

    // ===== High-Level Coordination Methods =====

    /// Resets the data-related state when loading a new snapshot.
    ///
    /// Returns the generation the incoming delivery has to carry; any earlier
    /// generation is stale from now on.
    pub fn reset_data_state(&mut self) -> u64 {
        self.data.clear();
        self.error_message = None;
        self.guard.invalidate()
    }

    /// Delivers a loaded tree under the generation its load was started with.
    ///
    /// Returns false and drops the tree if a newer delivery superseded it.
    pub fn deliver(&mut self, mut tree: CategoryTree, source: String, generation: u64) -> bool {
        if !self.guard.tracker().is_current(generation) {
            tracing::info!("dropping superseded delivery from {} (generation {})", source, generation);
            return false;
        }

        tree.set_generation(generation);
        self.list.apply_snapshot(&tree);
        self.data.load_tree(tree, source);
        self.error_message = None;
        true
    }

    /// Re-delivers the current tree under a fresh generation.
    ///
    /// Called after a marking transaction or a property change that requires
    /// the items to be rebuilt. Does nothing while no tree is loaded, so a
    /// pending load stays current.
    pub fn redeliver(&mut self) {
        let Some(tree) = self.data.tree_mut() else {
            return;
        };
        let generation = self.guard.invalidate();
        tree.set_generation(generation);
        self.list.apply_snapshot(&*tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catlist::{DataView, Snapshot, SnapshotNode};

    fn tree() -> CategoryTree {
        let snapshot = Snapshot {
            levels: vec!["Fruit".to_string()],
            errors: Vec::new(),
            root: SnapshotNode {
                children: vec![
                    SnapshotNode { label: Some("apple".to_string()), rows: 2, ..Default::default() },
                    SnapshotNode { label: Some("pear".to_string()), rows: 1, ..Default::default() },
                ],
                ..Default::default()
            },
        };
        CategoryTree::from_snapshot(&snapshot).unwrap()
    }

    #[test]
    fn test_redeliver_tags_latest_generation() {
        let mut state = AppState::new();
        state.data.load_tree(tree(), "fruit.json".to_string());
        state.redeliver();

        let generation = state.data.tree().map(|t| t.generation()).unwrap();
        assert!(state.guard.tracker().is_current(generation));
        assert_eq!(state.list.items().len(), 2);
    }

    #[test]
    fn test_superseded_delivery_is_dropped() {
        let mut state = AppState::new();
        let first = state.reset_data_state();
        let second = state.reset_data_state();

        assert!(!state.deliver(tree(), "old.json".to_string(), first));
        assert!(state.data.tree().is_none());
        assert!(state.list.items().is_empty());

        assert!(state.deliver(tree(), "new.json".to_string(), second));
        assert_eq!(state.data.source(), Some("new.json"));
        assert_eq!(state.data.tree().map(|t| t.generation()), Some(second));
    }

    #[test]
    fn test_property_rebuild_without_tree_keeps_pending_load_current() {
        let mut state = AppState::new();
        let pending = state.reset_data_state();
        state.redeliver();
        assert!(state.guard.tracker().is_current(pending));
    }

    #[test]
    fn test_persisted_search_reaches_the_list() {
        let properties = ListProperties {
            search_expression: "pe*".to_string(),
            ..ListProperties::default()
        };
        let mut state = AppState::with_settings("Dark", properties, ListConfig::default());
        state.data.load_tree(tree(), "fruit.json".to_string());
        state.redeliver();

        assert_eq!(state.panel.search_text(), "pe*");
        assert_eq!(state.list.items().len(), 1);
        assert_eq!(state.list.items()[0].text, "pear");
    }
}
