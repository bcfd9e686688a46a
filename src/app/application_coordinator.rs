//! Application-level coordination and workflow management.
//!
//! Handles high-level application operations like snapshot loading, marking
//! transactions, property changes and error handling.

use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult};
use catlist::{FileSource, MarkCommand, Markable, PropertyName, PropertyValue, SnapshotWriter, VirtualSource};
use std::path::PathBuf;

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Managing snapshot loading workflows
/// - Applying mark commands to the loaded tree
/// - Routing property change events
/// - Managing error states
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Initiates asynchronous snapshot loading.
    ///
    /// Immediately clears previous data to show the loading indicator.
    pub fn open_file(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        let generation = state.reset_data_state();

        let source = FileSource::new(path.to_string_lossy().into_owned());
        loader.start_load(Box::new(source), generation, ctx);
    }

    /// Checks for loading completion and applies results to application state.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if a load operation completed (success or error) and was
    /// not superseded by a newer delivery.
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { tree, source, generation } => state.deliver(tree, source, generation),
            LoadResult::Error(error_msg) => {
                state.error_message = Some(format!("Error loading snapshot: {}", error_msg));
                state.data.clear();
                true
            }
            LoadResult::None => false,
        }
    }

    /// Generates and loads virtual data in-memory.
    ///
    /// A file load still in flight is abandoned.
    pub fn open_virtual(state: &mut AppState, loader: &mut AsyncLoader) {
        loader.cancel();
        let generation = state.reset_data_state();

        let source = VirtualSource::new();
        match loader.load_virtual(&source) {
            Ok((tree, description)) => {
                state.deliver(tree, description, generation);
            }
            Err(e) => {
                state.error_message = Some(format!("Error generating virtual data: {}", e));
            }
        }
    }

    /// Writes the loaded tree, marks included, to a snapshot file.
    pub fn save_snapshot(state: &mut AppState, path: PathBuf) {
        let Some(tree) = state.data.tree() else {
            return;
        };

        let path = path.to_string_lossy().into_owned();
        let result = SnapshotWriter::new(&path).and_then(|writer| writer.write(&tree.to_snapshot()));
        if let Err(e) = result {
            tracing::error!("failed to save snapshot: {:#}", e);
            state.error_message = Some(format!("Error saving snapshot: {:#}", e));
        }
    }

    /// Applies one gesture's mark commands as a single marking transaction.
    pub fn apply_marks(state: &mut AppState, commands: &[MarkCommand]) {
        if commands.is_empty() {
            return;
        }
        if let Some(tree) = state.data.tree_mut() {
            tree.mark(commands);
            state.redeliver();
        }
    }

    /// Routes a property change event by name.
    pub fn set_property(state: &mut AppState, name: PropertyName, value: PropertyValue) {
        if let Err(e) = state.properties.set_by_name(name, value) {
            tracing::warn!("{}", e);
            state.error_message = Some(e.to_string());
            return;
        }
        Self::apply_property_changes(state);
    }

    /// Pushes changed property values to the list, rebuilding items when needed.
    pub fn apply_property_changes(state: &mut AppState) {
        if !state.properties.take_changed() {
            return;
        }
        let properties = state.properties.snapshot();
        if state.list.set_properties(properties) {
            state.redeliver();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catlist::{CategoryTree, MarkingMode, Snapshot, SnapshotNode};
    use std::time::Duration;

    fn loaded_state() -> AppState {
        let snapshot = Snapshot {
            levels: vec!["Color".to_string(), "Shade".to_string()],
            errors: Vec::new(),
            root: SnapshotNode {
                children: vec![
                    SnapshotNode {
                        label: Some("blue".to_string()),
                        children: vec![
                            SnapshotNode { label: Some("navy".to_string()), rows: 2, ..Default::default() },
                            SnapshotNode { label: Some("sky".to_string()), rows: 3, ..Default::default() },
                        ],
                        ..Default::default()
                    },
                    SnapshotNode {
                        label: Some("red".to_string()),
                        children: vec![SnapshotNode { label: Some("crimson".to_string()), rows: 4, ..Default::default() }],
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        };

        let mut state = AppState::new();
        state.data.load_tree(CategoryTree::from_snapshot(&snapshot).unwrap(), "colors.json".to_string());
        state.redeliver();
        state
    }

    #[test]
    fn test_marks_are_applied_and_redelivered() {
        let mut state = loaded_state();
        let blue = state.list.items()[0].node;

        ApplicationCoordinator::apply_marks(&mut state, &[MarkCommand { node: blue, mode: MarkingMode::Replace }]);

        assert_eq!(state.data.tree().map(|t| t.marked_rows()), Some(5));
        assert!(state.list.items()[0].is_fully_marked());
    }

    #[test]
    fn test_reverse_property_rebuilds_items() {
        let mut state = loaded_state();
        assert_eq!(state.list.items()[0].text, "blue");

        ApplicationCoordinator::set_property(&mut state, PropertyName::ReverseOrder, PropertyValue::Flag(true));
        assert_eq!(state.list.items()[0].text, "red");
    }

    #[test]
    fn test_wrong_property_kind_reports_error() {
        let mut state = loaded_state();
        ApplicationCoordinator::set_property(&mut state, PropertyName::ReverseOrder, PropertyValue::Text("yes".to_string()));
        assert!(state.error_message.is_some());
        assert!(!state.properties.snapshot().reverse_order);
    }

    #[test]
    fn test_virtual_data_loads() {
        let mut state = AppState::new();
        let mut loader = AsyncLoader::new();
        ApplicationCoordinator::open_virtual(&mut state, &mut loader);
        assert!(state.data.tree().is_some());
        assert!(!state.list.items().is_empty());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_virtual_data_supersedes_pending_file_load() {
        let path = std::env::temp_dir().join(format!("catlist_pending_{}.json", std::process::id()));
        let snapshot = Snapshot {
            levels: vec!["Origin".to_string()],
            errors: Vec::new(),
            root: SnapshotNode {
                children: vec![SnapshotNode { label: Some("from_file".to_string()), rows: 1, ..Default::default() }],
                ..Default::default()
            },
        };
        SnapshotWriter::new(&path.to_string_lossy()).unwrap().write(&snapshot).unwrap();

        let mut state = AppState::new();
        let mut loader = AsyncLoader::new();
        let ctx = egui::Context::default();

        ApplicationCoordinator::open_file(&mut state, &mut loader, path.clone(), &ctx);
        ApplicationCoordinator::open_virtual(&mut state, &mut loader);
        let virtual_source = state.data.source().map(str::to_string);

        for _ in 0..50 {
            assert!(!ApplicationCoordinator::check_loading_completion(&mut state, &mut loader));
            std::thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(state.data.source().map(str::to_string), virtual_source);
        assert!(state.list.items().iter().all(|item| item.text != "from_file"));
        let generation = state.data.tree().map(|t| catlist::DataView::generation(t)).unwrap();
        assert!(state.guard.tracker().is_current(generation));

        std::fs::remove_file(&path).ok();
    }
}
