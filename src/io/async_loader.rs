//! Asynchronous snapshot loading.
//!
//! This module loads category snapshots in background threads,
//! keeping the GUI responsive during file I/O and decompression.

use catlist::{CategoryTree, SnapshotSource, VirtualSource};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use crate::io::LoadingState;

/// Result of a completed snapshot loading operation.
pub enum LoadResult {
    /// Loading completed successfully
    Success {
        /// The loaded category tree
        tree: CategoryTree,
        /// Description of the source that was loaded
        source: String,
        /// Delivery generation the load was started under
        generation: u64,
    },
    /// Loading failed with an error
    Error(String),
    /// No loading operation in progress
    None,
}

/// Manages asynchronous loading of category snapshots.
///
/// Starting a new load or cancelling drops the receiver of the previous one,
/// so results of superseded loads are never delivered.
pub struct AsyncLoader {
    /// Shared loading state flag
    loading_state: Arc<Mutex<LoadingState>>,

    /// Channel receiver for loading results
    loading_receiver: Option<Receiver<Result<CategoryTree, String>>>,

    /// Description of the source currently being loaded
    pending_source: Option<String>,

    /// Delivery generation of the pending load
    pending_generation: u64,

    /// Identifier of the most recent request
    last_request: u64,
}

impl AsyncLoader {
    /// Creates a new async loader with no active loading operation.
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            loading_receiver: None,
            pending_source: None,
            pending_generation: 0,
            last_request: 0,
        }
    }

    /// Checks if a loading operation is currently in progress.
    pub fn is_loading(&self) -> bool {
        self.loading_state
            .lock()
            .map(|state| state.in_progress)
            .unwrap_or(false)
    }

    /// Description of the source being loaded, if any.
    pub fn pending_source(&self) -> Option<&str> {
        self.pending_source.as_deref()
    }

    /// Starts loading a snapshot asynchronously from `source`.
    ///
    /// Call `check_completion()` regularly (e.g., once per frame) to check for results.
    ///
    /// # Arguments
    /// * `source` - Where to load the snapshot from
    /// * `generation` - Delivery generation the result will be tagged with
    /// * `ctx` - egui context for requesting repaints when loading completes
    pub fn start_load(&mut self, source: Box<dyn SnapshotSource>, generation: u64, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        self.pending_generation = generation;

        self.last_request += 1;
        let request = self.last_request;
        if let Ok(mut state) = self.loading_state.lock() {
            state.begin(request);
        }

        let description = source.describe();
        tracing::info!("loading snapshot from {}", description);
        self.pending_source = Some(description);

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = source.load().map_err(|e| format!("{:#}", e));

            // The receiver is gone if a newer load replaced this one
            let _ = sender.send(result);

            if let Ok(mut state) = loading_state.lock() {
                state.finish(request);
            }

            ctx_handle.request_repaint();
        });
    }

    /// Abandons the pending load, if any. Its result is discarded when it arrives.
    pub fn cancel(&mut self) {
        if self.loading_receiver.take().is_none() {
            return;
        }
        if let Some(source) = self.pending_source.take() {
            tracing::info!("cancelled loading {}", source);
        }
        if let Ok(mut state) = self.loading_state.lock() {
            state.in_progress = false;
        }
    }

    /// Generates virtual data in-memory.
    ///
    /// The data is generated synchronously (no background thread).
    ///
    /// # Returns
    /// * `Ok((tree, description))` - Successfully generated data
    /// * `Err(msg)` - Error generating the data
    pub fn load_virtual(&mut self, source: &VirtualSource) -> Result<(CategoryTree, String), String> {
        let tree = source.load().map_err(|e| e.to_string())?;
        Ok((tree, source.describe()))
    }

    /// Checks if background loading has completed and returns the result if available.
    ///
    /// # Returns
    /// * `LoadResult::Success` - Loading completed successfully
    /// * `LoadResult::Error` - Loading failed with an error
    /// * `LoadResult::None` - No result available (still loading or no operation active)
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };
        let Ok(result) = receiver.try_recv() else {
            return LoadResult::None;
        };

        self.loading_receiver = None;
        let source = self.pending_source.take().unwrap_or_default();
        match result {
            Ok(tree) => LoadResult::Success {
                tree,
                source,
                generation: self.pending_generation,
            },
            Err(error_msg) => {
                tracing::error!("failed to load {}: {}", source, error_msg);
                LoadResult::Error(error_msg)
            }
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catlist::FileSource;
    use std::time::Duration;

    fn wait_for_result(loader: &mut AsyncLoader) -> LoadResult {
        for _ in 0..500 {
            match loader.check_completion() {
                LoadResult::None => thread::sleep(Duration::from_millis(10)),
                result => return result,
            }
        }
        LoadResult::None
    }

    #[test]
    fn test_async_loader_creation() {
        let loader = AsyncLoader::new();
        assert!(!loader.is_loading());
        assert!(loader.pending_source().is_none());
    }

    #[test]
    fn test_virtual_loading() {
        let mut loader = AsyncLoader::new();
        let result = loader.load_virtual(&VirtualSource::new());
        assert!(result.is_ok(), "Virtual data generation should succeed");
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut loader = AsyncLoader::new();
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }

    #[test]
    fn test_virtual_source_in_background() {
        let mut loader = AsyncLoader::new();
        let ctx = egui::Context::default();
        loader.start_load(Box::new(VirtualSource::with_config(2, 2, 3, 4, 9)), 7, &ctx);

        match wait_for_result(&mut loader) {
            LoadResult::Success { tree, source, generation } => {
                assert_eq!(source, "virtual data (seed 9)");
                assert_eq!(generation, 7);
                assert!(tree.node_count() > 1);
            }
            _ => panic!("expected a loaded tree"),
        }
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut loader = AsyncLoader::new();
        let ctx = egui::Context::default();
        loader.start_load(Box::new(FileSource::new("/nonexistent/snapshot.json")), 1, &ctx);

        match wait_for_result(&mut loader) {
            LoadResult::Error(msg) => assert!(msg.contains("/nonexistent/snapshot.json")),
            _ => panic!("expected a load error"),
        }
    }

    #[test]
    fn test_cancelled_load_is_never_delivered() {
        let mut loader = AsyncLoader::new();
        let ctx = egui::Context::default();
        loader.start_load(Box::new(VirtualSource::with_config(2, 2, 3, 4, 3)), 1, &ctx);
        loader.cancel();

        assert!(!loader.is_loading());
        assert!(loader.pending_source().is_none());

        thread::sleep(Duration::from_millis(200));
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }
}
