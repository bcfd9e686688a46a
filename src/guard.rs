//! Render guard: one reusable wrapper around every render of host data.
//!
//! The guard checks the data view for errors, enforces the row ceiling,
//! drops stale deliveries and reports render failures on the error overlay.

use crate::config::ListConfig;
use crate::error::ListError;
use crate::traits::{DataView, RenderListener};

/// Category of an error overlay message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlayCategory {
    General,
    DataView,
}

/// Error messages shown on top of the list, per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorOverlay {
    general: Vec<String>,
    data_view: Vec<String>,
}

impl ErrorOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the messages of a category.
    pub fn show(&mut self, category: OverlayCategory, messages: Vec<String>) {
        *self.slot(category) = messages;
    }

    /// Clears the messages of a category.
    pub fn hide(&mut self, category: OverlayCategory) {
        self.slot(category).clear();
    }

    pub fn messages(&self, category: OverlayCategory) -> &[String] {
        match category {
            OverlayCategory::General => &self.general,
            OverlayCategory::DataView => &self.data_view,
        }
    }

    /// Returns true if any category has messages.
    pub fn is_visible(&self) -> bool {
        !self.general.is_empty() || !self.data_view.is_empty()
    }

    /// Iterates all messages, data view errors first.
    pub fn iter(&self) -> impl Iterator<Item = (OverlayCategory, &str)> {
        self.data_view
            .iter()
            .map(|m| (OverlayCategory::DataView, m.as_str()))
            .chain(self.general.iter().map(|m| (OverlayCategory::General, m.as_str())))
    }

    fn slot(&mut self, category: OverlayCategory) -> &mut Vec<String> {
        match category {
            OverlayCategory::General => &mut self.general,
            OverlayCategory::DataView => &mut self.data_view,
        }
    }
}

/// Tracks the latest data invalidation so in-flight deliveries can be recognized as stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaleTracker {
    latest: u64,
}

impl StaleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks all outstanding deliveries stale and returns the new generation.
    pub fn invalidate(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// Returns true if a delivery for `generation` is still wanted.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

/// How a guarded render ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Rendered,
    DataErrors,
    TooManyRows,
    Stale,
    Failed,
}

/// Wraps renders with error, capacity and staleness handling.
#[derive(Debug, Clone)]
pub struct RenderGuard {
    row_limit: usize,
    debug: bool,
    overlay: ErrorOverlay,
    tracker: StaleTracker,
}

impl RenderGuard {
    pub fn new(config: &ListConfig) -> Self {
        Self {
            row_limit: config.row_limit,
            debug: config.debug,
            overlay: ErrorOverlay::new(),
            tracker: StaleTracker::new(),
        }
    }

    pub fn overlay(&self) -> &ErrorOverlay {
        &self.overlay
    }

    pub fn tracker(&self) -> &StaleTracker {
        &self.tracker
    }

    /// Invalidates outstanding deliveries; returns the generation the next one must carry.
    pub fn invalidate(&mut self) -> u64 {
        self.tracker.invalidate()
    }

    /// Runs `render` for `view` if the view is healthy, current and within the row limit.
    ///
    /// # Errors
    /// Only in debug configuration: a failed render is shown on the overlay
    /// and also returned as `ListError::Render`.
    pub fn run<V, L, F>(&mut self, view: &V, listener: &mut L, render: F) -> Result<GuardOutcome, ListError>
    where
        V: DataView,
        L: RenderListener + ?Sized,
        F: FnOnce(&V) -> anyhow::Result<()>,
    {
        let errors = view.errors();
        if !errors.is_empty() {
            tracing::warn!("data view reported {} errors", errors.len());
            self.overlay.show(OverlayCategory::DataView, errors);
            return Ok(GuardOutcome::DataErrors);
        }
        self.overlay.hide(OverlayCategory::DataView);

        let row_count = view.row_count();
        if row_count > self.row_limit {
            let error = ListError::TooManyRows {
                row_count,
                limit: self.row_limit,
            };
            tracing::warn!("{}", error);
            self.overlay.show(OverlayCategory::General, vec![error.to_string()]);
            return Ok(GuardOutcome::TooManyRows);
        }

        if !self.tracker.is_current(view.generation()) {
            tracing::debug!(
                "skipping stale delivery (generation {}, latest {})",
                view.generation(),
                self.tracker.latest()
            );
            return Ok(GuardOutcome::Stale);
        }

        match render(view) {
            Ok(()) => {
                self.overlay.hide(OverlayCategory::General);
                listener.render_complete();
                Ok(GuardOutcome::Rendered)
            }
            Err(e) => {
                tracing::error!("render failed: {:#}", e);
                self.overlay.show(OverlayCategory::General, vec![e.to_string()]);
                if self.debug {
                    Err(ListError::Render(e))
                } else {
                    Ok(GuardOutcome::Failed)
                }
            }
        }
    }
}
