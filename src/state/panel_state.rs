//! Panel-local UI state.
//!
//! Text buffers and popout visibility that only the UI layer needs.

use catlist::{GuardOutcome, RenderListener};

/// State of the list panel chrome.
#[derive(Debug, Default)]
pub struct PanelState {
    /// Text buffer bound to the search field
    search_text: String,
    /// Whether the settings popout is open
    settings_open: bool,
    /// Screen rect of the button that toggles the popout
    settings_button_rect: Option<egui::Rect>,
}

impl PanelState {
    /// Creates a panel state whose search field shows a persisted expression.
    pub fn with_search_text(search_text: String) -> Self {
        Self {
            search_text,
            ..Self::default()
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search_text_mut(&mut self) -> &mut String {
        &mut self.search_text
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
    }

    pub fn settings_button_rect(&self) -> Option<egui::Rect> {
        self.settings_button_rect
    }

    pub fn set_settings_button_rect(&mut self, rect: egui::Rect) {
        self.settings_button_rect = Some(rect);
    }
}

/// Counts completed renders for the status bar.
#[derive(Debug, Default)]
pub struct RenderStats {
    completed: u64,
    last_outcome: Option<GuardOutcome>,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn last_outcome(&self) -> Option<GuardOutcome> {
        self.last_outcome
    }

    pub fn record_outcome(&mut self, outcome: GuardOutcome) {
        self.last_outcome = Some(outcome);
    }
}

impl RenderListener for RenderStats {
    fn render_complete(&mut self) {
        self.completed += 1;
    }
}
