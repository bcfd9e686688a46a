//! Styling state management.
//!
//! This module encapsulates the styling manager and the selected preset.

use catlist::{Styling, StylingManager};

/// State related to visual styling.
pub struct StylingState {
    /// Styling manager instance, owns the current selection
    manager: StylingManager,
}

impl std::fmt::Debug for StylingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StylingState")
            .field("current_styling_name", &self.manager.current_styling_name())
            .finish_non_exhaustive()
    }
}

impl Default for StylingState {
    fn default() -> Self {
        Self::new()
    }
}

impl StylingState {
    /// Creates a new styling state with the default preset.
    pub fn new() -> Self {
        Self {
            manager: StylingManager::new(),
        }
    }

    /// Creates a new styling state with a specific preset.
    ///
    /// Unknown names keep the default preset.
    pub fn with_styling(styling_name: &str) -> Self {
        let mut state = Self::new();
        state.set_styling(styling_name);
        state
    }

    // ===== Styling Queries =====

    pub fn manager(&self) -> &StylingManager {
        &self.manager
    }

    pub fn current_styling_name(&self) -> &str {
        self.manager.current_styling_name()
    }

    pub fn current_styling(&self) -> Styling {
        self.manager.current_styling()
    }

    // ===== Styling Mutations =====

    /// Sets the current preset by name.
    pub fn set_styling(&mut self, styling_name: &str) {
        if let Err(e) = self.manager.set_current_styling(styling_name) {
            tracing::warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_styling_keeps_default() {
        let state = StylingState::with_styling("Neon");
        assert_eq!(state.current_styling_name(), "Light");

        let state = StylingState::with_styling("Dark");
        assert_eq!(state.current_styling_name(), "Dark");
        assert!(!state.current_styling().is_light());
    }
}
