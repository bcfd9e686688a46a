//! Styling selection and persistence coordination.
//!
//! Handles styling selection, application, and persistent storage across sessions.

use crate::app::AppState;

const STYLING_KEY: &str = "styling_preference";
const DEFAULT_STYLING: &str = "Light";

/// Coordinates styling management and persistence.
pub struct StylingCoordinator;

impl StylingCoordinator {
    /// Loads the styling preference from persistent storage during application startup.
    ///
    /// Returns the preset name if found, otherwise defaults to "Light".
    pub fn load_styling_from_storage(storage: Option<&dyn eframe::Storage>) -> String {
        storage
            .and_then(|storage| storage.get_string(STYLING_KEY))
            .unwrap_or_else(|| DEFAULT_STYLING.to_string())
    }

    /// Saves the current styling preference to persistent storage.
    pub fn save_styling_to_storage(storage: &mut dyn eframe::Storage, styling_name: &str) {
        storage.set_string(STYLING_KEY, styling_name.to_string());
        storage.flush();
    }

    /// Applies the current styling to the egui context.
    ///
    /// Called every frame to ensure the styling is correctly applied.
    pub fn apply_current_styling(ctx: &egui::Context, state: &AppState) {
        let styling = state.styling.current_styling();
        let mut visuals = if styling.is_light() {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };

        state.styling.manager().apply_styling(&styling, &mut visuals);
        ctx.set_visuals(visuals);
    }
}
