//! Header panel UI rendering
//!
//! Handles the top menu bar with snapshot controls, the settings toggle and the styling selector.

use eframe::egui;
use egui::Color32;
use std::path::PathBuf;
use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a snapshot file to open
    OpenFileRequested(PathBuf),
    /// User clicked "Virtual Data" button
    OpenVirtualRequested,
    /// User picked a file to save the marked snapshot to
    SaveRequested(PathBuf),
}

/// Renders the application header with snapshot and settings controls
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Snapshot").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("All Snapshots", &["json", "br"])
                .add_filter("JSON Snapshots", &["json"])
                .add_filter("Compressed Snapshots", &["br"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🔮 Virtual Data").clicked() {
            interaction = Some(HeaderInteraction::OpenVirtualRequested);
        }

        let can_save = state.data.tree().is_some();
        if ui.add_enabled(can_save, egui::Button::new("💾 Save")).clicked() {
            let dialog = rfd::FileDialog::new()
                .add_filter("JSON Snapshots", &["json"])
                .add_filter("Compressed Snapshots", &["br"])
                .set_file_name("categories.json");

            if let Some(path) = dialog.save_file() {
                interaction = Some(HeaderInteraction::SaveRequested(path));
            }
        }

        ui.separator();

        let settings_button = ui.selectable_label(state.panel.settings_open(), "⚙ Settings");
        state.panel.set_settings_button_rect(settings_button.rect);
        if settings_button.clicked() {
            state.panel.toggle_settings();
        }

        // Push styling selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_styling = state.styling.current_styling_name().to_string();
            let mut current_styling = old_styling.clone();
            egui::ComboBox::from_id_salt("styling_selector")
                .selected_text(&current_styling)
                .show_ui(ui, |ui| {
                    for styling_name in state.styling.manager().list_stylings() {
                        ui.selectable_value(
                            &mut current_styling,
                            styling_name.to_string(),
                            styling_name,
                        );
                    }
                });

            if old_styling != current_styling {
                state.styling.set_styling(&current_styling);
                ui.ctx().request_repaint();
            }

            ui.label("Styling:");
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
