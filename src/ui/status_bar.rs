//! Status bar UI rendering
//!
//! Handles the bottom status bar displaying data and list statistics.

use eframe::egui;
use egui::RichText;
use catlist::{DataView, GuardOutcome};
use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::utils::{format_count, get_current_memory_mb, format_memory_mb};

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `loader` - Loader, for the loading indicator
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, loader: &AsyncLoader) {
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        if loader.is_loading() {
            ui.spinner();
            ui.label(RichText::new(format!(
                "Loading {}",
                loader.pending_source().unwrap_or("snapshot")
            )).strong());
            return;
        }

        let Some(tree) = state.data.tree() else {
            ui.label(RichText::new("No data loaded").strong());
            return;
        };

        let list = &state.list;
        let range = list.scroll().visible_range();
        let first_shown = if range.is_empty() { 0 } else { range.start + 1 };
        ui.label(RichText::new(format!(
            "{} | Levels: {} | Rows: {} | Marked: {} | Items: {} | Showing {}-{}",
            state.data.source().unwrap_or("unknown source"),
            tree.level_names().join(" > "),
            format_count(DataView::row_count(tree)),
            format_count(tree.marked_rows()),
            format_count(list.items().len()),
            first_shown,
            range.end.min(list.items().len()),
        )).strong());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("Renders: {}", state.stats.completed()));
            match state.stats.last_outcome() {
                Some(GuardOutcome::Rendered) | None => {}
                Some(outcome) => {
                    ui.label(RichText::new(format!("Last paint: {:?}", outcome)).color(ui.visuals().warn_fg_color));
                }
            }
        });
    });
}
