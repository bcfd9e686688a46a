//! Category list panel UI rendering
//!
//! Lays out the search field and the list area, routes input into the list
//! controller and paints rows, scrollbar and overlays through the render guard.

use catlist::{GuardOutcome, MarkCommand, PropertyName, PropertyValue};
use eframe::egui;
use crate::app::AppState;
use crate::rendering::{list_renderer, overlays, scrollbar_renderer};
use crate::ui::input::list_input_handler::{handle_list_input, ListInputResult};

/// Result of user interaction with the list panel
pub enum ListPanelInteraction {
    /// A rectangle selection finished
    MarkRequested(Vec<MarkCommand>),
    /// The search field changed
    PropertyChanged(PropertyName, PropertyValue),
}

/// Renders the list panel
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<ListPanelInteraction>` - User interaction result
pub fn render_list_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<ListPanelInteraction> {
    let mut interaction = None;
    let full_rect = ui.available_rect_before_wrap();
    state.list.set_viewport(full_rect.width(), full_rect.height());

    let search_height = state.list.search_field_height();
    if search_height > 0.0 {
        let search_rect = egui::Rect::from_min_size(full_rect.min, egui::vec2(full_rect.width(), search_height));
        let search = egui::TextEdit::singleline(state.panel.search_text_mut())
            .hint_text("🔍 Search")
            .desired_width(f32::INFINITY);
        if ui.put(search_rect, search).changed() {
            let text = state.panel.search_text().to_string();
            interaction = Some(ListPanelInteraction::PropertyChanged(
                PropertyName::SearchExpression,
                PropertyValue::Text(text),
            ));
        }
    }

    let list_rect = egui::Rect::from_min_max(
        egui::pos2(full_rect.left(), full_rect.top() + search_height),
        full_rect.max,
    );
    let response = ui.allocate_rect(list_rect, egui::Sense::click_and_drag());

    let Some(tree) = state.data.tree() else {
        ui.painter().text(
            list_rect.center(),
            egui::Align2::CENTER_CENTER,
            "No data loaded",
            egui::FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
        return interaction;
    };

    match handle_list_input(ui.ctx(), list_rect, &response, &mut state.list) {
        ListInputResult::Marked(commands) => {
            interaction = Some(ListPanelInteraction::MarkRequested(commands));
        }
        ListInputResult::Scrolled(offset) => {
            tracing::trace!("scrolled to offset {}", offset);
        }
        ListInputResult::Redraw | ListInputResult::None => {}
    }

    let styling = state.styling.current_styling();
    let painter = ui.painter_at(list_rect);
    let list = &state.list;

    let outcome = state.guard.run(tree, &mut state.stats, |_| {
        list_renderer::render_rows(&painter, list_rect, list, &styling)
    });

    match outcome {
        Ok(GuardOutcome::Rendered) => {
            if list.scrollbar_visible() {
                let column = egui::Rect::from_min_max(
                    egui::pos2(list_rect.right() - list.config().scrollbar_width, list_rect.top()),
                    list_rect.max,
                );
                scrollbar_renderer::render_scrollbar(&painter, column, list.scrollbar(), &styling);
            }
            if let Some(selection) = list.selection().overlay_rect() {
                overlays::render_selection_overlay(&painter, list_rect, selection, &styling);
            }
            state.stats.record_outcome(GuardOutcome::Rendered);
        }
        Ok(outcome) => state.stats.record_outcome(outcome),
        Err(e) => {
            tracing::error!("{:#}", e);
            state.stats.record_outcome(GuardOutcome::Failed);
            state.error_message = Some(e.to_string());
        }
    }

    overlays::render_error_overlay(&painter, list_rect, state.guard.overlay(), &styling);

    interaction
}
