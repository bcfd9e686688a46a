//! Settings popout UI rendering
//!
//! A small floating panel under the settings button with the list
//! properties. It closes when a click lands outside of it or on Escape.

use catlist::{PropertyName, PropertyValue};
use eframe::egui;
use crate::app::AppState;

/// Renders the settings popout if it is open
///
/// # Arguments
/// * `ctx` - The egui context
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * The property change made this frame, if any
pub fn render_settings_popout(
    ctx: &egui::Context,
    state: &mut AppState,
) -> Option<(PropertyName, PropertyValue)> {
    if !state.panel.settings_open() {
        return None;
    }

    let button_rect = state.panel.settings_button_rect();
    let anchor = button_rect.map_or(egui::pos2(8.0, 32.0), |rect| rect.left_bottom() + egui::vec2(0.0, 4.0));
    let properties = state.properties.snapshot();
    let mut change = None;

    let area = egui::Area::new(egui::Id::new("settings_popout"))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(180.0);

                ui.label(egui::RichText::new("Appearance").strong());
                let mut show_search_field = properties.show_search_field;
                if ui.checkbox(&mut show_search_field, "Show search field").changed() {
                    change = Some((PropertyName::ShowSearchField, PropertyValue::Flag(show_search_field)));
                }

                ui.separator();

                ui.label(egui::RichText::new("Sorting").strong());
                let mut reverse_order = properties.reverse_order;
                if ui.checkbox(&mut reverse_order, "Reverse items order").changed() {
                    change = Some((PropertyName::ReverseOrder, PropertyValue::Flag(reverse_order)));
                }
            });
        });

    let clicked_outside = ctx.input(|i| {
        i.pointer.any_pressed()
            && i.pointer.interact_pos().is_some_and(|pos| {
                !area.response.rect.contains(pos) && !button_rect.is_some_and(|rect| rect.contains(pos))
            })
    });
    let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
    if clicked_outside || escape {
        state.panel.close_settings();
    }

    change
}
