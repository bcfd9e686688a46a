//! Overlay rendering for rectangle selection and error messages.
//!
//! This module handles the rendering of overlays on top of the list:
//! - Rectangle selection in progress
//! - Error overlay for data errors and render failures

use catlist::{ErrorOverlay, OverlayCategory, Styling};
use eframe::egui;

/// Renders the rectangle-selection overlay.
///
/// # Arguments
/// * `painter` - Painter clipped to the list area
/// * `list_rect` - Screen rect of the list area
/// * `selection` - Selection rectangle in list coordinates
/// * `styling` - Current styling descriptor
pub fn render_selection_overlay(
    painter: &egui::Painter,
    list_rect: egui::Rect,
    selection: egui::Rect,
    styling: &Styling,
) {
    let selection_rect = selection.translate(list_rect.min.to_vec2());

    painter.rect_filled(selection_rect, 0.0, styling.selection_overlay);
    painter.rect_stroke(
        selection_rect,
        0.0,
        egui::Stroke::new(1.0, styling.marked_background()),
        egui::StrokeKind::Inside,
    );
}

/// Renders the error overlay centered over the list area.
///
/// Data errors are listed first, general messages after them.
pub fn render_error_overlay(
    painter: &egui::Painter,
    list_rect: egui::Rect,
    overlay: &ErrorOverlay,
    styling: &Styling,
) {
    if !overlay.is_visible() {
        return;
    }

    let font_id = egui::FontId::proportional(styling.font.size + 1.0);
    let galleys: Vec<_> = overlay
        .iter()
        .map(|(category, message)| {
            let text = match category {
                OverlayCategory::DataView => format!("⚠ {}", message),
                OverlayCategory::General => message.to_string(),
            };
            painter.layout(text, font_id.clone(), styling.error, list_rect.width() - 24.0)
        })
        .collect();

    let line_gap = 4.0;
    let height: f32 = galleys.iter().map(|g| g.size().y + line_gap).sum::<f32>() - line_gap;
    let width = galleys.iter().map(|g| g.size().x).fold(0.0, f32::max);
    let padding = egui::vec2(8.0, 6.0);

    let box_rect = egui::Rect::from_center_size(
        list_rect.center(),
        egui::vec2(width, height) + padding * 2.0,
    );
    painter.rect_filled(box_rect, 4.0, styling.background);
    painter.rect_stroke(box_rect, 4.0, egui::Stroke::new(1.0, styling.error), egui::StrokeKind::Outside);

    let mut y = box_rect.top() + padding.y;
    for galley in galleys {
        let size = galley.size();
        painter.galley(egui::pos2(box_rect.center().x - size.x / 2.0, y), galley, styling.error);
        y += size.y + line_gap;
    }
}
