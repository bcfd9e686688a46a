//! Custom scrollbar rendering
//!
//! Draws the track, the two step buttons and the drag handle. Geometry comes
//! from the scrollbar control so painting and hit testing always agree.

use catlist::{adjust_brightness, ScrollbarControl, Styling};
use eframe::egui;

/// Renders the scrollbar into its column
///
/// # Arguments
/// * `painter` - Painter clipped to the list area
/// * `column` - Screen rect of the scrollbar column
/// * `scrollbar` - Scrollbar control providing the geometry
/// * `styling` - Current styling descriptor
pub fn render_scrollbar(
    painter: &egui::Painter,
    column: egui::Rect,
    scrollbar: &ScrollbarControl,
    styling: &Styling,
) {
    let Some(handle) = scrollbar.handle_geometry() else {
        return;
    };
    let stroke = egui::Stroke::new(1.0, styling.line_stroke);
    let button = scrollbar.button_size();

    painter.rect_stroke(column, 2.0, stroke, egui::StrokeKind::Inside);

    let up = egui::Rect::from_min_size(column.min, egui::vec2(column.width(), button));
    render_step_button(painter, up, true, styling);

    let down = egui::Rect::from_min_size(
        egui::pos2(column.left(), column.top() + scrollbar.track_height() - button),
        egui::vec2(column.width(), button),
    );
    render_step_button(painter, down, false, styling);

    let handle_rect = egui::Rect::from_min_max(
        egui::pos2(column.left() + 2.0, column.top() + handle.top),
        egui::pos2(column.right() - 2.0, column.top() + handle.bottom()),
    );
    let fill = if scrollbar.is_dragging() {
        adjust_brightness(styling.scrollbar, 0.8)
    } else {
        styling.scrollbar
    };
    painter.rect_filled(handle_rect, 2.0, fill);
}

fn render_step_button(painter: &egui::Painter, rect: egui::Rect, pointing_up: bool, styling: &Styling) {
    let center = rect.center();
    let half = rect.width().min(rect.height()) * 0.3;
    let points = if pointing_up {
        vec![
            egui::pos2(center.x, center.y - half),
            egui::pos2(center.x + half, center.y + half),
            egui::pos2(center.x - half, center.y + half),
        ]
    } else {
        vec![
            egui::pos2(center.x - half, center.y - half),
            egui::pos2(center.x + half, center.y - half),
            egui::pos2(center.x, center.y + half),
        ]
    };
    painter.add(egui::Shape::convex_polygon(points, styling.scrollbar, egui::Stroke::NONE));
}
