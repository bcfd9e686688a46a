//! Category row rendering
//!
//! Paints the rendered window of display items: marked backgrounds,
//! depth indentation, header fonts and separators.

use anyhow::ensure;
use catlist::{CategoryListController, DisplayItem, RowStyle, Styling};
use eframe::egui;

use crate::rendering::text_utils::truncate_text_to_fit;

/// Left padding of the label inside its row
const TEXT_PADDING: f32 = 4.0;

/// Font size for a row style, relative to the base styling size.
pub fn font_size(style: RowStyle, base: f32) -> f32 {
    match style {
        RowStyle::Item => base,
        RowStyle::Header => base + 1.0,
        RowStyle::SuperHeader => base + 2.0,
        RowStyle::MegaSuperHeader => base + 3.0,
    }
}

/// Renders the visible rows of the list
///
/// # Arguments
/// * `painter` - Painter clipped to the list area
/// * `list_rect` - Screen rect of the list area (below the search field)
/// * `list` - The list controller providing the visible window
/// * `styling` - Current styling descriptor
///
/// # Errors
/// Fails if the list area has no finite size.
pub fn render_rows(
    painter: &egui::Painter,
    list_rect: egui::Rect,
    list: &CategoryListController,
    styling: &Styling,
) -> anyhow::Result<()> {
    ensure!(list_rect.is_finite(), "list area has no finite size: {:?}", list_rect);

    let config = list.config();
    let row_width = if list.scrollbar_visible() {
        list_rect.width() - config.scrollbar_width
    } else {
        list_rect.width()
    };

    for (i, item) in list.visible_items().iter().enumerate() {
        let top = list_rect.top() + i as f32 * config.line_height;
        let row_rect = egui::Rect::from_min_size(
            egui::pos2(list_rect.left(), top),
            egui::vec2(row_width, config.line_height),
        );
        render_row(painter, row_rect, item, list.row_style(item), config.indent_width, styling);
    }
    Ok(())
}

fn render_row(
    painter: &egui::Painter,
    row_rect: egui::Rect,
    item: &DisplayItem,
    style: RowStyle,
    indent_width: f32,
    styling: &Styling,
) {
    let text_color = if item.is_fully_marked() {
        painter.rect_filled(row_rect, 0.0, styling.marked_background());
        styling.marked_text()
    } else {
        styling.font.color
    };

    if style != RowStyle::Item {
        painter.hline(
            row_rect.x_range(),
            row_rect.bottom() - 0.5,
            egui::Stroke::new(1.0, styling.line_stroke),
        );
    }

    let indent = item.depth as f32 * indent_width + TEXT_PADDING;
    let font_id = egui::FontId::proportional(font_size(style, styling.font.size));
    let label = truncate_text_to_fit(&item.text, row_rect.width() - indent, &font_id, painter);

    painter.text(
        egui::pos2(row_rect.left() + indent, row_rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        font_id,
        text_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fonts_grow_with_level() {
        assert_eq!(font_size(RowStyle::Item, 12.0), 12.0);
        assert!(font_size(RowStyle::Header, 12.0) < font_size(RowStyle::SuperHeader, 12.0));
        assert!(font_size(RowStyle::SuperHeader, 12.0) < font_size(RowStyle::MegaSuperHeader, 12.0));
    }
}
