//! Text rendering utilities
//!
//! Shared utilities for text measurement and truncation.

use eframe::egui;

const ELLIPSIS: &str = "..";

/// Horizontal padding kept free around truncated text
const PADDING: f32 = 8.0;

fn text_width(text: &str, font_id: &egui::FontId, painter: &egui::Painter) -> f32 {
    painter
        .layout_no_wrap(text.to_string(), font_id.clone(), egui::Color32::WHITE)
        .size()
        .x
}

/// Truncates text to fit within a given width, adding ".." if truncated
///
/// # Arguments
/// * `text` - The text to potentially truncate
/// * `available_width` - Maximum width available for the text
/// * `font_id` - Font to use for measuring text
/// * `painter` - Painter for text measurement
///
/// # Returns
/// * Truncated string that fits within the available width
pub fn truncate_text_to_fit(
    text: &str,
    available_width: f32,
    font_id: &egui::FontId,
    painter: &egui::Painter,
) -> String {
    let max_width = available_width - PADDING;
    if max_width <= 0.0 {
        return String::new();
    }

    if text_width(text, font_id, painter) <= max_width {
        return text.to_string();
    }

    let available_for_text = max_width - text_width(ELLIPSIS, font_id, painter);
    if available_for_text <= 0.0 {
        return String::new();
    }

    // Byte offsets of every char boundary; binary search over the prefix length
    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
    let mut low = 0;
    let mut high = boundaries.len() - 1;

    while low < high {
        let mid = (low + high + 1) / 2;
        if text_width(&text[..boundaries[mid]], font_id, painter) <= available_for_text {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    let mut result = text[..boundaries[low]].to_string();
    result.push_str(ELLIPSIS);
    result
}
