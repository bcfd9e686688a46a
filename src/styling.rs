//! Styling descriptors for the category list.
//!
//! A styling descriptor mirrors what a host hands to a visualization: font
//! color, size, weight and family, the line stroke color and the background.
//! It is used only for presentation, never for layout decisions.
//!
//! # Examples
//!
//! ```
//! use catlist::styling::{StylingManager, marked_background};
//!
//! let manager = StylingManager::new();
//! let dark = manager.get_styling("Dark").unwrap();
//! let marked = marked_background(dark.background);
//! assert_eq!(marked, catlist::styling::hex_to_color32("#6489fa"));
//! ```

use egui::Color32;
use std::collections::HashMap;

/// Background used for marked rows on light backgrounds
pub const MARKED_ON_LIGHT: &str = "#d6dcfc";
/// Background used for marked rows on dark backgrounds
pub const MARKED_ON_DARK: &str = "#6489fa";

/// Relative luminance above which a color counts as light
const LUMINANCE_THRESHOLD: f32 = 0.179;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Font part of the styling descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyling {
    pub color: Color32,
    pub size: f32,
    pub weight: FontWeight,
    pub family: String,
}

/// Complete styling descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Styling {
    pub name: String,
    pub font: FontStyling,
    /// Color for separators and the scrollbar outline
    pub line_stroke: Color32,
    pub background: Color32,
    /// Fill of the scrollbar handle and step buttons
    pub scrollbar: Color32,
    /// Fill of the rectangle-selection overlay
    pub selection_overlay: Color32,
    pub error: Color32,
}

impl Styling {
    /// Returns true if the background is light.
    pub fn is_light(&self) -> bool {
        relative_luminance(self.background) > LUMINANCE_THRESHOLD
    }

    /// Background for fully marked rows, picked for contrast with the list background.
    pub fn marked_background(&self) -> Color32 {
        marked_background(self.background)
    }

    /// Text color for fully marked rows.
    pub fn marked_text(&self) -> Color32 {
        readable_color(self.marked_background(), Color32::BLACK, Color32::WHITE)
    }
}

/// Keeps the built-in styling presets and the current selection.
pub struct StylingManager {
    stylings: HashMap<String, Styling>,
    current_styling_name: String,
}

impl StylingManager {
    /// Creates a manager with the built-in presets
    pub fn new() -> Self {
        let mut stylings = HashMap::new();
        stylings.insert("Light".to_string(), light_styling());
        stylings.insert("Dark".to_string(), dark_styling());

        Self {
            stylings,
            current_styling_name: "Light".to_string(),
        }
    }

    pub fn get_styling(&self, name: &str) -> Option<&Styling> {
        self.stylings.get(name)
    }

    /// Returns all preset names, sorted
    pub fn list_stylings(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stylings.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    pub fn current_styling_name(&self) -> &str {
        &self.current_styling_name
    }

    /// Returns the current styling, falling back to the light preset.
    pub fn current_styling(&self) -> Styling {
        self.stylings
            .get(&self.current_styling_name)
            .cloned()
            .unwrap_or_else(light_styling)
    }

    /// Sets the current styling by name
    pub fn set_current_styling(&mut self, name: &str) -> Result<(), String> {
        if self.stylings.contains_key(name) {
            self.current_styling_name = name.to_string();
            Ok(())
        } else {
            Err(format!("Styling '{}' not found", name))
        }
    }

    /// Applies a styling to egui visuals
    pub fn apply_styling(&self, styling: &Styling, visuals: &mut egui::Visuals) {
        visuals.panel_fill = styling.background;
        visuals.extreme_bg_color = styling.background;
        visuals.override_text_color = Some(styling.font.color);
        visuals.widgets.noninteractive.bg_stroke.color = styling.line_stroke;
        visuals.selection.bg_fill = styling.marked_background();
        visuals.error_fg_color = styling.error;
    }
}

impl Default for StylingManager {
    fn default() -> Self {
        Self::new()
    }
}

fn light_styling() -> Styling {
    Styling {
        name: "Light".to_string(),
        font: FontStyling {
            color: hex_to_color32("#61646b"),
            size: 12.0,
            weight: FontWeight::Normal,
            family: "Roboto, Helvetica, Arial".to_string(),
        },
        line_stroke: hex_to_color32("#d8d8d8"),
        background: Color32::WHITE,
        scrollbar: hex_to_color32("#bdbfc3"),
        selection_overlay: with_alpha(hex_to_color32("#6489fa"), 60),
        error: Color32::from_rgb(200, 40, 40),
    }
}

fn dark_styling() -> Styling {
    Styling {
        name: "Dark".to_string(),
        font: FontStyling {
            color: hex_to_color32("#f8f8f8"),
            size: 12.0,
            weight: FontWeight::Normal,
            family: "Roboto, Helvetica, Arial".to_string(),
        },
        line_stroke: hex_to_color32("#5a5e66"),
        background: hex_to_color32("#2a2d33"),
        scrollbar: hex_to_color32("#6c7078"),
        selection_overlay: with_alpha(hex_to_color32("#d6dcfc"), 50),
        error: Color32::from_rgb(231, 76, 60),
    }
}

/// Relative luminance of an sRGB color (WCAG definition).
pub fn relative_luminance(color: Color32) -> f32 {
    fn channel(c: u8) -> f32 {
        let c = c as f32 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(color.r()) + 0.7152 * channel(color.g()) + 0.0722 * channel(color.b())
}

/// Picks `on_light` for light backgrounds and `on_dark` for dark ones.
pub fn readable_color(background: Color32, on_light: Color32, on_dark: Color32) -> Color32 {
    if relative_luminance(background) > LUMINANCE_THRESHOLD {
        on_light
    } else {
        on_dark
    }
}

/// Marked-row background for a given list background.
pub fn marked_background(background: Color32) -> Color32 {
    readable_color(background, hex_to_color32(MARKED_ON_LIGHT), hex_to_color32(MARKED_ON_DARK))
}

/// Converts a hex color string (like "#282a36") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}

/// Adjusts the brightness of a color by a factor (1.0 = no change, >1.0 = brighter, <1.0 = darker)
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// Sets the alpha channel of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_background_contrast() {
        assert_eq!(marked_background(Color32::WHITE), hex_to_color32(MARKED_ON_LIGHT));
        assert_eq!(marked_background(Color32::BLACK), hex_to_color32(MARKED_ON_DARK));
        assert_eq!(marked_background(hex_to_color32("#2a2d33")), hex_to_color32(MARKED_ON_DARK));
    }

    #[test]
    fn test_luminance_threshold() {
        // #757575 sits just below the threshold, #767676 just above
        assert!(relative_luminance(hex_to_color32("#757575")) < LUMINANCE_THRESHOLD);
        assert!(relative_luminance(hex_to_color32("#767676")) > LUMINANCE_THRESHOLD);
    }

    #[test]
    fn test_presets() {
        let mut manager = StylingManager::new();
        assert_eq!(manager.list_stylings(), vec!["Dark", "Light"]);
        assert!(manager.current_styling().is_light());

        manager.set_current_styling("Dark").unwrap();
        assert!(!manager.current_styling().is_light());
        assert!(manager.set_current_styling("Neon").is_err());
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex_to_color32("#6489fa"), Color32::from_rgb(0x64, 0x89, 0xfa));
        assert_eq!(hex_to_color32("bad"), Color32::from_rgb(0, 0, 0));
    }
}
