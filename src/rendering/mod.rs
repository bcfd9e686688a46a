//! Rendering subsystem for drawing the category list
//!
//! This module contains all painting logic for the viewer:
//! - Row rendering (indentation, header fonts, marked backgrounds)
//! - Scrollbar rendering (track, step buttons, handle)
//! - Overlays (rectangle selection, error messages)
//! - Text utilities (text measurement and truncation)

pub mod list_renderer;
pub mod scrollbar_renderer;
pub mod overlays;
pub mod text_utils;
