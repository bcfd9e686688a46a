//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the category list viewer:
//! - Header panel (snapshot controls, settings toggle, styling selector)
//! - List panel (search field, rows, scrollbar, overlays)
//! - Settings popout (list properties)
//! - Status bar (data and list statistics)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (pointer, wheel and keyboard interactions)

pub mod header;
pub mod list_panel;
pub mod settings_popout;
pub mod status_bar;
pub mod panel_manager;
pub mod input;
