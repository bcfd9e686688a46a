//! Input handling subsystem for UI interactions.
//!
//! This module contains all input handling logic:
//! - List input handling (scrollbar, rectangle selection, wheel, keyboard scrolling)

pub mod list_input_handler;
