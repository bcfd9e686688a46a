//! State management modules for the category list viewer.
//!
//! This module contains state-only logic (no UI concerns):
//! - Data state (category tree, source description)
//! - Styling state (styling manager, current preset)
//! - Panel state (search buffer, settings popout, render statistics)

mod data_state;
mod styling_state;
mod panel_state;

pub use data_state::DataState;
pub use styling_state::StylingState;
pub use panel_state::{PanelState, RenderStats};
