//! Application-level modules for the category list viewer.
//!
//! This module contains the main application coordinator and centralized state management.

mod app_state;
mod application_coordinator;
mod styling_coordinator;
mod property_store;

pub use app_state::AppState;
pub use application_coordinator::ApplicationCoordinator;
pub use styling_coordinator::StylingCoordinator;
pub use property_store::PropertyStore;
