//! Category List Viewer GUI Application
//!
//! An interactive viewer for category snapshots built with the egui framework.
//! The viewer features:
//! - A flattened, hierarchically sorted category list with virtual scrolling
//! - Word-based search with wildcards and quoted phrases
//! - A custom scrollbar and rectangle selection for marking rows
//! - Asynchronous snapshot loading with a loading indicator
//! - Persistent list properties and styling preference
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `state/` - Focused state components (data, styling, panel chrome)
//! - `io/` - Background snapshot loading
//! - `ui/` - Panel rendering, interaction, and input handling
//! - `rendering/` - Low-level painting of rows, scrollbar and overlays
//! - `utils/` - Formatting helpers

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod utils;
mod state;
mod io;
mod app;
mod rendering;
mod ui;

use app::{AppState, ApplicationCoordinator, PropertyStore, StylingCoordinator};
use io::AsyncLoader;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes and launches the viewer GUI.
fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command-line arguments to check for initial file to load
    let initial_file = std::env::args()
        .nth(1)
        .map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 720.0])
            .with_title("Category List"),
        ..Default::default()
    };

    eframe::run_native(
        "Category List",
        options,
        Box::new(move |cc| Ok(Box::new(CategoryListApp::new(cc, initial_file)))),
    )
}

/// The main viewer application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles loading, marking and property changes
/// - `StylingCoordinator` handles styling persistence and application
/// - `PanelManager` handles UI panel layout and rendering
struct CategoryListApp {
    /// Centralized application state
    state: AppState,
    /// Asynchronous snapshot loader
    loader: AsyncLoader,
    /// Optional file to load on first frame
    pending_file_load: Option<PathBuf>,
}

impl CategoryListApp {
    /// Creates a new viewer instance with styling, properties and configuration from persistent storage.
    /// Optionally accepts an initial file path to load on startup.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let styling_name = StylingCoordinator::load_styling_from_storage(cc.storage);
        let properties = PropertyStore::load_properties(cc.storage);
        let config = PropertyStore::load_config(cc.storage);

        tracing::info!(
            "starting with styling {}, row limit {}, line height {}",
            styling_name,
            config.row_limit,
            config.line_height
        );

        Self {
            state: AppState::with_settings(&styling_name, properties, config),
            loader: AsyncLoader::new(),
            pending_file_load: initial_file,
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
            }
            PanelInteraction::OpenVirtualRequested => {
                ApplicationCoordinator::open_virtual(&mut self.state, &mut self.loader);
            }
            PanelInteraction::SaveRequested(path) => {
                ApplicationCoordinator::save_snapshot(&mut self.state, path);
            }
            PanelInteraction::PropertyChanged(name, value) => {
                ApplicationCoordinator::set_property(&mut self.state, name, value);
            }
            PanelInteraction::MarkRequested(commands) => {
                ApplicationCoordinator::apply_marks(&mut self.state, &commands);
            }
        }
        ctx.request_repaint();
    }

    fn persist(&self, storage: &mut dyn eframe::Storage) {
        StylingCoordinator::save_styling_to_storage(storage, self.state.styling.current_styling_name());
        PropertyStore::save(storage, &self.state.properties.snapshot(), self.state.list.config());
    }
}

impl eframe::App for CategoryListApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.persist(storage);
    }

    /// Main update loop that renders all UI panels and handles application state.
    ///
    /// 1. Check for async loading completion
    /// 2. Apply styling
    /// 3. Load initial file if specified via command line
    /// 4. Render all panels via PanelManager
    /// 5. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        StylingCoordinator::apply_current_styling(ctx, &self.state);

        // Persist preferences during frame (for crash resilience)
        if let Some(storage) = frame.storage_mut() {
            self.persist(storage);
        }

        // Load initial file if specified via command line (only on first frame)
        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        for interaction in PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
