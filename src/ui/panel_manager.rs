//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (header, list, settings popout, status) and
//! collects their interactions for the application coordinator.

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::{header, list_panel, settings_popout, status_bar};
use catlist::{MarkCommand, PropertyName, PropertyValue};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// User requested to open a snapshot file
    OpenFileRequested(std::path::PathBuf),
    /// User requested virtual data
    OpenVirtualRequested,
    /// User requested to save the marked snapshot
    SaveRequested(std::path::PathBuf),
    /// A property was changed from the search field or the settings popout
    PropertyChanged(PropertyName, PropertyValue),
    /// A rectangle selection produced mark commands
    MarkRequested(Vec<MarkCommand>),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
    ) -> Vec<PanelInteraction> {
        let mut interactions = Vec::new();

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interactions.push(match header_interaction {
                    header::HeaderInteraction::OpenFileRequested(path) => {
                        PanelInteraction::OpenFileRequested(path)
                    }
                    header::HeaderInteraction::OpenVirtualRequested => {
                        PanelInteraction::OpenVirtualRequested
                    }
                    header::HeaderInteraction::SaveRequested(path) => {
                        PanelInteraction::SaveRequested(path)
                    }
                });
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, loader);
        });

        // Central panel: the list itself
        let list_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(list_frame)
            .show(ctx, |ui| {
                if let Some(list_interaction) = list_panel::render_list_panel(ui, state) {
                    interactions.push(match list_interaction {
                        list_panel::ListPanelInteraction::MarkRequested(commands) => {
                            PanelInteraction::MarkRequested(commands)
                        }
                        list_panel::ListPanelInteraction::PropertyChanged(name, value) => {
                            PanelInteraction::PropertyChanged(name, value)
                        }
                    });
                }
            });

        // Settings popout floats above everything else
        if let Some((name, value)) = settings_popout::render_settings_popout(ctx, state) {
            interactions.push(PanelInteraction::PropertyChanged(name, value));
        }

        interactions
    }
}
