use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};

use crate::config::ReportConfig;
use crate::data::model::IncidentDataset;
use crate::state::AppState;
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ForensicReportApp {
    pub state: AppState,
}

impl ForensicReportApp {
    pub fn new(config: ReportConfig, dataset: Arc<IncidentDataset>) -> Self {
        Self {
            state: AppState::new(config, dataset),
        }
    }
}

impl eframe::App for ForensicReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Forensic Clustering Analysis · Generated Nov 2, 2025")
                        .color(Color32::from_rgb(0x64, 0x74, 0x8b)),
                );
            });
        });

        // ---- Left side panel: navigation and filters ----
        egui::SidePanel::left("navigation_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected report view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    views::render(ui, &mut self.state);
                });
        });
    }
}
