use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::ClusterLabel;
use crate::state::{AppState, ReportView};

// ---------------------------------------------------------------------------
// Left side panel – navigation, metrics, cluster filter
// ---------------------------------------------------------------------------

/// Render the left navigation / filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- View selector ----
            ui.strong("Select view");
            for view in ReportView::ALL {
                ui.radio_value(&mut state.view, view, view.title());
            }
            ui.separator();

            // ---- Dataset metrics ----
            metric(ui, "Total Attacks", state.dataset.len().to_string());
            metric(
                ui,
                "Clusters Identified",
                state.dataset.cluster_count().to_string(),
            );
            ui.separator();

            // ---- Cluster multi-select ----
            let clusters: Vec<ClusterLabel> = state.dataset.clusters.iter().cloned().collect();
            let header_text = format!(
                "Filter by cluster  ({}/{})",
                state.selection.len(),
                clusters.len()
            );
            ui.label(RichText::new(header_text).strong());

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            let mut toggled: Option<ClusterLabel> = None;
            for cluster in &clusters {
                let mut checked = state.selection.contains(cluster);
                let text = RichText::new(format!("Cluster {cluster}"))
                    .color(state.colors.color_for(cluster));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(cluster.clone());
                }
            }
            if let Some(cluster) = toggled {
                state.toggle_cluster(&cluster);
            }

            if state.selection.is_empty() {
                ui.small("No cluster selected: showing all records.");
            }
        });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.label(RichText::new(value).size(24.0).strong());
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered data…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Export failed") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Save dialog
// ---------------------------------------------------------------------------

/// Ask for a destination and export the visible records there.
pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download data")
        .set_file_name(state.config.export_file_name.as_str())
        .add_filter(format!("CSV ({})", state.config.export_mime), &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_visible(&path);
    }
}
