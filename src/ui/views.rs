use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Feature;
use crate::state::{AppState, ReportView};
use crate::stats::distribution::{component_points, points_by_cluster, values_by_cluster};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// Fixed report content
// ---------------------------------------------------------------------------

/// Scores computed upstream when the clustering was fitted.
const KPIS: [(&str, &str); 4] = [
    ("Silhouette Score", "0.8176"),
    ("ARI", "1.000"),
    ("Attackers", "2"),
    ("Balance", "167/167"),
];

const WARNING_COLOR: Color32 = Color32::from_rgb(0xd9, 0x77, 0x06);

/// Render the page selected in the side panel.
pub fn render(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Forensic Clustering Analysis").size(28.0).strong());
    ui.label(RichText::new("Cyber-attack investigation report").size(18.0));
    ui.separator();

    match state.view {
        ReportView::ExecutiveSummary => executive_summary(ui, state),
        ReportView::DetailedAnalysis => detailed_analysis(ui, state),
        ReportView::ClusterProfiles => cluster_profiles(ui, state),
        ReportView::GeographicDistribution => geographic_distribution(ui, state),
        ReportView::TechnicalDetails => technical_details(ui, state),
    }
}

fn warning(ui: &mut Ui, message: impl std::fmt::Display) {
    ui.colored_label(WARNING_COLOR, format!("⚠ {message}"));
}

// ---------------------------------------------------------------------------
// Executive summary
// ---------------------------------------------------------------------------

fn executive_summary(ui: &mut Ui, state: &AppState) {
    ui.columns(2, |cols| {
        cols[0].group(|ui: &mut Ui| {
            ui.strong("Objective");
            ui.label("Determine whether the attacks came from 2 or 3 distinct attackers.");
        });
        cols[1].group(|ui: &mut Ui| {
            ui.strong("Conclusion");
            ui.label("The analysis confirms TWO distinct attackers.");
        });
    });
    ui.add_space(8.0);

    ui.heading("Key performance indicators");
    egui::Grid::new("kpis")
        .num_columns(KPIS.len())
        .spacing([48.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for (label, _) in KPIS {
                ui.label(label);
            }
            ui.end_row();
            for (_, value) in KPIS {
                ui.label(RichText::new(value).size(28.0).strong());
            }
            ui.end_row();
        });
    ui.add_space(8.0);

    ui.heading("PCA: attacker separation");
    match component_points(&state.filtered_view()) {
        Ok(groups) => plot::cluster_scatter(
            ui,
            "pca_scatter",
            &groups,
            &state.colors,
            ("PC1", "PC2"),
            false,
        ),
        Err(e) => warning(ui, e),
    }
}

// ---------------------------------------------------------------------------
// Detailed analysis
// ---------------------------------------------------------------------------

fn detailed_analysis(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select metric:");
        egui::ComboBox::from_id_salt("metric")
            .selected_text(state.metric.label())
            .show_ui(ui, |ui: &mut Ui| {
                for feature in Feature::ALL {
                    ui.selectable_value(&mut state.metric, feature, feature.label());
                }
            });
    });

    let view = state.filtered_view();
    let metric = state.metric;

    ui.heading(format!("{} by cluster", metric.label()));
    plot::cluster_box_plot(
        ui,
        "metric_box",
        &values_by_cluster(&view, metric),
        &state.colors,
        metric.column(),
    );

    let (x, y) = (Feature::BytesPerMin, Feature::WpmTypingSpeed);
    ui.heading(format!("{} vs {}", x.label(), y.label()));
    plot::cluster_scatter(
        ui,
        "rate_vs_typing",
        &points_by_cluster(&view, x, y),
        &state.colors,
        (x.column(), y.column()),
        true,
    );
}

// ---------------------------------------------------------------------------
// Cluster profiles
// ---------------------------------------------------------------------------

fn cluster_profiles(ui: &mut Ui, state: &AppState) {
    ui.heading("Mean and standard deviation per cluster");
    if state.summary.is_empty() {
        warning(ui, "No records match the current selection.");
        return;
    }
    table::summary_table(ui, &state.summary);
    ui.add_space(8.0);

    let view = state.filtered_view();
    for feature in &Feature::ALL[..3] {
        let groups = values_by_cluster(&view, *feature);
        ui.strong(feature.label());
        ui.columns(2, |cols| {
            plot::cluster_histogram(
                &mut cols[0],
                &format!("hist_{}", feature.column()),
                &groups,
                &state.colors,
                state.config.histogram_bins,
                feature.column(),
            );
            plot::cluster_box_plot(
                &mut cols[1],
                &format!("box_{}", feature.column()),
                &groups,
                &state.colors,
                feature.column(),
            );
        });
    }
}

// ---------------------------------------------------------------------------
// Geographic distribution
// ---------------------------------------------------------------------------

fn geographic_distribution(ui: &mut Ui, state: &AppState) {
    ui.heading(format!("Top {} locations per cluster", state.config.top_n));
    let rankings = match &state.rankings {
        Ok(rankings) => rankings,
        Err(e) => {
            warning(ui, e);
            return;
        }
    };
    if rankings.is_empty() {
        warning(ui, "No located records in the current selection.");
        return;
    }

    for ranking in rankings {
        let color = state.colors.color_for(&ranking.cluster);
        ui.label(
            RichText::new(format!("Cluster {}", ranking.cluster))
                .size(18.0)
                .strong()
                .color(color),
        );
        ui.columns(2, |cols| {
            plot::location_bars(
                &mut cols[0],
                &format!("locations_{}", ranking.cluster),
                ranking,
                color,
            );
            table::ranking_table(&mut cols[1], ranking);
        });
        ui.add_space(8.0);
    }
}

// ---------------------------------------------------------------------------
// Technical details
// ---------------------------------------------------------------------------

fn technical_details(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Methodology and technical details");
    ui.label("Cluster labels, principal components and per-minute rates were computed");
    ui.label("before this report and are read from the dataset as-is.");
    ui.add_space(8.0);

    let view = state.filtered_view();
    let (total, nothing_visible) = (view.len(), view.is_empty());
    let shown = state.config.preview_rows.min(total);
    ui.strong(format!("First {shown} of {total} records"));
    table::preview_table(ui, &view, state.config.preview_rows);
    ui.add_space(8.0);

    if ui
        .add_enabled(!nothing_visible, egui::Button::new("Download data"))
        .clicked()
    {
        panels::export_dialog(state);
    }
}
