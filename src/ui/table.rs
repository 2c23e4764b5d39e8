use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;
use crate::stats::ranking::ClusterRanking;
use crate::stats::summary::{ClusterSummary, Statistic};

const ROW_HEIGHT: f32 = 20.0;

fn fmt_stat(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Mean / std table: one row per cluster, two columns per feature.
pub fn summary_table(ui: &mut Ui, summary: &ClusterSummary) {
    let stat_columns = summary.features.len() * Statistic::ALL.len();

    ui.push_id("cluster_summary", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .cell_layout(Layout::left_to_right(Align::Center))
                .column(Column::auto().at_least(60.0))
                .columns(Column::auto().at_least(90.0), stat_columns)
                .header(ROW_HEIGHT * 2.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("cluster");
                    });
                    for feature in &summary.features {
                        for stat in Statistic::ALL {
                            header.col(|ui| {
                                ui.vertical(|ui| {
                                    ui.strong(feature.column());
                                    ui.label(stat.name());
                                });
                            });
                        }
                    }
                })
                .body(|mut body| {
                    for profile in &summary.profiles {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.label(profile.cluster.to_string());
                            });
                            for &feature in &summary.features {
                                for stat in Statistic::ALL {
                                    let value = summary.value(&profile.cluster, feature, stat);
                                    row.col(|ui| {
                                        ui.label(fmt_stat(value));
                                    });
                                }
                            }
                        });
                    }
                });
        });
    });
}

/// First `limit` rows of the view with every loaded column.
pub fn preview_table(ui: &mut Ui, view: &FilteredView<'_>, limit: usize) {
    let headers = &view.dataset().headers;
    let rows: Vec<&[String]> = view
        .records()
        .take(limit)
        .map(|r| r.cells.as_slice())
        .collect();

    ui.push_id("data_preview", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(70.0), headers.len())
                .header(ROW_HEIGHT, |mut header| {
                    for name in headers {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let cells = rows[row.index()];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
    });
}

/// Rank, location and count for one cluster.
pub fn ranking_table(ui: &mut Ui, ranking: &ClusterRanking) {
    ui.push_id(("ranking", ranking.cluster.as_str()), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::exact(40.0))
            .column(Column::auto().at_least(160.0))
            .column(Column::auto())
            .header(ROW_HEIGHT, |mut header| {
                for title in ["#", "Location", "Attacks"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (rank, lc) in ranking.locations.iter().enumerate() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label((rank + 1).to_string());
                        });
                        row.col(|ui| {
                            ui.label(&lc.location);
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(lc.count.to_string()).strong());
                        });
                    });
                }
            });
    });
}
