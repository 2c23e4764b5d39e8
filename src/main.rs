mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod stats;
mod ui;

use anyhow::{Context, Result};
use app::ForensicReportApp;
use config::ReportConfig;
use data::loader::DatasetStore;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = ReportConfig::from_env();
    let store = DatasetStore::new(&config.data_path);

    // No recovery: the report cannot start without its dataset.
    let dataset = match store.get_or_load() {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", store.path().display());
            return Err(e).context("loading report dataset");
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Forensic Clustering Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(ForensicReportApp::new(config, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running report window: {e}"))
}
