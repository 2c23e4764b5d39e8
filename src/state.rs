use std::path::Path;
use std::sync::Arc;

use crate::color::ClusterColors;
use crate::config::ReportConfig;
use crate::data::export::export_to_path;
use crate::data::filter::{init_selection, ClusterSelection, FilteredView};
use crate::data::model::{ClusterLabel, Feature, IncidentDataset};
use crate::error::DataError;
use crate::stats::ranking::{top_locations, ClusterRanking};
use crate::stats::summary::{summarize_by_cluster, ClusterSummary};

// ---------------------------------------------------------------------------
// Report views
// ---------------------------------------------------------------------------

/// The five fixed pages of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    ExecutiveSummary,
    DetailedAnalysis,
    ClusterProfiles,
    GeographicDistribution,
    TechnicalDetails,
}

impl ReportView {
    pub const ALL: [ReportView; 5] = [
        ReportView::ExecutiveSummary,
        ReportView::DetailedAnalysis,
        ReportView::ClusterProfiles,
        ReportView::GeographicDistribution,
        ReportView::TechnicalDetails,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ReportView::ExecutiveSummary => "Executive Summary",
            ReportView::DetailedAnalysis => "Detailed Analysis",
            ReportView::ClusterProfiles => "Cluster Profiles",
            ReportView::GeographicDistribution => "Geographic Distribution",
            ReportView::TechnicalDetails => "Technical Details",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ReportConfig,

    /// Base dataset, loaded once at start-up and never mutated.
    pub dataset: Arc<IncidentDataset>,

    /// Selected cluster labels (empty = show all).
    pub selection: ClusterSelection,

    /// Indices of records passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    pub view: ReportView,

    /// Metric picked in the detailed analysis view.
    pub metric: Feature,

    pub colors: ClusterColors,

    /// Mean / std table for the current selection.
    pub summary: ClusterSummary,

    /// Top locations per cluster, or why they are unavailable.
    pub rankings: Result<Vec<ClusterRanking>, DataError>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state around a loaded dataset with every cluster selected.
    pub fn new(config: ReportConfig, dataset: Arc<IncidentDataset>) -> Self {
        let selection = init_selection(&dataset);
        let colors = ClusterColors::new(&dataset.clusters);
        let mut state = Self {
            config,
            dataset,
            selection,
            visible_indices: Vec::new(),
            view: ReportView::ExecutiveSummary,
            metric: Feature::ALL[0],
            colors,
            summary: ClusterSummary::default(),
            rankings: Ok(Vec::new()),
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Records passing the current selection.
    pub fn filtered_view(&self) -> FilteredView<'_> {
        FilteredView::from_indices(&self.dataset, self.visible_indices.clone())
    }

    /// Recompute the visible rows and every derived table after a
    /// selection change.
    pub fn refilter(&mut self) {
        let view = FilteredView::new(&self.dataset, &self.selection);
        log::debug!(
            "Selection {:?} keeps {} of {} records",
            self.selection,
            view.len(),
            self.dataset.len()
        );

        self.summary = summarize_by_cluster(&view, &Feature::ALL);
        self.rankings = top_locations(&view, self.config.top_n);
        if let Err(e) = &self.rankings {
            log::warn!("Location ranking unavailable: {e}");
        }
        self.visible_indices = view.indices().to_vec();
    }

    /// Toggle a single cluster in the selection.
    pub fn toggle_cluster(&mut self, cluster: &ClusterLabel) {
        if !self.selection.remove(cluster) {
            self.selection.insert(cluster.clone());
        }
        self.refilter();
    }

    pub fn select_all(&mut self) {
        self.selection = init_selection(&self.dataset);
        self.refilter();
    }

    /// Clearing the selection shows every record again.
    pub fn select_none(&mut self) {
        self.selection.clear();
        self.refilter();
    }

    /// Write the visible records to `path`. The outcome goes to the log and
    /// the status line; the row count is returned on success.
    pub fn export_visible(&mut self, path: &Path) -> Option<usize> {
        match export_to_path(&self.filtered_view(), path) {
            Ok(rows) => {
                log::info!(
                    "Exported {rows} records as {} to {}",
                    self.config.export_mime,
                    path.display()
                );
                self.status_message = Some(format!("Exported {rows} rows to {}", path.display()));
                Some(rows)
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Export failed: {e:#}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{balanced_dataset, dataset, row};
    use crate::data::loader::load_file;
    use tempfile::TempDir;

    fn state(ds: IncidentDataset) -> AppState {
        AppState::new(ReportConfig::default(), Arc::new(ds))
    }

    #[test]
    fn starts_with_everything_selected() {
        let st = state(balanced_dataset(167));
        assert_eq!(st.selection.len(), 2);
        assert_eq!(st.visible_indices.len(), 334);
        assert_eq!(st.summary.profiles.len(), 2);
        assert_eq!(st.view, ReportView::ExecutiveSummary);
    }

    #[test]
    fn toggling_and_clearing_selection() {
        let mut st = state(balanced_dataset(167));

        st.toggle_cluster(&ClusterLabel::from("0"));
        assert_eq!(st.visible_indices.len(), 167);
        assert_eq!(st.summary.profiles.len(), 1);
        assert_eq!(st.summary.profiles[0].cluster.as_str(), "1");

        st.toggle_cluster(&ClusterLabel::from("1"));
        assert!(st.selection.is_empty());
        assert_eq!(st.visible_indices.len(), 334);

        st.toggle_cluster(&ClusterLabel::from("1"));
        assert_eq!(st.visible_indices.len(), 167);

        st.select_all();
        assert_eq!(st.visible_indices.len(), 334);

        st.select_none();
        assert_eq!(st.visible_indices.len(), 334);
    }

    #[test]
    fn rankings_follow_selection() {
        let mut st = state(dataset(&[
            row("0", "Chad", 1.0),
            row("1", "Peru", 1.0),
        ]));
        assert_eq!(st.rankings.as_ref().unwrap().len(), 2);

        st.toggle_cluster(&ClusterLabel::from("0"));
        let rankings = st.rankings.as_ref().unwrap();
        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].locations[0].location, "Peru");
    }

    #[test]
    fn export_visible_writes_selection() {
        let mut st = state(balanced_dataset(4));
        st.toggle_cluster(&ClusterLabel::from("1"));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("analysis.csv");
        assert_eq!(st.export_visible(&path), Some(4));
        assert!(st.status_message.as_deref().unwrap().starts_with("Exported 4 rows"));

        let reloaded = load_file(&path).unwrap();
        assert_eq!(reloaded.len(), 4);
        assert!(reloaded.records.iter().all(|r| r.cluster.as_str() == "0"));
    }

    #[test]
    fn failed_export_is_reported_in_status_line() {
        let mut st = state(balanced_dataset(2));
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("analysis.csv");

        assert_eq!(st.export_visible(&path), None);
        assert!(st.status_message.as_deref().unwrap().starts_with("Export failed"));
        assert!(!path.exists());
    }

    #[test]
    fn view_titles_are_distinct() {
        let titles: std::collections::BTreeSet<&str> =
            ReportView::ALL.iter().map(|v| v.title()).collect();
        assert_eq!(titles.len(), 5);
    }
}
