use std::path::PathBuf;

use crate::stats::ranking::DEFAULT_TOP_N;

/// Environment variable that overrides the dataset location.
pub const DATA_PATH_ENV: &str = "CLUSTER_REPORT_DATA";

pub const DEFAULT_DATA_PATH: &str = "data/hack_data_clustered.csv";
pub const EXPORT_FILE_NAME: &str = "analysis.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// Report settings. There are no command-line flags; everything has a
/// fixed default and only the dataset path can be overridden.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub data_path: PathBuf,
    pub export_file_name: String,
    pub export_mime: String,
    /// Locations listed per cluster in the geographic view.
    pub top_n: usize,
    /// Rows shown in the technical details preview.
    pub preview_rows: usize,
    pub histogram_bins: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            export_mime: EXPORT_MIME.to_string(),
            top_n: DEFAULT_TOP_N,
            preview_rows: 20,
            histogram_bins: 20,
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(DATA_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}
