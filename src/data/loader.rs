use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};

use super::model::{
    ClusterLabel, Feature, IncidentDataset, IncidentRecord, CLUSTER_COLUMN, LOCATION_COLUMN,
    PC1_COLUMN, PC2_COLUMN,
};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the incident dataset from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<IncidentDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening dataset {}", path.display()))?;
    load_csv(file).with_context(|| format!("parsing dataset {}", path.display()))
}

/// CSV layout: header row, then one row per attack session.
///
/// Required columns are the seven feature columns plus `cluster`.
/// `Location` and the `PC1`/`PC2` pair are picked up when present.
/// Any other column is kept verbatim for export.
pub fn load_csv<R: Read>(reader: R) -> Result<IncidentDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| {
        position(name).ok_or_else(|| DataError::MissingRequiredColumn(name.to_string()))
    };

    let mut feature_idx = [0usize; 7];
    for (slot, feature) in feature_idx.iter_mut().zip(Feature::ALL) {
        *slot = require(feature.column())?;
    }
    let cluster_idx = require(CLUSTER_COLUMN)?;
    let location_idx = position(LOCATION_COLUMN);
    let component_idx = position(PC1_COLUMN).zip(position(PC2_COLUMN));

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = row_no + 2;
        let record = result.with_context(|| format!("CSV line {line}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let mut features = [f64::NAN; 7];
        for (value, (&idx, feature)) in features
            .iter_mut()
            .zip(feature_idx.iter().zip(Feature::ALL))
        {
            *value = parse_number(cell(idx), line, feature.column())?;
        }

        let cluster = cell(cluster_idx).trim();
        if cluster.is_empty() {
            return Err(DataError::EmptyCluster { line }.into());
        }

        let location = location_idx
            .map(cell)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let components = match component_idx {
            Some((pc1, pc2)) => Some((
                parse_number(cell(pc1), line, PC1_COLUMN)?,
                parse_number(cell(pc2), line, PC2_COLUMN)?,
            )),
            None => None,
        };

        records.push(IncidentRecord {
            features,
            cluster: ClusterLabel::new(cluster),
            location,
            components,
            cells: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(IncidentDataset::from_records(
        headers,
        records,
        location_idx.is_some(),
        component_idx.is_some(),
    ))
}

/// Empty cells are missing values (NaN); anything else must parse.
fn parse_number(s: &str, line: usize, column: &str) -> Result<f64, DataError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| DataError::InvalidNumber {
        line,
        column: column.to_string(),
        value: s.to_string(),
    })
}

// ---------------------------------------------------------------------------
// One-time cache
// ---------------------------------------------------------------------------

/// Owns the dataset path and the dataset read from it.
///
/// The file is read on the first successful [`DatasetStore::get_or_load`];
/// later calls hand out the same shared dataset without touching disk.
#[derive(Debug)]
pub struct DatasetStore {
    path: PathBuf,
    cell: OnceLock<Arc<IncidentDataset>>,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_or_load(&self) -> Result<Arc<IncidentDataset>> {
        if let Some(dataset) = self.cell.get() {
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(load_file(&self.path)?);
        log::info!(
            "Loaded {} records in {} clusters from {}",
            dataset.len(),
            dataset.cluster_count(),
            self.path.display()
        );
        Ok(Arc::clone(self.cell.get_or_init(|| dataset)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::HEADER;
    use tempfile::TempDir;

    fn sample_csv() -> String {
        format!(
            "{HEADER}\n\
             8.0,391.09,1,2.96,7.0,Slovenia,72.37,48.88,0.875,0,1.2,-0.4\n\
             20.0,720.99,0,3.04,9.0,British Virgin Islands,69.08,36.05,0.45,1,-2.1,0.3\n\
             31.0,356.32,1,3.71,8.0,,70.58,11.49,0.258,0,1.0,0.1\n"
        )
    }

    #[test]
    fn test_load_csv_reads_all_columns() {
        let ds = load_csv(sample_csv().as_bytes()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.headers.len(), 12);
        assert!(ds.has_location);
        assert!(ds.has_components);
        assert_eq!(ds.cluster_count(), 2);

        let first = &ds.records[0];
        assert_eq!(first.feature(Feature::BytesTransferred), 391.09);
        assert_eq!(first.cluster.as_str(), "0");
        assert_eq!(first.location.as_deref(), Some("Slovenia"));
        assert_eq!(first.components, Some((1.2, -0.4)));
        assert_eq!(first.cells[2], "1");
    }

    #[test]
    fn test_empty_location_is_missing() {
        let ds = load_csv(sample_csv().as_bytes()).unwrap();
        assert_eq!(ds.records[2].location, None);
        assert_eq!(
            ds.records[1].location.as_deref(),
            Some("British Virgin Islands")
        );
    }

    #[test]
    fn test_optional_columns_absent() {
        let csv = "Session_Connection_Time,Bytes_Transferred,Servers_Corrupted,Pages_Corrupted,\
WPM_Typing_Speed,bytes_per_min,pages_per_min,cluster,PC1\n\
1,2,3,4,5,6,7,0,0.5\n";
        let ds = load_csv(csv.as_bytes()).unwrap();
        assert!(!ds.has_location);
        assert!(!ds.has_components);
        assert_eq!(ds.records[0].location, None);
        assert_eq!(ds.records[0].components, None);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let csv = "Session_Connection_Time,Bytes_Transferred,cluster\n1,2,0\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        match err.downcast_ref::<DataError>() {
            Some(DataError::MissingRequiredColumn(col)) => assert_eq!(col, "Servers_Corrupted"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_number_fails() {
        let csv = format!("{HEADER}\n8.0,lots,1,2.96,7.0,Chad,72.37,48.88,0.875,0,1.2,-0.4\n");
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::InvalidNumber { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_numeric_cell_is_nan() {
        let csv = format!("{HEADER}\n,391.09,1,2.96,7.0,Chad,72.37,48.88,0.875,0,1.2,-0.4\n");
        let ds = load_csv(csv.as_bytes()).unwrap();
        assert!(ds.records[0]
            .feature(Feature::SessionConnectionTime)
            .is_nan());
    }

    #[test]
    fn test_empty_cluster_fails() {
        let csv = format!("{HEADER}\n8.0,391.09,1,2.96,7.0,Chad,72.37,48.88,0.875,,1.2,-0.4\n");
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::EmptyCluster { line: 2 })
        ));
    }

    #[test]
    fn test_error_reports_file_line() {
        let csv = format!(
            "{HEADER}\n\
             8.0,391.09,1,2.96,7.0,Chad,72.37,48.88,0.875,0,1.2,-0.4\n\
             8.0,391.09,1,2.96,7.0,Chad,fast,48.88,0.875,0,1.2,-0.4\n"
        );
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 3, column 'WPM_Typing_Speed': 'fast' is not a number"
        );
    }

    #[test]
    fn test_cluster_labels_are_trimmed() {
        let csv = format!(
            "{HEADER}\n\
             8.0,391.09,1,2.96,7.0,Chad,72.37,48.88,0.875, 1,1.2,-0.4\n\
             8.0,391.09,1,2.96,7.0,Chad,72.37,48.88,0.875,1 ,1.2,-0.4\n"
        );
        let ds = load_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.cluster_count(), 1);
        assert_eq!(ds.records[0].cluster.as_str(), "1");
        assert_eq!(ds.records[1].cluster, ds.records[0].cluster);
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(load_file(&dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn test_store_reads_file_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, sample_csv()).unwrap();

        let store = DatasetStore::new(&path);
        let first = store.get_or_load().unwrap();

        std::fs::remove_file(&path).unwrap();
        let second = store.get_or_load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 3);
    }
}
