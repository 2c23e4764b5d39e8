use std::collections::BTreeSet;

use super::model::{ClusterLabel, IncidentDataset, IncidentRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which cluster labels are selected
// ---------------------------------------------------------------------------

/// Set of selected cluster labels.
/// An empty set means "no filter" (show all).
pub type ClusterSelection = BTreeSet<ClusterLabel>;

/// Initialise a [`ClusterSelection`] with every cluster selected.
pub fn init_selection(dataset: &IncidentDataset) -> ClusterSelection {
    dataset.clusters.clone()
}

/// Return indices of records that pass the cluster selection, in file order.
///
/// An empty selection lets every record through.
pub fn filtered_indices(dataset: &IncidentDataset, selection: &ClusterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.is_empty() || selection.contains(&rec.cluster))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – borrowed subset of the base dataset
// ---------------------------------------------------------------------------

/// Records of the base dataset that pass a selection. Never mutates the base.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a IncidentDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a IncidentDataset, selection: &ClusterSelection) -> Self {
        Self {
            dataset,
            indices: filtered_indices(dataset, selection),
        }
    }

    /// View over precomputed indices (e.g. cached in the UI state).
    pub fn from_indices(dataset: &'a IncidentDataset, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    /// View over every record.
    #[cfg(test)]
    pub fn all(dataset: &'a IncidentDataset) -> Self {
        Self::new(dataset, &ClusterSelection::new())
    }

    pub fn dataset(&self) -> &'a IncidentDataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a IncidentRecord> + '_ {
        let records = &self.dataset.records;
        self.indices.iter().map(move |&i| &records[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{balanced_dataset, dataset, row};

    fn selection(labels: &[&str]) -> ClusterSelection {
        labels.iter().map(|l| ClusterLabel::from(*l)).collect()
    }

    #[test]
    fn empty_selection_returns_everything() {
        let ds = balanced_dataset(167);
        let view = FilteredView::new(&ds, &ClusterSelection::new());
        assert_eq!(view.len(), 334);
        assert_eq!(view.indices(), (0..334).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn single_cluster_selection() {
        let ds = balanced_dataset(167);
        let view = FilteredView::new(&ds, &selection(&["1"]));
        assert_eq!(view.len(), 167);
        assert!(view.records().all(|r| r.cluster.as_str() == "1"));
    }

    #[test]
    fn all_selected_matches_unfiltered() {
        let ds = balanced_dataset(5);
        let all = init_selection(&ds);
        assert_eq!(all.len(), 2);
        assert_eq!(filtered_indices(&ds, &all), filtered_indices(&ds, &ClusterSelection::new()));
    }

    #[test]
    fn preserves_file_order() {
        let ds = dataset(&[
            row("1", "Chad", 1.0),
            row("0", "Chad", 2.0),
            row("1", "Chad", 3.0),
            row("2", "Chad", 4.0),
            row("1", "Chad", 5.0),
        ]);
        assert_eq!(filtered_indices(&ds, &selection(&["1", "2"])), vec![0, 2, 3, 4]);
    }

    #[test]
    fn unknown_label_selects_nothing() {
        let ds = balanced_dataset(3);
        assert!(FilteredView::new(&ds, &selection(&["7"])).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = balanced_dataset(10);
        let sel = selection(&["0"]);
        let first = filtered_indices(&ds, &sel);
        let second = filtered_indices(&ds, &sel);
        assert_eq!(first, second);
        assert_eq!(ds.len(), 20);
    }
}
