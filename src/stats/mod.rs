//! Aggregates derived from a [`FilteredView`](crate::data::filter::FilteredView).
//!
//! Every function here is a pure pass over the view; nothing is cached.

pub mod distribution;
pub mod ranking;
pub mod summary;

use std::collections::BTreeMap;

use crate::data::filter::FilteredView;
use crate::data::model::{ClusterLabel, IncidentRecord};

/// Group per-record values by cluster label, keeping row order inside each
/// group. Records for which `extract` yields `None` are skipped.
pub fn group_by_cluster<T>(
    view: &FilteredView<'_>,
    mut extract: impl FnMut(&IncidentRecord) -> Option<T>,
) -> BTreeMap<ClusterLabel, Vec<T>> {
    let mut groups: BTreeMap<ClusterLabel, Vec<T>> = BTreeMap::new();
    for record in view.records() {
        let entry = groups.entry(record.cluster.clone()).or_default();
        if let Some(value) = extract(record) {
            entry.push(value);
        }
    }
    groups
}
