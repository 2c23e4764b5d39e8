use std::collections::BTreeMap;

use crate::data::filter::FilteredView;
use crate::data::model::{ClusterLabel, LOCATION_COLUMN};
use crate::error::DataError;

/// Default length of a per-cluster location ranking.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

/// Most frequent locations of one cluster, highest count first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRanking {
    pub cluster: ClusterLabel,
    pub locations: Vec<LocationCount>,
}

/// Count records per (location, cluster) and keep the `n` most frequent
/// locations of each cluster.
///
/// Records without a location are not counted. Pairs are grouped in sorted
/// (location, cluster) order and ranked with a stable sort, so equal counts
/// come out alphabetically by location.
pub fn top_locations(view: &FilteredView<'_>, n: usize) -> Result<Vec<ClusterRanking>, DataError> {
    if !view.dataset().has_location {
        return Err(DataError::MissingOptionalColumn(LOCATION_COLUMN));
    }

    let mut counts: BTreeMap<(&str, &ClusterLabel), usize> = BTreeMap::new();
    for record in view.records() {
        if let Some(location) = record.location.as_deref() {
            *counts.entry((location, &record.cluster)).or_insert(0) += 1;
        }
    }

    let mut per_cluster: BTreeMap<&ClusterLabel, Vec<LocationCount>> = BTreeMap::new();
    for ((location, cluster), count) in counts {
        per_cluster.entry(cluster).or_default().push(LocationCount {
            location: location.to_string(),
            count,
        });
    }

    Ok(per_cluster
        .into_iter()
        .map(|(cluster, mut locations)| {
            locations.sort_by(|a, b| b.count.cmp(&a.count));
            locations.truncate(n);
            ClusterRanking {
                cluster: cluster.clone(),
                locations,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{dataset, row};
    use crate::data::loader::load_csv;

    #[test]
    fn keeps_ten_highest_counts() {
        // Location "L00" appears 11 times, "L10" once.
        let mut lines = Vec::new();
        for i in 0..11 {
            for _ in 0..(11 - i) {
                lines.push(row("0", &format!("L{i:02}"), 1.0));
            }
        }
        let ds = dataset(&lines);
        let view = FilteredView::all(&ds);

        let rankings = top_locations(&view, DEFAULT_TOP_N).unwrap();
        assert_eq!(rankings.len(), 1);
        let top = &rankings[0].locations;
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], LocationCount { location: "L00".into(), count: 11 });
        assert_eq!(top[9].count, 2);
        assert!(top.iter().all(|lc| lc.location != "L10"));
    }

    #[test]
    fn null_locations_are_not_counted() {
        let ds = dataset(&[
            row("0", "", 1.0),
            row("0", "", 1.0),
            row("0", "Chad", 1.0),
        ]);
        let rankings = top_locations(&FilteredView::all(&ds), 10).unwrap();
        assert_eq!(
            rankings[0].locations,
            vec![LocationCount { location: "Chad".into(), count: 1 }]
        );
    }

    #[test]
    fn ranks_each_cluster_separately_with_alphabetical_ties() {
        let ds = dataset(&[
            row("1", "Peru", 1.0),
            row("0", "Mali", 1.0),
            row("1", "Chad", 1.0),
            row("1", "Peru", 1.0),
            row("0", "Chad", 1.0),
            row("1", "Benin", 1.0),
        ]);
        let rankings = top_locations(&FilteredView::all(&ds), 10).unwrap();

        assert_eq!(rankings[0].cluster.as_str(), "0");
        let zero: Vec<&str> = rankings[0].locations.iter().map(|l| l.location.as_str()).collect();
        assert_eq!(zero, vec!["Chad", "Mali"]);

        assert_eq!(rankings[1].cluster.as_str(), "1");
        let one: Vec<&str> = rankings[1].locations.iter().map(|l| l.location.as_str()).collect();
        assert_eq!(one, vec!["Peru", "Benin", "Chad"]);
    }

    #[test]
    fn missing_location_column_is_reported() {
        let csv = "Session_Connection_Time,Bytes_Transferred,Servers_Corrupted,Pages_Corrupted,\
WPM_Typing_Speed,bytes_per_min,pages_per_min,cluster\n1,2,3,4,5,6,7,0\n";
        let ds = load_csv(csv.as_bytes()).unwrap();
        let err = top_locations(&FilteredView::all(&ds), 10).unwrap_err();
        assert!(matches!(err, DataError::MissingOptionalColumn("Location")));
    }
}
