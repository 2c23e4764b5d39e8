use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const CLUSTER_COLUMN: &str = "cluster";
pub const LOCATION_COLUMN: &str = "Location";
pub const PC1_COLUMN: &str = "PC1";
pub const PC2_COLUMN: &str = "PC2";

// ---------------------------------------------------------------------------
// Feature – the seven numeric behaviour columns
// ---------------------------------------------------------------------------

/// Numeric behavioural feature of an attack session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    SessionConnectionTime,
    BytesTransferred,
    ServersCorrupted,
    PagesCorrupted,
    WpmTypingSpeed,
    BytesPerMin,
    PagesPerMin,
}

impl Feature {
    /// All features in report order.
    pub const ALL: [Feature; 7] = [
        Feature::SessionConnectionTime,
        Feature::BytesTransferred,
        Feature::ServersCorrupted,
        Feature::PagesCorrupted,
        Feature::WpmTypingSpeed,
        Feature::BytesPerMin,
        Feature::PagesPerMin,
    ];

    /// Column name in the CSV header.
    pub fn column(self) -> &'static str {
        match self {
            Feature::SessionConnectionTime => "Session_Connection_Time",
            Feature::BytesTransferred => "Bytes_Transferred",
            Feature::ServersCorrupted => "Servers_Corrupted",
            Feature::PagesCorrupted => "Pages_Corrupted",
            Feature::WpmTypingSpeed => "WPM_Typing_Speed",
            Feature::BytesPerMin => "bytes_per_min",
            Feature::PagesPerMin => "pages_per_min",
        }
    }

    /// Human readable label: underscores become spaces, words are title-cased.
    pub fn label(self) -> String {
        self.column()
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

// ---------------------------------------------------------------------------
// ClusterLabel – categorical cluster assignment
// ---------------------------------------------------------------------------

/// Cluster assignment as read from the `cluster` column.
///
/// Integer labels order numerically so that `"2" < "10"`; anything else
/// falls back to text order (integers sort first).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterLabel(String);

impl ClusterLabel {
    pub fn new(label: impl Into<String>) -> Self {
        ClusterLabel(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn as_integer(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }
}

impl PartialOrd for ClusterLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClusterLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_integer(), other.as_integer()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClusterLabel {
    fn from(s: &str) -> Self {
        ClusterLabel::new(s)
    }
}

// ---------------------------------------------------------------------------
// IncidentRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single attack session (one row of the source file).
#[derive(Debug, Clone)]
pub struct IncidentRecord {
    /// Feature values indexed by [`Feature`]; NaN marks an empty cell.
    pub features: [f64; 7],
    pub cluster: ClusterLabel,
    /// Country name, `None` when the column is absent or the cell is empty.
    pub location: Option<String>,
    /// First two principal components, present only when both columns exist.
    pub components: Option<(f64, f64)>,
    /// Every cell of the row exactly as read, in header order.
    pub cells: Vec<String>,
}

impl IncidentRecord {
    pub fn feature(&self, feature: Feature) -> f64 {
        self.features[feature.index()]
    }
}

// ---------------------------------------------------------------------------
// IncidentDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct IncidentDataset {
    /// Header row in file order.
    pub headers: Vec<String>,
    /// All records (rows) in file order.
    pub records: Vec<IncidentRecord>,
    /// Sorted set of distinct cluster labels.
    pub clusters: BTreeSet<ClusterLabel>,
    pub has_location: bool,
    pub has_components: bool,
}

impl IncidentDataset {
    /// Build the cluster index from parsed records.
    pub fn from_records(
        headers: Vec<String>,
        records: Vec<IncidentRecord>,
        has_location: bool,
        has_components: bool,
    ) -> Self {
        let clusters = records.iter().map(|r| r.cluster.clone()).collect();
        IncidentDataset {
            headers,
            records,
            clusters,
            has_location,
            has_components,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of distinct cluster labels.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_labels_are_title_cased() {
        assert_eq!(Feature::BytesPerMin.label(), "Bytes Per Min");
        assert_eq!(Feature::WpmTypingSpeed.label(), "Wpm Typing Speed");
        assert_eq!(
            Feature::SessionConnectionTime.label(),
            "Session Connection Time"
        );
    }

    #[test]
    fn integer_cluster_labels_sort_numerically() {
        let mut labels: Vec<ClusterLabel> = ["10", "2", "b", "0", "a"]
            .into_iter()
            .map(ClusterLabel::from)
            .collect();
        labels.sort();
        let sorted: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
        assert_eq!(sorted, vec!["0", "2", "10", "a", "b"]);
    }
}
