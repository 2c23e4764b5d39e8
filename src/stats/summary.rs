use crate::data::filter::FilteredView;
use crate::data::model::{ClusterLabel, Feature};

use super::group_by_cluster;

/// Which statistic of a summary cell to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Std,
}

impl Statistic {
    pub const ALL: [Statistic; 2] = [Statistic::Mean, Statistic::Std];

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Std => "std",
        }
    }
}

/// Mean and sample standard deviation of one feature within one cluster,
/// both rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStats {
    pub count: usize,
    /// `None` when the group has no values.
    pub mean: Option<f64>,
    /// `None` when the group has fewer than two values.
    pub std: Option<f64>,
}

impl FeatureStats {
    /// Skips NaN entries.
    pub fn from_values(values: &[f64]) -> Self {
        let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = valid.len();
        if n == 0 {
            return FeatureStats {
                count: 0,
                mean: None,
                std: None,
            };
        }

        let mean = valid.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let variance = valid.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            Some(round2(variance.sqrt()))
        } else {
            None
        };

        FeatureStats {
            count: n,
            mean: Some(round2(mean)),
            std,
        }
    }

    pub fn get(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Mean => self.mean,
            Statistic::Std => self.std,
        }
    }
}

/// Per-feature statistics of one cluster, in requested feature order.
#[derive(Debug, Clone)]
pub struct ClusterProfile {
    pub cluster: ClusterLabel,
    pub stats: Vec<(Feature, FeatureStats)>,
}

/// Table indexed by (cluster, feature, statistic).
#[derive(Debug, Clone, Default)]
pub struct ClusterSummary {
    pub features: Vec<Feature>,
    /// One profile per cluster present in the view, ordered by label.
    pub profiles: Vec<ClusterProfile>,
}

impl ClusterSummary {
    pub fn stats(&self, cluster: &ClusterLabel, feature: Feature) -> Option<&FeatureStats> {
        self.profiles
            .iter()
            .find(|p| &p.cluster == cluster)?
            .stats
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, s)| s)
    }

    pub fn value(
        &self,
        cluster: &ClusterLabel,
        feature: Feature,
        statistic: Statistic,
    ) -> Option<f64> {
        self.stats(cluster, feature)?.get(statistic)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Group the view by cluster and compute mean / sample std for each feature.
pub fn summarize_by_cluster(view: &FilteredView<'_>, features: &[Feature]) -> ClusterSummary {
    let groups = group_by_cluster(view, |r| Some(r.features));

    let profiles = groups
        .into_iter()
        .map(|(cluster, rows)| {
            let stats = features
                .iter()
                .map(|&feature| {
                    let values: Vec<f64> = rows
                        .iter()
                        .map(|row| row[feature as usize])
                        .collect();
                    (feature, FeatureStats::from_values(&values))
                })
                .collect();
            ClusterProfile { cluster, stats }
        })
        .collect();

    ClusterSummary {
        features: features.to_vec(),
        profiles,
    }
}

/// Round to 2 decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
