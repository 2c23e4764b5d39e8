use std::collections::BTreeMap;

use crate::data::filter::FilteredView;
use crate::data::model::{ClusterLabel, Feature, PC1_COLUMN, PC2_COLUMN};
use crate::error::DataError;

use super::group_by_cluster;

// ---------------------------------------------------------------------------
// Per-cluster extraction
// ---------------------------------------------------------------------------

/// Non-NaN values of `feature` for each cluster in the view.
pub fn values_by_cluster(
    view: &FilteredView<'_>,
    feature: Feature,
) -> BTreeMap<ClusterLabel, Vec<f64>> {
    group_by_cluster(view, |r| {
        let v = r.feature(feature);
        (!v.is_nan()).then_some(v)
    })
}

/// `(x, y)` feature pairs for each cluster; rows with a NaN in either are dropped.
pub fn points_by_cluster(
    view: &FilteredView<'_>,
    x: Feature,
    y: Feature,
) -> BTreeMap<ClusterLabel, Vec<[f64; 2]>> {
    group_by_cluster(view, |r| {
        let point = [r.feature(x), r.feature(y)];
        point.iter().all(|v| !v.is_nan()).then_some(point)
    })
}

/// `(PC1, PC2)` coordinates for each cluster.
pub fn component_points(
    view: &FilteredView<'_>,
) -> Result<BTreeMap<ClusterLabel, Vec<[f64; 2]>>, DataError> {
    let dataset = view.dataset();
    if !dataset.has_components {
        let missing = if dataset.headers.iter().any(|h| h == PC1_COLUMN) {
            PC2_COLUMN
        } else {
            PC1_COLUMN
        };
        return Err(DataError::MissingOptionalColumn(missing));
    }
    Ok(group_by_cluster(view, |r| {
        let (pc1, pc2) = r.components?;
        (!pc1.is_nan() && !pc2.is_nan()).then_some([pc1, pc2])
    }))
}

// ---------------------------------------------------------------------------
// Box statistics
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest observation within 1.5 IQR below Q1.
    pub lower_whisker: f64,
    /// Largest observation within 1.5 IQR above Q3.
    pub upper_whisker: f64,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(sorted[0]);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(sorted[sorted.len() - 1]);

        Some(BoxStats {
            min: sorted[0],
            q1,
            median: quantile(&sorted, 0.5),
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
        })
    }
}

/// Quantile of sorted data using linear interpolation (NumPy default).
pub fn quantile(sorted_values: &[f64], q: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bins starting at `start`. The last bin includes its upper edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Center of bin `i`.
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }
}

/// Range spanning every group, so overlaid histograms share bin edges.
/// A degenerate range is widened by 0.5 on each side.
pub fn shared_range<'a>(groups: impl IntoIterator<Item = &'a Vec<f64>>) -> Option<(f64, f64)> {
    let (lo, hi) = groups
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return None;
    }
    if lo == hi {
        return Some((lo - 0.5, hi + 0.5));
    }
    Some((lo, hi))
}

/// Bin `values` into `bins` equal-width bins over `range`. Values outside the
/// range are ignored.
pub fn histogram(values: &[f64], range: (f64, f64), bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (start, end) = range;
    let bin_width = (end - start) / bins as f64;
    let mut counts = vec![0usize; bins];

    for &v in values {
        if !(start..=end).contains(&v) {
            continue;
        }
        let idx = (((v - start) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Histogram {
        start,
        bin_width,
        counts,
    }
}

// ---------------------------------------------------------------------------
// Ordinary least squares trendline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    /// Fit `y = slope * x + intercept`. Needs two points and some x spread.
    pub fn fit(points: &[[f64; 2]]) -> Option<Self> {
        let n = points.len();
        if n < 2 {
            return None;
        }
        let nf = n as f64;
        let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / nf;
        let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / nf;

        let sxx: f64 = points.iter().map(|p| (p[0] - mean_x).powi(2)).sum();
        if sxx == 0.0 {
            return None;
        }
        let sxy: f64 = points
            .iter()
            .map(|p| (p[0] - mean_x) * (p[1] - mean_y))
            .sum();
        let syy: f64 = points.iter().map(|p| (p[1] - mean_y).powi(2)).sum();

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let r_squared = if syy == 0.0 {
            1.0
        } else {
            (sxy * sxy) / (sxx * syy)
        };

        Some(LinearFit {
            slope,
            intercept,
            r_squared,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{dataset, row};
    use crate::data::loader::load_csv;

    #[test]
    fn values_grouped_by_cluster_in_row_order() {
        let ds = dataset(&[
            row("1", "Chad", 5.0),
            row("0", "Chad", 1.0),
            row("1", "Chad", 7.0),
        ]);
        let groups = values_by_cluster(&FilteredView::all(&ds), Feature::WpmTypingSpeed);
        assert_eq!(groups[&ClusterLabel::from("0")], vec![1.0]);
        assert_eq!(groups[&ClusterLabel::from("1")], vec![5.0, 7.0]);
    }

    #[test]
    fn component_points_need_both_columns() {
        let csv = "Session_Connection_Time,Bytes_Transferred,Servers_Corrupted,Pages_Corrupted,\
WPM_Typing_Speed,bytes_per_min,pages_per_min,cluster,PC1\n1,2,3,4,5,6,7,0,0.5\n";
        let ds = load_csv(csv.as_bytes()).unwrap();
        let err = component_points(&FilteredView::all(&ds)).unwrap_err();
        assert!(matches!(err, DataError::MissingOptionalColumn("PC2")));

        let ds = dataset(&[row("0", "Chad", 2.0)]);
        let points = component_points(&FilteredView::all(&ds)).unwrap();
        assert_eq!(points[&ClusterLabel::from("0")], vec![[2.0, -2.0]]);
    }

    #[test]
    fn box_stats_with_outlier() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 4.0);
        assert_eq!(stats.max, 100.0);
        assert!(BoxStats::from_values(&[]).is_none());
    }

    #[test]
    fn quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn histogram_closes_last_bin() {
        let values = [0.0, 1.0, 2.5, 3.0, 10.0];
        let hist = histogram(&values, (0.0, 10.0), 4);
        assert_eq!(hist.bin_width, 2.5);
        assert_eq!(hist.counts, vec![2, 2, 0, 1]);
        assert_eq!(hist.bin_center(0), 1.25);
    }

    #[test]
    fn shared_range_spans_groups() {
        let a = vec![1.0, 3.0];
        let b = vec![-2.0, f64::NAN];
        assert_eq!(shared_range([&a, &b]), Some((-2.0, 3.0)));
        let same = vec![4.0, 4.0];
        assert_eq!(shared_range([&same]), Some((3.5, 4.5)));
        let empty: Vec<f64> = Vec::new();
        assert_eq!(shared_range([&empty]), None);
    }

    #[test]
    fn linear_fit_on_exact_line() {
        let points = [[0.0, 1.0], [1.0, 3.0], [2.0, 5.0]];
        let fit = LinearFit::fit(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-12);

        assert!(LinearFit::fit(&[[1.0, 1.0], [1.0, 2.0]]).is_none());
        assert!(LinearFit::fit(&[[1.0, 1.0]]).is_none());
    }
}
