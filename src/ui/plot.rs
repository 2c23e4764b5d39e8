use std::collections::BTreeMap;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ClusterColors;
use crate::data::model::ClusterLabel;
use crate::stats::distribution::{histogram, shared_range, BoxStats, LinearFit};
use crate::stats::ranking::ClusterRanking;

const PLOT_HEIGHT: f32 = 320.0;

fn base_plot(id: &str, x_label: &str, y_label: &str) -> Plot<'static> {
    Plot::new(id.to_owned())
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(x_label.to_owned())
        .y_axis_label(y_label.to_owned())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Scatter of per-cluster points, optionally with an OLS trendline each.
pub fn cluster_scatter(
    ui: &mut Ui,
    id: &str,
    groups: &BTreeMap<ClusterLabel, Vec<[f64; 2]>>,
    colors: &ClusterColors,
    axes: (&str, &str),
    trendline: bool,
) {
    base_plot(id, axes.0, axes.1).show(ui, |plot_ui| {
        for (cluster, points) in groups {
            let color = colors.color_for(cluster);
            let name = format!("Cluster {cluster}");

            let series: PlotPoints = points.iter().copied().collect();
            plot_ui.points(Points::new(series).name(&name).color(color).radius(2.5));

            if !trendline {
                continue;
            }
            let Some(fit) = LinearFit::fit(points) else {
                continue;
            };
            let (lo, hi) = points
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                    (lo.min(p[0]), hi.max(p[0]))
                });
            let line: PlotPoints = vec![[lo, fit.predict(lo)], [hi, fit.predict(hi)]].into();
            plot_ui.line(
                Line::new(line)
                    .name(format!("{name} OLS (R² = {:.3})", fit.r_squared))
                    .color(color)
                    .width(2.0),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// One box per cluster, placed at x = 0, 1, 2, … in label order.
pub fn cluster_box_plot(
    ui: &mut Ui,
    id: &str,
    groups: &BTreeMap<ClusterLabel, Vec<f64>>,
    colors: &ClusterColors,
    y_label: &str,
) {
    base_plot(id, "cluster", y_label).show(ui, |plot_ui| {
        for (position, (cluster, values)) in groups.iter().enumerate() {
            let Some(stats) = BoxStats::from_values(values) else {
                continue;
            };
            let color = colors.color_for(cluster);
            let name = format!("Cluster {cluster}");
            let spread = BoxSpread::new(
                stats.lower_whisker,
                stats.q1,
                stats.median,
                stats.q3,
                stats.upper_whisker,
            );
            let elem = BoxElem::new(position as f64, spread)
                .name(&name)
                .box_width(0.5)
                .whisker_width(0.3)
                .fill(color.gamma_multiply(0.4))
                .stroke(Stroke::new(1.5, color));
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&name).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Overlaid per-cluster histograms over a shared bin range.
pub fn cluster_histogram(
    ui: &mut Ui,
    id: &str,
    groups: &BTreeMap<ClusterLabel, Vec<f64>>,
    colors: &ClusterColors,
    bins: usize,
    x_label: &str,
) {
    let Some(range) = shared_range(groups.values()) else {
        ui.label("No values to plot.");
        return;
    };

    base_plot(id, x_label, "count").show(ui, |plot_ui| {
        for (cluster, values) in groups {
            let hist = histogram(values, range, bins);
            let bars: Vec<Bar> = hist
                .counts
                .iter()
                .enumerate()
                .map(|(i, &count)| Bar::new(hist.bin_center(i), count as f64).width(hist.bin_width))
                .collect();
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(format!("Cluster {cluster}"))
                    .color(colors.color_for(cluster).gamma_multiply(0.7)),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Location ranking
// ---------------------------------------------------------------------------

/// Horizontal bars, highest count on top.
pub fn location_bars(ui: &mut Ui, id: &str, ranking: &ClusterRanking, color: Color32) {
    let n = ranking.locations.len();
    let bars: Vec<Bar> = ranking
        .locations
        .iter()
        .enumerate()
        .map(|(i, lc)| {
            Bar::new((n - i) as f64, lc.count as f64)
                .name(&lc.location)
                .width(0.7)
        })
        .collect();

    base_plot(id, "attacks", "rank").show(ui, |plot_ui| {
        plot_ui.bar_chart(
            BarChart::new(bars)
                .horizontal()
                .name(format!("Cluster {}", ranking.cluster))
                .color(color),
        );
    });
}
