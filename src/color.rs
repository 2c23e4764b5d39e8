use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::ClusterLabel;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Report colours for the first two clusters (blue, red).
const BASE_COLORS: [Color32; 2] = [
    Color32::from_rgb(0x3b, 0x82, 0xf6),
    Color32::from_rgb(0xef, 0x44, 0x44),
];

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Blue and red for up to two clusters, evenly spaced hues beyond that.
pub fn cluster_palette(n: usize) -> Vec<Color32> {
    if n <= BASE_COLORS.len() {
        BASE_COLORS[..n].to_vec()
    } else {
        generate_palette(n)
    }
}

// ---------------------------------------------------------------------------
// Color mapping: cluster label → Color32
// ---------------------------------------------------------------------------

/// Maps every cluster label of the dataset to a fixed colour, so a cluster
/// keeps its colour when others are filtered out.
#[derive(Debug, Clone)]
pub struct ClusterColors {
    mapping: BTreeMap<ClusterLabel, Color32>,
    default_color: Color32,
}

impl ClusterColors {
    pub fn new(clusters: &BTreeSet<ClusterLabel>) -> Self {
        let mapping = clusters
            .iter()
            .cloned()
            .zip(cluster_palette(clusters.len()))
            .collect();

        ClusterColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, cluster: &ClusterLabel) -> Color32 {
        self.mapping
            .get(cluster)
            .copied()
            .unwrap_or(self.default_color)
    }
}
