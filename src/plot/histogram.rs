//! Radius-ratio histogram as a structured plotting specification.
//!
//! A [`HistogramSpec`] carries everything a renderer needs (bin centres,
//! counts, bar width, labels) plus the [`DisplayMode`] to use when it is
//! shown. Nothing is generated as program text; the display mode is data.

use crate::geometry::quality::radius_ratio_histogram_data;
use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default number of bins, matching the usual quality-histogram resolution.
pub const DEFAULT_NUM_BINS: usize = 50;

/// Whether showing a plot suspends the caller until it is dismissed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Wait for the user to dismiss the plot before returning.
    #[default]
    Blocking,
    /// Return as soon as the plot is drawn.
    NonBlocking,
}

/// Bar-chart description of a histogram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Bin centres, ascending.
    pub bins: Vec<f64>,
    /// Cell count per bin, parallel to `bins`.
    pub counts: Vec<usize>,
    /// Bar width in x units.
    pub bar_width: f64,
    pub display: DisplayMode,
}

impl HistogramSpec {
    /// Return the same histogram with a non-blocking display mode.
    #[must_use]
    pub fn non_blocking(self) -> Self {
        self.with_display(DisplayMode::NonBlocking)
    }

    #[must_use]
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.display == DisplayMode::Blocking
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Largest bin count (0 for an empty histogram).
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String, MeshError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form to `path`.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), MeshError> {
        let mut out = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(&mut out, self)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

/// Histogram of the radius ratios of `mesh` over `[0, 1]` with `num_bins`
/// bars, in blocking display mode.
pub fn radius_ratio_histogram(mesh: &Mesh, num_bins: usize) -> Result<HistogramSpec, MeshError> {
    let (bins, counts) = radius_ratio_histogram_data(mesh, num_bins)?;
    Ok(HistogramSpec {
        title: "Radius ratio histogram".to_string(),
        x_label: "radius ratio".to_string(),
        y_label: "number of cells".to_string(),
        bins,
        counts,
        bar_width: 1.0 / num_bins as f64,
        display: DisplayMode::Blocking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::unit_square_mesh;

    #[test]
    fn counts_sum_to_cell_count() {
        let mesh = unit_square_mesh(4, 3).unwrap();
        let hist = radius_ratio_histogram(&mesh, DEFAULT_NUM_BINS).unwrap();
        assert_eq!(hist.bins.len(), DEFAULT_NUM_BINS);
        assert_eq!(hist.counts.len(), DEFAULT_NUM_BINS);
        assert_eq!(hist.total(), mesh.num_cells());
        assert!((hist.bar_width - 0.02).abs() < 1e-15);
        assert!(hist.is_blocking());
    }

    #[test]
    fn non_blocking_only_changes_display_mode() {
        let mesh = unit_square_mesh(2, 2).unwrap();
        let hist = radius_ratio_histogram(&mesh, 10).unwrap();
        let adapted = hist.clone().non_blocking();
        assert!(!adapted.is_blocking());
        assert_eq!(adapted.counts, hist.counts);
        assert_eq!(adapted.with_display(DisplayMode::Blocking), hist);
    }

    #[test]
    fn json_carries_display_mode() {
        let mesh = unit_square_mesh(1, 1).unwrap();
        let hist = radius_ratio_histogram(&mesh, 5).unwrap().non_blocking();
        let json = hist.to_json().unwrap();
        assert!(json.contains("\"display\": \"non_blocking\""), "{json}");
        let back: HistogramSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counts, hist.counts);
        assert_eq!(back.display, DisplayMode::NonBlocking);
        for (a, b) in back.bins.iter().zip(&hist.bins) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
