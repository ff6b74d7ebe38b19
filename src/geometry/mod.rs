//! Geometry utilities for mesh-quality.
//!
//! This module provides the per-cell radius-ratio metric and its mesh-wide
//! aggregates (extrema and histogram data).

pub mod quality;

pub use quality::{
    cell_radius_ratio, radius_ratio_histogram_data, radius_ratio_min_max, radius_ratios,
};
