//! Plotting: histogram specifications and the renderers that display them.
//!
//! A [`Renderer`] is the display seam of the pipeline. Two implementations
//! ship with the crate:
//! - [`svg::SvgRenderer`] writes SVG files (histogram bars, mesh wireframe).
//! - [`terminal::TerminalRenderer`] draws into a text stream.
//!
//! Both take an optional *dismissal source*: a [`BufRead`] whose next line
//! (or end of input) stands for the user closing the display. Without one the
//! renderer is headless and never waits.

pub mod histogram;
pub mod svg;
pub mod terminal;

pub use histogram::{DEFAULT_NUM_BINS, DisplayMode, HistogramSpec, radius_ratio_histogram};

use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use std::io::BufRead;

/// Display backend used by the pipeline.
pub trait Renderer {
    /// Display a histogram. Blocks until dismissal when the histogram's
    /// display mode is [`DisplayMode::Blocking`].
    fn show_histogram(&mut self, histogram: &HistogramSpec) -> Result<(), MeshError>;

    /// Display the mesh geometry without waiting.
    fn plot_mesh(&mut self, mesh: &Mesh, title: &str) -> Result<(), MeshError>;

    /// Hold every open display until the user dismisses it.
    fn interactive(&mut self) -> Result<(), MeshError>;
}

/// Block until `source` yields a line or ends. Headless when `source` is `None`.
pub fn wait_for_dismissal<D: BufRead>(
    source: Option<&mut D>,
    prompt: &str,
) -> Result<(), MeshError> {
    let Some(source) = source else {
        log::debug!("headless display, not waiting: {prompt}");
        return Ok(());
    };
    eprintln!("{prompt}");
    let mut line = String::new();
    source.read_line(&mut line)?;
    Ok(())
}
