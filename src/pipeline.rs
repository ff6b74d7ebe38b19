//! Mesh-quality demonstration pipeline.
//!
//! [`run`] loads a mesh, reports the extreme radius ratios, shows the
//! radius-ratio histogram without blocking, plots the mesh and finally hands
//! control to the renderer's interactive mode. Steps run in order and the
//! first failure aborts the rest.

use crate::geometry::quality::radius_ratio_min_max;
use crate::io::load_mesh;
use crate::mesh_error::MeshError;
use crate::plot::histogram::{DEFAULT_NUM_BINS, radius_ratio_histogram};
use crate::plot::Renderer;
use crate::topology::cell_type::CellType;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Mesh loaded when no path is given.
pub const DEFAULT_MESH_PATH: &str = "../dolfin_fine.xml.gz";

/// Options for [`run`].
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    pub mesh_path: PathBuf,
    pub num_bins: usize,
    /// Also write the histogram specification as JSON to this file.
    pub histogram_json: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mesh_path: PathBuf::from(DEFAULT_MESH_PATH),
            num_bins: DEFAULT_NUM_BINS,
            histogram_json: None,
        }
    }
}

/// Summary of a successful run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityReport {
    pub path: PathBuf,
    pub num_cells: usize,
    pub cell_type: CellType,
    pub qmin: f64,
    pub qmax: f64,
}

/// Run the pipeline, writing the report lines to `out` and displaying
/// through `renderer`.
pub fn run<R: Renderer, W: Write>(
    config: &PipelineConfig,
    renderer: &mut R,
    out: &mut W,
) -> Result<QualityReport, MeshError> {
    let mesh = load_mesh(&config.mesh_path)?;

    let (qmin, qmax) = radius_ratio_min_max(&mesh)?;
    writeln!(out, "Minimal radius ratio: {qmin}")?;
    writeln!(out, "Maximal radius ratio: {qmax}")?;
    out.flush()?;
    log::info!("radius ratio range [{qmin}, {qmax}] over {} cells", mesh.num_cells());

    let histogram = radius_ratio_histogram(&mesh, config.num_bins)?.non_blocking();
    log::debug!("histogram specification: {histogram:?}");
    if let Some(path) = &config.histogram_json {
        histogram.write_json(path)?;
        log::info!("wrote histogram specification to {}", path.display());
    }
    renderer.show_histogram(&histogram)?;

    renderer.plot_mesh(&mesh, "Mesh")?;
    renderer.interactive()?;

    Ok(QualityReport {
        path: config.mesh_path.clone(),
        num_cells: mesh.num_cells(),
        cell_type: mesh.cell_type(),
        qmin,
        qmax,
    })
}
