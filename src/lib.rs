#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-quality
//!
//! mesh-quality inspects the shape quality of simplicial meshes. It loads
//! interval, triangle and tetrahedron meshes, computes the radius ratio of
//! every cell, and summarises the result as extrema, a histogram and plots.
//!
//! ## Features
//! - DOLFIN XML reader/writer and Gmsh ASCII 2.2 reader, gzip aware
//! - Radius ratio per cell (`d * inradius / circumradius`, 1 for regular simplices)
//! - Structured histogram specifications with an explicit display mode
//! - SVG and terminal renderers behind a common [`plot::Renderer`] trait
//! - Optional `rayon` feature for parallel quality evaluation
//!
//! ## Usage
//!
//! ```no_run
//! use mesh_quality::prelude::*;
//!
//! # fn main() -> Result<(), MeshError> {
//! let mesh = load_mesh("../dolfin_fine.xml.gz")?;
//! let (qmin, qmax) = radius_ratio_min_max(&mesh)?;
//! println!("Minimal radius ratio: {qmin}");
//! println!("Maximal radius ratio: {qmax}");
//! # Ok(())
//! # }
//! ```
//!
//! The `mesh-quality-demo` binary runs the whole [`pipeline`].

pub mod data;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod mesh_error;
pub mod mesh_generation;
pub mod pipeline;
pub mod plot;
pub mod topology;

#[cfg(test)]
mod test_util;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::coordinates::Coordinates;
    pub use crate::geometry::quality::{
        cell_radius_ratio, radius_ratio_histogram_data, radius_ratio_min_max, radius_ratios,
    };
    pub use crate::io::{MeshReader, MeshWriter, load_mesh, save_mesh};
    pub use crate::mesh::Mesh;
    pub use crate::mesh_error::MeshError;
    pub use crate::mesh_generation::{unit_cube_mesh, unit_square_mesh};
    pub use crate::pipeline::{PipelineConfig, QualityReport};
    pub use crate::plot::{DisplayMode, HistogramSpec, Renderer, radius_ratio_histogram};
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::connectivity::Connectivity;
}
