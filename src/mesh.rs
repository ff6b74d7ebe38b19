//! The mesh handle: a simplicial mesh with one cell type.
//!
//! A [`Mesh`] bundles vertex [`Coordinates`] with an immutable cell → vertex
//! [`Connectivity`]. It is built by the readers in [`crate::io`] or the
//! generators in [`crate::mesh_generation`] and is read-only afterwards.

use crate::data::coordinates::Coordinates;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::connectivity::Connectivity;

/// Simplicial mesh with a single cell type.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    cell_type: CellType,
    coordinates: Coordinates,
    cells: Connectivity,
}

impl Mesh {
    /// Assemble a mesh, checking that every cell has the vertex count of
    /// `cell_type` and that the geometric dimension can embed it.
    pub fn try_new(
        cell_type: CellType,
        coordinates: Coordinates,
        cells: Connectivity,
    ) -> Result<Self, MeshError> {
        if coordinates.dimension() < cell_type.dimension() {
            return Err(MeshError::format(format!(
                "{cell_type} cells cannot be embedded in {}D geometry",
                coordinates.dimension()
            )));
        }
        let expected = cell_type.num_vertices();
        for (idx, cone) in cells.iter().enumerate() {
            if cone.len() != expected {
                return Err(MeshError::format(format!(
                    "cell {idx} has {} vertices, expected {expected} for {cell_type}",
                    cone.len()
                )));
            }
            if let Some(&v) = cone.iter().find(|&&v| v >= coordinates.len()) {
                return Err(MeshError::format(format!(
                    "cell {idx} references vertex {v}, but the mesh has {} vertices",
                    coordinates.len()
                )));
            }
        }
        Ok(Self {
            cell_type,
            coordinates,
            cells,
        })
    }

    /// Build from vertex rows and per-cell vertex indices.
    pub fn from_cells<R, C>(
        cell_type: CellType,
        dimension: usize,
        vertices: &[R],
        cells: &[C],
    ) -> Result<Self, MeshError>
    where
        R: AsRef<[f64]>,
        C: AsRef<[usize]>,
    {
        let coordinates = Coordinates::from_rows(dimension, vertices)?;
        let cells = Connectivity::try_from_cells(cells, coordinates.len())?;
        Self::try_new(cell_type, coordinates, cells)
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Topological dimension (of the cells).
    #[inline]
    pub fn topological_dimension(&self) -> usize {
        self.cell_type.dimension()
    }

    /// Geometric dimension (of the vertices).
    #[inline]
    pub fn geometric_dimension(&self) -> usize {
        self.coordinates.dimension()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    #[inline]
    pub fn cells(&self) -> &Connectivity {
        &self.cells
    }

    /// Padded `(x, y, z)` coordinates of every vertex of `cell`.
    pub fn cell_vertices(&self, cell: usize) -> Result<Vec<[f64; 3]>, MeshError> {
        let cone = self.cells.cone(cell).ok_or_else(|| {
            MeshError::format(format!("cell {cell} out of range ({})", self.num_cells()))
        })?;
        cone.iter().map(|&v| self.coordinates.try_point(v)).collect()
    }
}
