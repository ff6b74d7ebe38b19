//! Cell type metadata for simplicial meshes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simplex cell kinds supported by the quality routines.
///
/// Vertex ordering follows the usual simplex convention:
/// - **Interval**: `[v0, v1]`.
/// - **Triangle**: `[v0, v1, v2]`.
/// - **Tetrahedron**: `[v0, v1, v2, v3]`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// 1D simplex.
    Interval,
    /// 2D simplex.
    Triangle,
    /// 3D simplex.
    Tetrahedron,
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Triangle
    }
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> usize {
        match self {
            CellType::Interval => 1,
            CellType::Triangle => 2,
            CellType::Tetrahedron => 3,
        }
    }

    /// Number of vertices of one cell.
    pub fn num_vertices(self) -> usize {
        self.dimension() + 1
    }

    /// Name used by the DOLFIN XML `celltype` attribute and cell tags.
    pub fn dolfin_name(self) -> &'static str {
        match self {
            CellType::Interval => "interval",
            CellType::Triangle => "triangle",
            CellType::Tetrahedron => "tetrahedron",
        }
    }

    /// Parse a DOLFIN XML cell type name.
    pub fn from_dolfin_name(name: &str) -> Option<Self> {
        match name {
            "interval" => Some(CellType::Interval),
            "triangle" => Some(CellType::Triangle),
            "tetrahedron" => Some(CellType::Tetrahedron),
            _ => None,
        }
    }

    /// Map a Gmsh element type code to a cell type.
    ///
    /// Only first-order simplices are recognised: 1 (line), 2 (triangle),
    /// 4 (tetrahedron).
    pub fn from_gmsh(elem_type: u32) -> Option<Self> {
        match elem_type {
            1 => Some(CellType::Interval),
            2 => Some(CellType::Triangle),
            4 => Some(CellType::Tetrahedron),
            _ => None,
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dolfin_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_and_vertex_counts() {
        assert_eq!(CellType::Interval.num_vertices(), 2);
        assert_eq!(CellType::Triangle.num_vertices(), 3);
        assert_eq!(CellType::Tetrahedron.num_vertices(), 4);
        assert_eq!(CellType::Tetrahedron.dimension(), 3);
    }

    #[test]
    fn dolfin_names_round_trip() {
        for ct in [CellType::Interval, CellType::Triangle, CellType::Tetrahedron] {
            assert_eq!(CellType::from_dolfin_name(ct.dolfin_name()), Some(ct));
        }
        assert_eq!(CellType::from_dolfin_name("quadrilateral"), None);
    }

    #[test]
    fn gmsh_codes() {
        assert_eq!(CellType::from_gmsh(2), Some(CellType::Triangle));
        assert_eq!(CellType::from_gmsh(4), Some(CellType::Tetrahedron));
        assert_eq!(CellType::from_gmsh(3), None);
        assert_eq!(CellType::from_gmsh(15), None);
    }
}
