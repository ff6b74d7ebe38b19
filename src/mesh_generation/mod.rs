//! Structured simplex mesh generators.
//!
//! - [`interval_mesh`]: `n` intervals on `[a, b]`.
//! - [`rectangle_mesh`]: `nx`×`ny` rectangles split into two triangles along
//!   the `v0 → v2` diagonal.
//! - [`box_mesh`]: `nx`×`ny`×`nz` boxes split into six tetrahedra sharing the
//!   main diagonal (Kuhn/Freudenthal split), so neighbouring boxes conform.

use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;

/// Kuhn split of a box whose corners are numbered by `x | y << 1 | z << 2`.
const KUHN_TETS: [[usize; 4]; 6] = [
    [0, 1, 3, 7],
    [0, 1, 7, 5],
    [0, 5, 7, 4],
    [0, 3, 2, 7],
    [0, 6, 4, 7],
    [0, 2, 6, 7],
];

fn invalid_geometry(message: impl Into<String>) -> MeshError {
    MeshError::format(message)
}

fn check_extent(min: &[f64], max: &[f64]) -> Result<(), MeshError> {
    for (axis, (lo, hi)) in min.iter().zip(max).enumerate() {
        if !(hi > lo) {
            return Err(invalid_geometry(format!(
                "empty extent on axis {axis}: [{lo}, {hi}]"
            )));
        }
    }
    Ok(())
}

/// `n` equal intervals on `[a, b]`.
pub fn interval_mesh(n: usize, a: f64, b: f64) -> Result<Mesh, MeshError> {
    if n == 0 {
        return Err(invalid_geometry("n must be positive"));
    }
    check_extent(&[a], &[b])?;
    let h = (b - a) / n as f64;
    let vertices: Vec<[f64; 1]> = (0..=n).map(|i| [a + h * i as f64]).collect();
    let cells: Vec<[usize; 2]> = (0..n).map(|i| [i, i + 1]).collect();
    Mesh::from_cells(CellType::Interval, 1, &vertices, &cells)
}

/// Triangulated rectangle over `[min, max]` with `nx`×`ny` cells per axis
/// (two triangles each).
pub fn rectangle_mesh(
    min: [f64; 2],
    max: [f64; 2],
    nx: usize,
    ny: usize,
) -> Result<Mesh, MeshError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_geometry("nx and ny must be positive"));
    }
    check_extent(&min, &max)?;

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        let y = min[1] + dy * j as f64;
        for i in 0..=nx {
            vertices.push([min[0] + dx * i as f64, y]);
        }
    }

    let row_stride = nx + 1;
    let mut cells = Vec::with_capacity(2 * nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * row_stride + i;
            let v1 = v0 + 1;
            let v3 = v0 + row_stride;
            let v2 = v3 + 1;
            cells.push([v0, v1, v2]);
            cells.push([v0, v2, v3]);
        }
    }
    Mesh::from_cells(CellType::Triangle, 2, &vertices, &cells)
}

/// Tetrahedral box over `[min, max]` with `nx`×`ny`×`nz` cells per axis
/// (six tetrahedra each).
pub fn box_mesh(
    min: [f64; 3],
    max: [f64; 3],
    nx: usize,
    ny: usize,
    nz: usize,
) -> Result<Mesh, MeshError> {
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(invalid_geometry("nx, ny, and nz must be positive"));
    }
    check_extent(&min, &max)?;

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let dz = (max[2] - min[2]) / nz as f64;
    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        let z = min[2] + dz * k as f64;
        for j in 0..=ny {
            let y = min[1] + dy * j as f64;
            for i in 0..=nx {
                vertices.push([min[0] + dx * i as f64, y, z]);
            }
        }
    }

    let row_stride = nx + 1;
    let slab_stride = row_stride * (ny + 1);
    let mut cells = Vec::with_capacity(6 * nx * ny * nz);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let base = k * slab_stride + j * row_stride + i;
                let corner = |c: usize| {
                    base + (c & 1) + ((c >> 1) & 1) * row_stride + ((c >> 2) & 1) * slab_stride
                };
                for tet in KUHN_TETS {
                    cells.push(tet.map(corner));
                }
            }
        }
    }
    Mesh::from_cells(CellType::Tetrahedron, 3, &vertices, &cells)
}

/// `[0, 1]²` split into `nx`×`ny` rectangles.
pub fn unit_square_mesh(nx: usize, ny: usize) -> Result<Mesh, MeshError> {
    rectangle_mesh([0.0, 0.0], [1.0, 1.0], nx, ny)
}

/// `[0, 1]³` split into `nx`×`ny`×`nz` boxes.
pub fn unit_cube_mesh(nx: usize, ny: usize, nz: usize) -> Result<Mesh, MeshError> {
    box_mesh([0.0; 3], [1.0; 3], nx, ny, nz)
}
