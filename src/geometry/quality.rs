//! Radius-ratio cell quality.
//!
//! The radius ratio of a simplex of topological dimension `d` is
//! `d * r_in / r_circ`, where `r_in` is the radius of the inscribed
//! sphere/circle and `r_circ` the radius of the circumscribed one. It lies in
//! `[0, 1]` and equals 1 exactly for regular simplices. Intervals always have
//! ratio 1.
//!
//! Degenerate cells (zero length, area or volume) have no meaningful ratio
//! and are reported as [`MeshError::Computation`].
//!
//! # Examples
//! ```rust
//! use mesh_quality::geometry::quality::{cell_radius_ratio, radius_ratio_min_max};
//! use mesh_quality::mesh::Mesh;
//! use mesh_quality::topology::cell_type::CellType;
//!
//! let h = 3f64.sqrt() / 2.0;
//! let mesh = Mesh::from_cells(
//!     CellType::Triangle,
//!     2,
//!     &[[0.0, 0.0], [1.0, 0.0], [0.5, h]],
//!     &[[0usize, 1, 2]],
//! )?;
//! let (qmin, qmax) = radius_ratio_min_max(&mesh)?;
//! assert!((qmin - 1.0).abs() < 1e-12 && (qmax - 1.0).abs() < 1e-12);
//!
//! let right = cell_radius_ratio(
//!     CellType::Triangle,
//!     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//! )?;
//! assert!((right - (2f64.sqrt() * 2.0 - 2.0)).abs() < 1e-12);
//! # Ok::<(), mesh_quality::mesh_error::MeshError>(())
//! ```

use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use itertools::{Itertools, MinMaxResult};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Degeneracy tolerance relative to the longest edge.
const EPS: f64 = 1e-14;

/// Radius ratio of a single cell given its padded `(x, y, z)` vertices.
pub fn cell_radius_ratio(cell_type: CellType, vertices: &[[f64; 3]]) -> Result<f64, MeshError> {
    let expected = cell_type.num_vertices();
    if vertices.len() != expected {
        return Err(MeshError::computation(format!(
            "vertex count mismatch: expected {expected}, got {}",
            vertices.len()
        )));
    }
    match cell_type {
        CellType::Interval => interval_ratio(vertices),
        CellType::Triangle => triangle_ratio(vertices[0], vertices[1], vertices[2]),
        CellType::Tetrahedron => {
            tetrahedron_ratio(vertices[0], vertices[1], vertices[2], vertices[3])
        }
    }
}

/// Radius ratio of every cell of `mesh`, in cell order.
pub fn radius_ratios(mesh: &Mesh) -> Result<Vec<f64>, MeshError> {
    let ratio_of = |cell: usize| -> Result<f64, MeshError> {
        let vertices = mesh.cell_vertices(cell)?;
        cell_radius_ratio(mesh.cell_type(), &vertices).map_err(|err| match err {
            MeshError::Computation(msg) => MeshError::Computation(format!("cell {cell}: {msg}")),
            other => other,
        })
    };
    #[cfg(feature = "rayon")]
    {
        (0..mesh.num_cells()).into_par_iter().map(ratio_of).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        (0..mesh.num_cells()).map(ratio_of).collect()
    }
}

/// Minimum and maximum radius ratio over all cells of `mesh`.
///
/// Fails for meshes without cells and for meshes containing a degenerate cell.
pub fn radius_ratio_min_max(mesh: &Mesh) -> Result<(f64, f64), MeshError> {
    let ratios = radius_ratios(mesh)?;
    match ratios.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => Err(MeshError::computation(
            "radius ratio is undefined for a mesh without cells",
        )),
        MinMaxResult::OneElement(q) => Ok((q, q)),
        MinMaxResult::MinMax(qmin, qmax) => Ok((qmin, qmax)),
    }
}

/// Bin centres and cell counts of the radius-ratio distribution.
///
/// `[0, 1]` is split into `num_bins` equal bins; bin `i` is centred at
/// `(i + 0.5) / num_bins`. A ratio of exactly 1 falls into the last bin.
pub fn radius_ratio_histogram_data(
    mesh: &Mesh,
    num_bins: usize,
) -> Result<(Vec<f64>, Vec<usize>), MeshError> {
    if num_bins == 0 {
        return Err(MeshError::computation("histogram needs at least one bin"));
    }
    let interval = 1.0 / num_bins as f64;
    let bins: Vec<f64> = (0..num_bins)
        .map(|i| i as f64 * interval + interval / 2.0)
        .collect();
    let mut counts = vec![0usize; num_bins];
    for ratio in radius_ratios(mesh)? {
        let slot = ((ratio / interval) as usize).min(num_bins - 1);
        counts[slot] += 1;
    }
    Ok((bins, counts))
}

fn interval_ratio(vertices: &[[f64; 3]]) -> Result<f64, MeshError> {
    let length = norm(sub(vertices[1], vertices[0]));
    if !(length > 0.0) {
        return Err(MeshError::computation("zero-length interval"));
    }
    Ok(1.0)
}

fn triangle_ratio(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Result<f64, MeshError> {
    let la = norm(sub(c, b));
    let lb = norm(sub(a, c));
    let lc = norm(sub(b, a));
    let area = triangle_area(a, b, c);
    let scale = la.max(lb).max(lc);
    if !(scale > 0.0) || area <= EPS * scale * scale {
        return Err(MeshError::computation(format!(
            "degenerate triangle: area = {area}"
        )));
    }
    let inradius = 2.0 * area / (la + lb + lc);
    let circumradius = la * lb * lc / (4.0 * area);
    Ok(clamp_unit(2.0 * inradius / circumradius))
}

fn tetrahedron_ratio(
    v0: [f64; 3],
    v1: [f64; 3],
    v2: [f64; 3],
    v3: [f64; 3],
) -> Result<f64, MeshError> {
    let volume = signed_volume(v0, v1, v2, v3).abs();
    let scale = [
        (v0, v1),
        (v0, v2),
        (v0, v3),
        (v1, v2),
        (v1, v3),
        (v2, v3),
    ]
    .iter()
    .map(|&(p, q)| norm(sub(p, q)))
    .fold(0.0f64, f64::max);
    if !(scale > 0.0) || volume <= EPS * scale * scale * scale {
        return Err(MeshError::computation(format!(
            "degenerate tetrahedron: volume = {volume}"
        )));
    }

    let face_area = triangle_area(v1, v2, v3)
        + triangle_area(v0, v2, v3)
        + triangle_area(v0, v1, v3)
        + triangle_area(v0, v1, v2);
    let inradius = 3.0 * volume / face_area;

    // Products of opposite edge lengths.
    let p = norm(sub(v0, v1)) * norm(sub(v2, v3));
    let q = norm(sub(v0, v2)) * norm(sub(v1, v3));
    let r = norm(sub(v0, v3)) * norm(sub(v1, v2));
    let s = (p + q + r) * (p + q - r) * (p - q + r) * (-p + q + r);
    let circumradius = s.max(0.0).sqrt() / (24.0 * volume);
    if circumradius <= EPS * scale {
        return Err(MeshError::computation("degenerate tetrahedron: zero circumradius"));
    }
    Ok(clamp_unit(3.0 * inradius / circumradius))
}

/// Rounding may push a regular simplex a hair above 1.
fn clamp_unit(ratio: f64) -> f64 {
    ratio.clamp(0.0, 1.0)
}

fn triangle_area(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    0.5 * norm(cross(sub(b, a), sub(c, a)))
}

fn signed_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    let ab = sub(b, a);
    let ac = sub(c, a);
    let ad = sub(d, a);
    dot(ab, cross(ac, ad)) / 6.0
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}
