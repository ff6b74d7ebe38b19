//! Geometry/coordinates storage for mesh vertices.
//!
//! Coordinates are stored contiguously with a fixed dimension per vertex:
//! vertex `v` owns `values[v * dim..(v + 1) * dim]`.

use crate::mesh_error::MeshError;

/// Vertex coordinates with an attached geometric dimension.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coordinates {
    dimension: usize,
    values: Vec<f64>,
}

impl Coordinates {
    /// Construct from a flat value buffer.
    ///
    /// `dimension` must be 1, 2 or 3 and divide `values.len()`.
    pub fn try_new(dimension: usize, values: Vec<f64>) -> Result<Self, MeshError> {
        if !(1..=3).contains(&dimension) {
            return Err(MeshError::format(format!(
                "unsupported geometric dimension: {dimension}"
            )));
        }
        if values.len() % dimension != 0 {
            return Err(MeshError::format(format!(
                "coordinate buffer of length {} is not a multiple of dimension {dimension}",
                values.len()
            )));
        }
        if let Some(bad) = values.iter().position(|x| !x.is_finite()) {
            return Err(MeshError::format(format!(
                "non-finite coordinate for vertex {}",
                bad / dimension
            )));
        }
        Ok(Self { dimension, values })
    }

    /// Construct from per-vertex rows of equal length.
    pub fn from_rows<R: AsRef<[f64]>>(dimension: usize, rows: &[R]) -> Result<Self, MeshError> {
        let mut values = Vec::with_capacity(rows.len() * dimension);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dimension {
                return Err(MeshError::format(format!(
                    "vertex {idx} has dimension {}, expected {dimension}",
                    row.len()
                )));
            }
            values.extend_from_slice(row);
        }
        Self::try_new(dimension, values)
    }

    /// Returns the geometric dimension per vertex.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vertices stored.
    #[inline]
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.values.len() / self.dimension
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the coordinate slice for vertex `v`.
    #[inline]
    pub fn try_restrict(&self, v: usize) -> Result<&[f64], MeshError> {
        let start = v * self.dimension;
        self.values
            .get(start..start + self.dimension)
            .ok_or_else(|| MeshError::format(format!("vertex {v} out of range ({})", self.len())))
    }

    /// Coordinates of vertex `v` padded with zeros to `(x, y, z)`.
    pub fn try_point(&self, v: usize) -> Result<[f64; 3], MeshError> {
        let slice = self.try_restrict(v)?;
        let mut xyz = [0.0; 3];
        xyz[..slice.len()].copy_from_slice(slice);
        Ok(xyz)
    }

    /// Iterate vertex slices in index order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.dimension.max(1))
    }

    /// Axis-aligned bounding box `(min, max)` in padded `(x, y, z)`, or
    /// `None` when there are no vertices.
    pub fn bounding_box(&self) -> Option<([f64; 3], [f64; 3])> {
        if self.is_empty() {
            return None;
        }
        let mut lo = [f64::INFINITY; 3];
        let mut hi = [f64::NEG_INFINITY; 3];
        for row in self.iter() {
            for (axis, &x) in row.iter().enumerate() {
                lo[axis] = lo[axis].min(x);
                hi[axis] = hi[axis].max(x);
            }
        }
        for axis in self.dimension..3 {
            lo[axis] = 0.0;
            hi[axis] = 0.0;
        }
        Some((lo, hi))
    }

    /// The raw flat buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
