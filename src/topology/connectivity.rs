//! Compressed Sparse Row (CSR) cell → vertex connectivity.
//!
//! Immutable and cache-friendly: the vertices of cell `c` live in the
//! contiguous slice `indices[offsets[c]..offsets[c + 1]]`, in the order they
//! were supplied. Built once by a reader or generator and only traversed
//! afterwards.

use crate::mesh_error::MeshError;
use itertools::Itertools;
use std::sync::Arc;

/// Immutable cell → vertex adjacency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connectivity {
    offsets: Arc<[usize]>,
    indices: Arc<[usize]>,
}

impl Default for Connectivity {
    fn default() -> Self {
        Self {
            offsets: Arc::from([0usize]),
            indices: Arc::from([]),
        }
    }
}

impl Connectivity {
    /// Build from per-cell vertex lists, checking every index against
    /// `num_vertices`.
    pub fn try_from_cells<I, C>(cells: I, num_vertices: usize) -> Result<Self, MeshError>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[usize]>,
    {
        let mut offsets = vec![0usize];
        let mut indices = Vec::new();
        for (cell, verts) in cells.into_iter().enumerate() {
            for &v in verts.as_ref() {
                if v >= num_vertices {
                    return Err(MeshError::format(format!(
                        "cell {cell} references vertex {v}, but the mesh has {num_vertices} vertices"
                    )));
                }
                indices.push(v);
            }
            offsets.push(indices.len());
        }
        Ok(Self {
            offsets: offsets.into(),
            indices: indices.into(),
        })
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vertices of `cell`, or `None` when out of range.
    #[inline]
    pub fn cone(&self, cell: usize) -> Option<&[usize]> {
        let start = *self.offsets.get(cell)?;
        let end = *self.offsets.get(cell + 1)?;
        Some(&self.indices[start..end])
    }

    /// Iterate cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.offsets
            .windows(2)
            .map(move |w| &self.indices[w[0]..w[1]])
    }

    /// Unique undirected edges `(lo, hi)` of all cells, sorted.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .iter()
            .flat_map(|cell| {
                cell.iter()
                    .copied()
                    .tuple_combinations()
                    .map(|(a, b)| (a.min(b), a.max(b)))
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }
}
