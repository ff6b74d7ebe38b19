//! Top-level module for mesh topology.
//!
//! Cell kinds and the immutable cell → vertex connectivity used by [`Mesh`](crate::mesh::Mesh).

pub mod cell_type;
pub mod connectivity;

pub use cell_type::CellType;
pub use connectivity::Connectivity;
