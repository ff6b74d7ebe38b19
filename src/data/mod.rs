//! Data module: per-vertex geometry storage.

pub mod coordinates;

pub use coordinates::Coordinates;
