//! MeshError: Unified error type for mesh-quality public APIs
//!
//! Every fallible operation in the crate (loading, quality evaluation,
//! rendering) reports through this enum instead of panicking.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for mesh-quality operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The mesh resource does not exist on disk.
    #[error("mesh resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },
    /// The resource exists but its content is malformed or unsupported.
    #[error("mesh format error: {0}")]
    Format(String),
    /// A quality metric could not be evaluated (degenerate cell, empty mesh).
    #[error("quality computation error: {0}")]
    Computation(String),
    /// Underlying I/O failure other than a missing file.
    #[error("I/O error: {0}")]
    Io(String),
    /// A renderer failed to produce its output.
    #[error("render error: {0}")]
    Render(String),
    /// Structured output could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MeshError {
    /// Convenience constructor for [`MeshError::Format`].
    pub fn format(message: impl Into<String>) -> Self {
        MeshError::Format(message.into())
    }

    /// Convenience constructor for [`MeshError::Computation`].
    pub fn computation(message: impl Into<String>) -> Self {
        MeshError::Computation(message.into())
    }
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err.to_string())
    }
}

impl From<quick_xml::Error> for MeshError {
    fn from(err: quick_xml::Error) -> Self {
        MeshError::Format(format!("XML parse error: {err}"))
    }
}

impl From<serde_json::Error> for MeshError {
    fn from(err: serde_json::Error) -> Self {
        MeshError::Serialization(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for MeshError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        MeshError::Format(format!("XML attribute error: {err}"))
    }
}
