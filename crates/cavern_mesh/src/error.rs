//! # Mesh Error Types

use thiserror::Error;

/// Errors that can occur while building a mesh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The input grid cannot be meshed.
    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    /// Cell size or wall height is out of range.
    #[error("invalid mesh settings: {0}")]
    InvalidSettings(String),

    /// Internal bookkeeping is inconsistent. The build is aborted.
    #[error("mesh invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
