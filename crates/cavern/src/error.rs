//! # Pipeline Error Types

use std::io;

use cavern_mesh::MeshError;
use cavern_procedural::CaveError;
use thiserror::Error;

/// Errors surfaced by [`CavePipeline`](crate::CavePipeline) and config loading.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Cave generation failed.
    #[error("generation failed: {0}")]
    Generation(#[from] CaveError),

    /// Meshing failed.
    #[error("meshing failed: {0}")]
    Mesh(#[from] MeshError),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
