use thiserror::Error;

use crate::optimize::{ConfigError, ObjectiveError};
use crate::support::mesh::MeshError;

use super::ArtifactError;

/// Errors returned when a run cannot be started.
#[derive(Debug, Error)]
pub enum StartError {
    /// Another run is still active.
    #[error("an optimization is already running")]
    Busy,

    #[error("invalid objective")]
    InvalidObjective(#[from] ObjectiveError),

    #[error("invalid optimizer configuration")]
    Config(#[from] ConfigError),

    #[error("failed to spawn worker thread")]
    Spawn(#[from] std::io::Error),
}

/// Errors that abort a run after it started.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid optimizer configuration")]
    Config(#[from] ConfigError),

    #[error("failed to build the final mesh")]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// The worker panicked.
    #[error("worker panicked: {message}")]
    Panicked { message: String },
}
