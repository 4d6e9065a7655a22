use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the ifcspace kernel and analyses.
#[derive(Debug, Error)]
pub enum SpaceError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("points are not coplanar: {0}")]
    NonPlanar(String),
}

/// Errors related to topological operations.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors raised while reading a building scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("cannot read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse scene {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid representation for {element}: {reason}")]
    InvalidRepresentation { element: String, reason: String },
}

/// Errors that abort one of the analysis pipelines.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("bounding box requested for an empty solid set")]
    EmptySolidSet,

    #[error("half-space reduction degenerated at step {step}: {reason}")]
    DegenerateReduction { step: usize, reason: String },

    #[error("reduced solid has no volume ({volume:.3e})")]
    EmptyVolume { volume: f64 },

    #[error("invalid analysis settings: {0}")]
    InvalidSettings(String),

    #[error("cannot read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {origin}: {source}")]
    ConfigParse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for results using [`SpaceError`].
pub type Result<T> = std::result::Result<T, SpaceError>;
