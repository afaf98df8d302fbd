use thiserror::Error;

/// Top-level error type for the Umbra shadow kernel.
#[derive(Debug, Error)]
pub enum UmbraError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Caster(#[from] CasterError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate at contour index {index}")]
    NonFinite { index: usize },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to contour tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("contour point rejected by the triangulator: {0}")]
    InvalidInput(String),
}

/// Errors related to shadow mesh assembly.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("edge ({v0}, {v1}) is shared by {count} triangles")]
    NonManifoldEdge { v0: u32, v1: u32, count: usize },

    #[error("{payloads} extrusion payloads for {positions} vertex positions")]
    PayloadMismatch { positions: usize, payloads: usize },

    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Errors related to shadow-caster bookkeeping.
#[derive(Debug, Error)]
pub enum CasterError {
    #[error("shadow caster not found")]
    NotFound,
}

/// Convenience type alias for results using [`UmbraError`].
pub type Result<T> = std::result::Result<T, UmbraError>;
