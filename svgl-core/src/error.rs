//! Error types for svgl-core.

use thiserror::Error;

/// Errors raised by mesh setup, lighting, importing and rendering.
#[derive(Error, Debug)]
pub enum SvglError {
    #[error("the vertex array length must be a multiple of 3, got {0}")]
    InvalidVertexCount(usize),

    #[error("the face array length ({len}) must be a multiple of vertices per face ({per_face})")]
    InvalidFaceCount { len: usize, per_face: usize },

    #[error("a face needs at least 3 vertices, got {0}")]
    InvalidVerticesPerFace(usize),

    #[error("face index {index} is out of range for {nb_vertices} vertices")]
    FaceIndexOutOfRange { index: u32, nb_vertices: usize },

    #[error("the render mode is incorrect: {0}")]
    InvalidRenderMode(String),

    #[error("this mesh does not have any vertex")]
    MissingVertices,

    #[error("the faces must be set before computing face geometry or unique edges")]
    MissingFaces,

    #[error("a camera must be set")]
    MissingCamera,

    #[error("a scene must be set")]
    MissingScene,

    #[error("the illuminated position is mandatory to compute the light with PointLight")]
    MissingIlluminatedPosition,

    #[error("the illuminated normal is mandatory to compute the light with PointLight")]
    MissingIlluminatedNormal,

    #[error("the camera position is required to compute the specularity")]
    MissingCameraPosition,

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("failed to parse OBJ: {0}")]
    ObjParse(String),

    #[error("failed to parse STL: {0}")]
    StlParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for svgl-core operations.
pub type Result<T> = std::result::Result<T, SvglError>;
