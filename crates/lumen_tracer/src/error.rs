//! Scene configuration errors.

use lumen_core::{DescriptionError, MeshError};
use thiserror::Error;

/// Errors raised while configuring a scene. Rendering itself cannot fail.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Transparent material needs a positive refractive index, got {0}")]
    InvalidRefractiveIndex(f64),

    #[error("Material {name} must be finite and non-negative, got {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },

    #[error("Invalid {shape}: {reason}")]
    InvalidGeometry { shape: &'static str, reason: String },

    #[error("Supersampling factor must be at least 1")]
    InvalidSupersampling,

    #[error("Scene cannot be modified after rendering has started")]
    Frozen,

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Description error: {0}")]
    Description(#[from] DescriptionError),
}

/// Result type for scene configuration.
pub type SceneResult<T> = Result<T, SceneError>;
