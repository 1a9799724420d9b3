//! Error types for phyz-ident.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentError {
    /// Malformed argument: wrong vector length, negative tolerance, no samples.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Trajectory tables disagree in row or column count.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Mechanism model error: {0}")]
    ModelError(#[from] phyz_model::ModelError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IdentError>;
