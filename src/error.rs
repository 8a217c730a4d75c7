//! Error types for the dense-mlp library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Operand shapes violate the operation's shape contract
    #[error("dimension mismatch in {op}: {}x{} vs {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A matrix, network or dataset was described with invalid parameters
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    /// IO error while reading or writing a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        NetworkError::DimensionMismatch { op, left, right }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        NetworkError::InvalidConstruction(msg.into())
    }
}
