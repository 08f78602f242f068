//! Network construction error types.

use thiserror::Error;

use frames_types::MatrixError;

/// Errors that can occur while aggregating rows or building the graph.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Matrix shape error
    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),
}
