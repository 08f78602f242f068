//! Matrix shape error types.

use thiserror::Error;

/// Errors raised while validating probability matrix input.
///
/// Shape errors are fatal to the whole pipeline: no meaningful graph can
/// be built from a malformed matrix, so these abort rather than degrade.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// Matrix has zero rows or zero columns
    #[error("Probability matrix has no rows or no columns")]
    EmptyMatrix,

    /// Probability vectors in one analysis disagree on topic count
    #[error("Probability vector length mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}
