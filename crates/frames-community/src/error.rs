//! Community detection error types.

use thiserror::Error;

/// Errors raised by a single community detection algorithm.
///
/// Failures are per-algorithm: the engine catches them into the
/// detection report so the remaining algorithms still produce results.
#[derive(Debug, Error)]
pub enum CommunityError {
    /// Algorithm did not converge within its iteration budget
    #[error("Algorithm did not converge: {0}")]
    NonConvergence(String),

    /// Any other algorithm-specific failure
    #[error("Detection failed: {0}")]
    Detection(String),
}
