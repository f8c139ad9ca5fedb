//! Embedding error types.

use thiserror::Error;

/// Errors that can occur during embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Remote request failed (network, auth, non-success status)
    #[error("Embedding API request failed: {0}")]
    Api(String),

    /// Remote response could not be decoded
    #[error("Failed to parse embedding response: {0}")]
    Parse(String),

    /// Remote service returned HTTP 429
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Remote call exceeded its deadline
    #[error("Timeout waiting for embedding")]
    Timeout,

    /// Vectors of different lengths were compared
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl EmbeddingError {
    /// Whether another attempt against the remote service may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EmbeddingError::Api(_) | EmbeddingError::RateLimited)
    }
}
