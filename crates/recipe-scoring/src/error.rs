//! Scoring error types.

use recipe_embeddings::EmbeddingError;
use thiserror::Error;

/// Errors that can occur while scoring recipes.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Embedding comparison failed (vector length mismatch)
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Weights violate the scoring invariants
    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),
}
