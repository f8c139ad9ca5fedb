//! Embedding trait and types.
//!
//! Defines the interface for generating vector embeddings from text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;
use crate::similarity::cosine_similarity;

/// Embedding dimension shared by every strategy.
pub const EMBEDDING_DIM: usize = 384;

/// Which strategy produced an embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingSource {
    /// External embedding service
    Remote,
    /// Deterministic structural hash
    Hash,
}

impl std::fmt::Display for EmbeddingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingSource::Remote => write!(f, "remote"),
            EmbeddingSource::Hash => write!(f, "hash"),
        }
    }
}

/// Vector embedding tagged with the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
    pub source: EmbeddingSource,
}

impl Embedding {
    /// Create a new embedding, normalizing to unit length.
    /// A zero vector is kept as-is.
    pub fn new(values: Vec<f32>, source: EmbeddingSource) -> Self {
        let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
        let normalized = if norm > 0.0 {
            values.iter().map(|x| x / norm).collect()
        } else {
            values
        };
        Self {
            values: normalized,
            source,
        }
    }

    /// Create embedding without normalization (vectors returned by a service
    /// are used unchanged)
    pub fn from_raw(values: Vec<f32>, source: EmbeddingSource) -> Self {
        Self { values, source }
    }

    /// Get the embedding dimension
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Euclidean norm of the vector.
    pub fn magnitude(&self) -> f32 {
        self.values.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Compute cosine similarity with another embedding.
    pub fn cosine_similarity(&self, other: &Embedding) -> Result<f32, EmbeddingError> {
        cosine_similarity(&self.values, &other.values)
    }
}

/// Trait for embedding strategies.
///
/// Implementations must be thread-safe (Send + Sync) for concurrent use.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Strategy tag recorded on every embedding this produces.
    fn source(&self) -> EmbeddingSource;

    /// Generate embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;
}
