//! # recipe-embeddings
//!
//! Vector embeddings for ingredient lists.
//!
//! Two strategies share the [`Embedder`] trait:
//! - [`RemoteEmbedder`]: an OpenAI-compatible embedding service (384 dimensions)
//! - [`HashEmbedder`]: a deterministic structural hash, used when no service
//!   is configured or the service fails
//!
//! [`IngredientEmbedder`] selects between them per call and never fails.
//! The fallback embedding is a best-effort deterministic substitute for a
//! semantic embedding. It separates different ingredient lists but carries
//! no semantic meaning.

pub mod error;
pub mod fallback;
pub mod hash;
pub mod model;
pub mod remote;
pub mod similarity;

pub use error::EmbeddingError;
pub use fallback::{EmbeddingMetrics, EmbeddingMetricsSnapshot, IngredientEmbedder};
pub use hash::HashEmbedder;
pub use model::{Embedder, Embedding, EmbeddingSource, EMBEDDING_DIM};
pub use remote::{RemoteEmbedder, RemoteEmbedderConfig};
pub use similarity::{clamped_similarity, cosine_similarity};
