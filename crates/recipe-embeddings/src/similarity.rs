//! Vector similarity functions.

use crate::error::EmbeddingError;

/// Calculate cosine similarity between two vectors.
///
/// Returns a value in [-1.0, 1.0], or 0.0 when either vector has zero
/// magnitude. Vectors of different lengths are rejected.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (norm_a * norm_b))
}

/// Cosine similarity clamped to [0.0, 1.0].
///
/// Negative similarity counts as no match rather than an anti-match.
pub fn clamped_similarity(a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
    Ok(cosine_similarity(a, b)?.clamp(0.0, 1.0))
}
