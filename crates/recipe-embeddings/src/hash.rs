//! Deterministic structural embedding.
//!
//! Every character of every word contributes sine/cosine terms at three
//! hashed dimensions, so lists that share a few letters still land far
//! apart. Same text always yields the same vector.

use async_trait::async_trait;
use tracing::trace;

use crate::error::EmbeddingError;
use crate::model::{Embedder, Embedding, EmbeddingSource, EMBEDDING_DIM};

/// Number of leading and trailing dimensions that carry word-count and
/// word-length signal.
const STRUCTURAL_DIMS: usize = 8;

/// Below this magnitude the accumulated vector is treated as empty.
const MIN_MAGNITUDE: f32 = 1e-10;

/// Hash-based embedder with no external dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashEmbedder;

impl HashEmbedder {
    pub fn new() -> Self {
        Self
    }

    /// Embed text synchronously.
    pub fn embed_text(&self, text: &str) -> Embedding {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let mut values = vec![0.0f32; EMBEDDING_DIM];
        accumulate_characters(&words, &mut values);
        accumulate_structure(&words, &mut values);

        let magnitude = l2_norm(&values);
        if magnitude < MIN_MAGNITUDE {
            trace!(text_len = text.len(), "Hash embedding degenerate, seeding from text hash");
            values = seeded_vector(text);
        }

        // Embedding::new leaves an all-zero vector untouched.
        Embedding::new(values, EmbeddingSource::Hash)
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn source(&self) -> EmbeddingSource {
        EmbeddingSource::Hash
    }

    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        Ok(self.embed_text(text))
    }
}

fn accumulate_characters(words: &[&str], values: &mut [f32]) {
    let dim = values.len() as u64;

    for (wi, word) in words.iter().enumerate() {
        let word_idx = wi as u64;
        let char_count = word.chars().count();
        let word_weight = 1.0 / (1.0 + wi as f32 * 0.1);
        let length_weight = 1.0 + char_count as f32 * 0.02;

        for (ci, ch) in word.chars().enumerate() {
            let code = u64::from(ch);
            let pos = ci as u64;

            let d1 = (code.wrapping_mul(31) ^ pos.wrapping_mul(17) ^ word_idx.wrapping_mul(13)) % dim;
            let d2 = (code.wrapping_mul(131)
                ^ (pos + 1).wrapping_mul(29)
                ^ (word_idx + 1).wrapping_mul(97))
                % dim;
            let d3 = (code.wrapping_mul(7919)
                ^ (pos + 3).wrapping_mul(53)
                ^ (word_idx + 7).wrapping_mul(211))
                % dim;

            let char_weight = 1.0 / (1.0 + ci as f32 * 0.05);
            let scale = word_weight * char_weight * length_weight;
            let phase = code as f32 * 0.1 + ci as f32 * 0.7 + wi as f32 * 1.3;

            values[d1 as usize] += phase.sin() * scale;
            values[d2 as usize] += phase.cos() * scale;
            values[d3 as usize] += (phase * 0.5).sin() * scale * 0.5;
        }
    }
}

fn accumulate_structure(words: &[&str], values: &mut [f32]) {
    if words.is_empty() {
        return;
    }

    let word_count = words.len() as f32;
    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let avg_len = total_chars as f32 / word_count;
    let last = values.len() - 1;

    for i in 0..STRUCTURAL_DIMS {
        values[i] += (word_count * 0.3 + i as f32).sin() * 0.1;
        values[last - i] += (avg_len * 0.2 + i as f32).cos() * 0.1;
    }
}

fn seeded_vector(text: &str) -> Vec<f32> {
    let hash = text
        .bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));

    (0..EMBEDDING_DIM)
        .map(|i| {
            let seed = hash.wrapping_add((i as u32).wrapping_mul(2_654_435_761)) % 10_007;
            (seed as f32 * 0.01 + i as f32 * 0.618).sin()
        })
        .collect()
}

fn l2_norm(values: &[f32]) -> f32 {
    values.iter().map(|x| x * x).sum::<f32>().sqrt()
}
