//! Fail-open embedding selection.
//!
//! - Remote service used only when configured
//! - Any remote failure (error, timeout, bad response) falls back to the hash embedder
//! - Optional memoisation keyed by the exact input text
//! - Counters record which path served each call

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

use recipe_types::EmbeddingSettings;

use crate::hash::HashEmbedder;
use crate::model::{Embedder, Embedding, EmbeddingSource};
use crate::remote::{RemoteEmbedder, RemoteEmbedderConfig};

/// Counters for embedding source selection.
#[derive(Debug, Default)]
pub struct EmbeddingMetrics {
    pub served_remote: AtomicU64,
    pub fallback_unconfigured: AtomicU64,
    pub fallback_error: AtomicU64,
    pub fallback_timeout: AtomicU64,
    pub cache_hits: AtomicU64,
}

impl EmbeddingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all counts as a snapshot.
    pub fn snapshot(&self) -> EmbeddingMetricsSnapshot {
        EmbeddingMetricsSnapshot {
            served_remote: self.served_remote.load(Ordering::Relaxed),
            fallback_unconfigured: self.fallback_unconfigured.load(Ordering::Relaxed),
            fallback_error: self.fallback_error.load(Ordering::Relaxed),
            fallback_timeout: self.fallback_timeout.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of embedding metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingMetricsSnapshot {
    pub served_remote: u64,
    pub fallback_unconfigured: u64,
    pub fallback_error: u64,
    pub fallback_timeout: u64,
    pub cache_hits: u64,
}

impl EmbeddingMetricsSnapshot {
    /// Calls served by the hash embedder.
    pub fn total_fallback(&self) -> u64 {
        self.fallback_unconfigured + self.fallback_error + self.fallback_timeout
    }

    /// Calls that computed a fresh embedding.
    pub fn total_computed(&self) -> u64 {
        self.served_remote + self.total_fallback()
    }
}

/// Embedder that never fails.
///
/// Tries the remote strategy when present, otherwise (or on any failure)
/// uses the deterministic hash strategy.
pub struct IngredientEmbedder {
    remote: Option<Arc<dyn Embedder>>,
    fallback: HashEmbedder,
    timeout: Duration,
    cache: Option<DashMap<String, Embedding>>,
    metrics: Arc<EmbeddingMetrics>,
}

impl IngredientEmbedder {
    /// Create a new embedder.
    pub fn new(remote: Option<Arc<dyn Embedder>>, timeout: Duration, cache_enabled: bool) -> Self {
        Self {
            remote,
            fallback: HashEmbedder::new(),
            timeout,
            cache: cache_enabled.then(DashMap::new),
            metrics: Arc::new(EmbeddingMetrics::new()),
        }
    }

    /// Hash-only embedder, no cache.
    pub fn fallback_only() -> Self {
        Self::new(None, Duration::from_secs(1), false)
    }

    /// Select strategies from settings.
    pub fn from_settings(settings: &EmbeddingSettings) -> Self {
        let remote = RemoteEmbedderConfig::from_settings(settings)
            .map(|config| Arc::new(RemoteEmbedder::new(config)) as Arc<dyn Embedder>);

        debug!(
            remote = remote.is_some(),
            cache = settings.cache_enabled,
            "Embedding strategy selected"
        );

        Self::new(
            remote,
            Duration::from_millis(settings.timeout_ms),
            settings.cache_enabled,
        )
    }

    /// Get metrics for this embedder.
    pub fn metrics(&self) -> Arc<EmbeddingMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Whether a remote strategy is configured.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Number of memoised texts.
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map(DashMap::len).unwrap_or(0)
    }

    /// Embed an ingredient list, joined with ", ".
    pub async fn embed_ingredients(&self, ingredients: &[String]) -> Embedding {
        self.embed(&ingredients.join(", ")).await
    }

    /// Embed text. Never fails.
    pub async fn embed(&self, text: &str) -> Embedding {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(text) {
                self.metrics.cache_hits.fetch_add(1, Ordering::Relaxed);
                return hit.clone();
            }
        }

        let embedding = self.compute(text).await;

        // Fallbacks caused by a remote failure are not memoised, so a
        // recovered service is used on the next call.
        let preferred = if self.remote.is_some() {
            EmbeddingSource::Remote
        } else {
            EmbeddingSource::Hash
        };
        if let Some(cache) = &self.cache {
            if embedding.source == preferred {
                cache.insert(text.to_string(), embedding.clone());
            }
        }

        embedding
    }

    async fn compute(&self, text: &str) -> Embedding {
        let remote = match &self.remote {
            Some(r) => r,
            None => {
                self.metrics
                    .fallback_unconfigured
                    .fetch_add(1, Ordering::Relaxed);
                return self.fallback.embed_text(text);
            }
        };

        let start = Instant::now();

        match timeout(self.timeout, remote.embed(text)).await {
            Ok(Ok(embedding)) => {
                self.metrics.served_remote.fetch_add(1, Ordering::Relaxed);
                debug!(
                    elapsed_ms = start.elapsed().as_millis(),
                    source = %embedding.source,
                    "Remote embedding served"
                );
                embedding
            }
            Ok(Err(e)) => {
                self.metrics.fallback_error.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "Remote embedding failed, using hash fallback");
                self.fallback.embed_text(text)
            }
            Err(_) => {
                self.metrics.fallback_timeout.fetch_add(1, Ordering::Relaxed);
                warn!(
                    timeout_ms = self.timeout.as_millis(),
                    "Remote embedding timed out, using hash fallback"
                );
                self.fallback.embed_text(text)
            }
        }
    }
}
