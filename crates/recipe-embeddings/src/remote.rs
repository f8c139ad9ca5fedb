//! Remote embedding service client (OpenAI-compatible endpoints).

use async_trait::async_trait;
use backoff::{backoff::Backoff, ExponentialBackoff};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, error, warn};

use recipe_types::EmbeddingSettings;

use crate::error::EmbeddingError;
use crate::model::{Embedder, Embedding, EmbeddingSource, EMBEDDING_DIM};

/// Configuration for the remote embedder.
#[derive(Debug, Clone)]
pub struct RemoteEmbedderConfig {
    /// API base URL (e.g., "https://api.openai.com/v1")
    pub base_url: String,

    /// Model to use (e.g., "text-embedding-3-small")
    pub model: String,

    /// API key
    pub api_key: SecretString,

    /// Per-request timeout
    pub timeout: Duration,

    /// Maximum attempts on retryable failures
    pub max_retries: u32,
}

impl RemoteEmbedderConfig {
    /// Create config for the OpenAI embeddings API.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: model.into(),
            api_key: SecretString::from(api_key.into()),
            timeout: Duration::from_secs(3),
            max_retries: 2,
        }
    }

    /// Build from settings. Returns `None` when no API key is configured.
    pub fn from_settings(settings: &EmbeddingSettings) -> Option<Self> {
        if !settings.remote_configured() {
            return None;
        }
        let api_key = settings.api_key.as_deref()?.trim().to_string();

        Some(Self {
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: SecretString::from(api_key),
            timeout: Duration::from_millis(settings.timeout_ms),
            max_retries: settings.max_retries.max(1),
        })
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
    dimensions: usize,
    encoding_format: &'static str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedder backed by a remote service.
///
/// The HTTP client is built on first use, so a misconfigured client never
/// fails construction.
pub struct RemoteEmbedder {
    client: OnceCell<Client>,
    config: RemoteEmbedderConfig,
}

impl RemoteEmbedder {
    /// Create a new remote embedder.
    pub fn new(config: RemoteEmbedderConfig) -> Self {
        Self {
            client: OnceCell::new(),
            config,
        }
    }

    /// Get configuration.
    pub fn config(&self) -> &RemoteEmbedderConfig {
        &self.config
    }

    async fn client(&self) -> Result<&Client, EmbeddingError> {
        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .timeout(self.config.timeout)
                    .build()
                    .map_err(|e| EmbeddingError::Config(e.to_string()))
            })
            .await
    }

    /// Call the API with retry logic.
    async fn call_api(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut backoff = ExponentialBackoff {
            initial_interval: Duration::from_millis(100),
            max_elapsed_time: Some(self.config.timeout * self.config.max_retries.max(1)),
            ..Default::default()
        };

        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(attempt = attempts, model = %self.config.model, "Calling embedding API");

            match self.make_request(text).await {
                Ok(values) => return Ok(values),
                Err(e) => {
                    if !e.is_retryable() || attempts >= self.config.max_retries {
                        error!(error = %e, attempts, "Embedding request failed");
                        return Err(e);
                    }

                    match backoff.next_backoff() {
                        Some(duration) => {
                            warn!(
                                error = %e,
                                retry_in_ms = duration.as_millis(),
                                "Embedding call failed, retrying"
                            );
                            tokio::time::sleep(duration).await;
                        }
                        None => {
                            error!(error = %e, "Backoff exhausted");
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    /// Make a single API request.
    async fn make_request(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let client = self.client().await?;

        let request = EmbeddingRequest {
            input: text,
            model: &self.config.model,
            dimensions: EMBEDDING_DIM,
            encoding_format: "float",
        };

        let url = format!("{}/embeddings", self.config.base_url);

        let response = client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout
                } else {
                    EmbeddingError::Api(e.to_string())
                }
            })?;

        if response.status() == 429 {
            return Err(EmbeddingError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!("HTTP {}: {}", status, body)));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Parse(e.to_string()))?;

        let values = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::Parse("No data in response".to_string()))?;

        if values.len() != EMBEDDING_DIM {
            return Err(EmbeddingError::DimensionMismatch {
                expected: EMBEDDING_DIM,
                actual: values.len(),
            });
        }

        Ok(values)
    }
}

#[async_trait]
impl Embedder for RemoteEmbedder {
    fn source(&self) -> EmbeddingSource {
        EmbeddingSource::Remote
    }

    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let values = self.call_api(text).await?;
        Ok(Embedding::from_raw(values, EmbeddingSource::Remote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> RemoteEmbedderConfig {
        RemoteEmbedderConfig {
            base_url,
            model: "test-model".to_string(),
            api_key: SecretString::from("sk-test".to_string()),
            timeout: Duration::from_secs(2),
            max_retries: 1,
        }
    }

    #[test]
    fn test_openai_config() {
        let config = RemoteEmbedderConfig::openai("key", "text-embedding-3-small");
        assert!(config.base_url.contains("openai"));
        assert_eq!(config.model, "text-embedding-3-small");
    }

    #[test]
    fn test_from_settings_requires_key() {
        let settings = EmbeddingSettings::default();
        assert!(RemoteEmbedderConfig::from_settings(&settings).is_none());

        let settings = EmbeddingSettings {
            api_key: Some("sk-abc".to_string()),
            api_base_url: "http://localhost:9999/v1/".to_string(),
            timeout_ms: 500,
            max_retries: 0,
            ..Default::default()
        };
        let config = RemoteEmbedderConfig::from_settings(&settings).unwrap();
        assert_eq!(config.base_url, "http://localhost:9999/v1");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.max_retries, 1);
    }

    #[tokio::test]
    async fn test_embed_success_returns_vector_unchanged() {
        let server = MockServer::start().await;
        let vector: Vec<f32> = (0..EMBEDDING_DIM).map(|i| i as f32).collect();

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "embedding": vector }] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let embedder = RemoteEmbedder::new(test_config(server.uri()));
        let emb = embedder.embed("chicken, garlic").await.unwrap();

        assert_eq!(emb.source, EmbeddingSource::Remote);
        assert_eq!(emb.dimension(), EMBEDDING_DIM);
        assert_eq!(emb.values[10], 10.0);
    }

    #[tokio::test]
    async fn test_embed_wrong_dimension() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": [{ "embedding": [0.1, 0.2, 0.3] }] })),
            )
            .mount(&server)
            .await;

        let embedder = RemoteEmbedder::new(test_config(server.uri()));
        let err = embedder.embed("rice").await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: EMBEDDING_DIM,
                actual: 3
            }
        ));
    }

    #[tokio::test]
    async fn test_embed_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let embedder = RemoteEmbedder::new(test_config(server.uri()));
        let err = embedder.embed("rice").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::RateLimited));
    }

    #[tokio::test]
    async fn test_embed_retries_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&server)
            .await;

        let mut config = test_config(server.uri());
        config.max_retries = 2;
        let embedder = RemoteEmbedder::new(config);

        let err = embedder.embed("rice").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Api(ref msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_embed_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let embedder = RemoteEmbedder::new(test_config(server.uri()));
        let err = embedder.embed("rice").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Parse(_)));
    }
}
