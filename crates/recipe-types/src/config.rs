//! Configuration loading for the recipe recommender.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/recipe-recommender/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::RecipeError;

/// Weights combining the four recipe metrics into one score.
///
/// Invariants: every weight is non-negative, the weights sum to 1.0 and
/// `match_rate` is the highest (or tied-highest) weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for embedding similarity
    #[serde(default = "default_similarity_weight")]
    pub similarity: f32,

    /// Weight for the fraction of user ingredients the recipe uses
    #[serde(default = "default_match_rate_weight")]
    pub match_rate: f32,

    /// Weight for the fraction of recipe ingredients the user has
    #[serde(default = "default_utilization_weight")]
    pub utilization: f32,

    /// Weight for strict matches, normalized by recipe ingredient count
    #[serde(default = "default_exact_weight")]
    pub exact: f32,
}

fn default_similarity_weight() -> f32 {
    0.25
}

fn default_match_rate_weight() -> f32 {
    0.40
}

fn default_utilization_weight() -> f32 {
    0.15
}

fn default_exact_weight() -> f32 {
    0.20
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity: default_similarity_weight(),
            match_rate: default_match_rate_weight(),
            utilization: default_utilization_weight(),
            exact: default_exact_weight(),
        }
    }
}

impl ScoringWeights {
    /// Validate weight values.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("similarity", self.similarity),
            ("match_rate", self.match_rate),
            ("utilization", self.utilization),
            ("exact", self.exact),
        ];

        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(format!("{name} weight must be a non-negative number, got {w}"));
            }
        }

        let sum: f32 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > 1e-4 {
            return Err(format!("weights must sum to 1.0, got {sum}"));
        }

        if weights.iter().any(|(_, w)| *w > self.match_rate) {
            return Err("match_rate must be the highest weight".to_string());
        }

        Ok(())
    }
}

/// Embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// API key. When absent the deterministic fallback embedder is used.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (OpenAI-compatible)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Maximum time for one remote embedding call (ms).
    /// If exceeded, the fallback embedding is used.
    #[serde(default = "default_embedding_timeout")]
    pub timeout_ms: u64,

    /// Maximum attempts against the remote service
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Memoise embeddings by exact text
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_timeout() -> u64 {
    3000
}

fn default_max_retries() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            model: default_embedding_model(),
            timeout_ms: default_embedding_timeout(),
            max_retries: default_max_retries(),
            cache_enabled: true,
        }
    }
}

impl EmbeddingSettings {
    /// Whether a remote embedding service is configured.
    pub fn remote_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be > 0".to_string());
        }
        if self.api_base_url.trim().is_empty() {
            return Err("api_base_url must not be empty".to_string());
        }
        Ok(())
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path to the local recipe catalog (JSON array of recipes)
    #[serde(default)]
    pub recipes_path: Option<String>,

    /// Path to the ingredient catalog (JSON array of names)
    #[serde(default)]
    pub ingredients_path: Option<String>,

    /// Maximum number of recommendations returned
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Embedding configuration
    #[serde(default)]
    pub embedding: EmbeddingSettings,

    /// Scoring weights
    #[serde(default)]
    pub scoring: ScoringWeights,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_results() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            recipes_path: None,
            ingredients_path: None,
            max_results: default_max_results(),
            embedding: EmbeddingSettings::default(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/recipe-recommender/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (RECIPE_*, nested keys split on `__`)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, RecipeError> {
        let config_dir = ProjectDirs::from("", "", "recipe-recommender")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("log_level", default_log_level())
            .map_err(|e| RecipeError::Config(e.to_string()))?
            .set_default("max_results", default_max_results() as i64)
            .map_err(|e| RecipeError::Config(e.to_string()))?
            .set_default("embedding.api_base_url", default_api_base_url())
            .map_err(|e| RecipeError::Config(e.to_string()))?
            .set_default("embedding.model", default_embedding_model())
            .map_err(|e| RecipeError::Config(e.to_string()))?
            .set_default("embedding.timeout_ms", default_embedding_timeout() as i64)
            .map_err(|e| RecipeError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: RECIPE_LOG_LEVEL, RECIPE_EMBEDDING__API_KEY, RECIPE_SCORING__EXACT, etc.
        builder = builder.add_source(
            Environment::with_prefix("RECIPE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| RecipeError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| RecipeError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate nested sections.
    pub fn validate(&self) -> Result<(), RecipeError> {
        self.scoring
            .validate()
            .map_err(|e| RecipeError::Config(format!("scoring: {e}")))?;
        self.embedding
            .validate()
            .map_err(|e| RecipeError::Config(format!("embedding: {e}")))?;
        if self.max_results == 0 {
            return Err(RecipeError::Config("max_results must be > 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.max_results, 20);
        assert!(!settings.embedding.remote_configured());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_weights_valid() {
        let weights = ScoringWeights::default();
        assert!(weights.validate().is_ok());
        assert!(weights.match_rate >= weights.similarity);
        assert!(weights.match_rate >= weights.utilization);
        assert!(weights.match_rate >= weights.exact);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = ScoringWeights {
            similarity: 0.5,
            match_rate: 0.5,
            utilization: 0.5,
            exact: 0.0,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_weights_match_rate_dominant() {
        let weights = ScoringWeights {
            similarity: 0.45,
            match_rate: 0.35,
            utilization: 0.10,
            exact: 0.10,
        };
        let err = weights.validate().unwrap_err();
        assert!(err.contains("match_rate"));
    }

    #[test]
    fn test_weights_reject_negative() {
        let weights = ScoringWeights {
            similarity: -0.1,
            match_rate: 0.6,
            utilization: 0.3,
            exact: 0.2,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_remote_configured_ignores_blank_key() {
        let settings = EmbeddingSettings {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!settings.remote_configured());

        let settings = EmbeddingSettings {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(settings.remote_configured());
    }

    #[test]
    fn test_embedding_validation() {
        let mut settings = EmbeddingSettings::default();
        assert!(settings.validate().is_ok());

        settings.timeout_ms = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_cli_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "max_results = 5\n\n[embedding]\nmodel = \"custom-model\"\n\n[scoring]\nsimilarity = 0.2\nmatch_rate = 0.5\nutilization = 0.1\nexact = 0.2"
        )
        .unwrap();

        let settings = Settings::load(Some(&file.path().to_string_lossy())).unwrap();
        assert_eq!(settings.max_results, 5);
        assert_eq!(settings.embedding.model, "custom-model");
        assert!((settings.scoring.match_rate - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let decoded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.max_results, settings.max_results);
        assert_eq!(decoded.scoring, settings.scoring);
    }
}
