//! Recommendation entry point.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use recipe_embeddings::{EmbeddingMetricsSnapshot, IngredientEmbedder};
use recipe_scoring::{filter_and_sort_recipes, RecipeScorer};
use recipe_types::{RecipeScore, Settings};
use serde_json::Value;

use crate::error::ServiceError;
use crate::source::RecipeSource;
use crate::validation::{clean_ingredients, validate_ingredient_payload};

/// Turns a user's ingredients into ranked recipe scores.
pub struct RecommendationService {
    embedder: Arc<IngredientEmbedder>,
    scorer: RecipeScorer,
    source: Arc<dyn RecipeSource>,
    max_results: usize,
}

impl RecommendationService {
    pub fn new(scorer: RecipeScorer, source: Arc<dyn RecipeSource>, max_results: usize) -> Self {
        Self {
            embedder: Arc::clone(scorer.embedder()),
            scorer,
            source,
            max_results: max_results.max(1),
        }
    }

    /// Wire the embedder and scorer from settings.
    pub fn from_settings(settings: &Settings, source: Arc<dyn RecipeSource>) -> Result<Self, ServiceError> {
        let embedder = Arc::new(IngredientEmbedder::from_settings(&settings.embedding));
        let scorer = RecipeScorer::new(embedder, settings.scoring)?;
        Ok(Self::new(scorer, source, settings.max_results))
    }

    /// Override the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Embedding source counters since construction.
    pub fn embedding_metrics(&self) -> EmbeddingMetricsSnapshot {
        self.embedder.metrics().snapshot()
    }

    /// Rank candidate recipes for the given ingredients.
    ///
    /// Blank entries are dropped; an empty remainder gives an empty result.
    /// Recipes sharing no ingredient with the user are not returned.
    pub async fn generate_recipe_recommendations(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeScore>, ServiceError> {
        let user_ingredients = clean_ingredients(ingredients);
        if user_ingredients.is_empty() {
            debug!("No usable ingredients, nothing to recommend");
            return Ok(Vec::new());
        }

        let start = Instant::now();

        let candidates = self.source.fetch_candidates(&user_ingredients).await?;
        if candidates.is_empty() {
            debug!(source = self.source.name(), "Recipe source returned no candidates");
            return Ok(Vec::new());
        }

        let user_embedding = self.embedder.embed_ingredients(&user_ingredients).await;

        let scored = join_all(
            candidates
                .iter()
                .map(|recipe| self.scorer.score(recipe, &user_ingredients, &user_embedding)),
        )
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

        let mut ranked = filter_and_sort_recipes(Some(scored.as_slice()));
        ranked.truncate(self.max_results);

        info!(
            ingredients = user_ingredients.len(),
            candidates = candidates.len(),
            results = ranked.len(),
            embedding = %user_embedding.source,
            elapsed_ms = start.elapsed().as_millis(),
            "Recommendations generated"
        );

        Ok(ranked)
    }

    /// Validate a raw JSON payload, then recommend.
    pub async fn recommend_from_payload(&self, payload: &Value) -> Result<Vec<RecipeScore>, ServiceError> {
        let ingredients = validate_ingredient_payload(payload)?;
        self.generate_recipe_recommendations(&ingredients).await
    }
}
