//! End-to-end test infrastructure for the recipe recommender.
//!
//! Provides a sample pantry and helpers for building services and
//! recipe catalog files.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use recipe_embeddings::IngredientEmbedder;
use recipe_scoring::RecipeScorer;
use recipe_service::{RecommendationService, StaticRecipeSource};
use recipe_types::{EmbeddingSettings, Recipe, Settings};

/// Owned strings from string literals.
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A small, varied recipe set.
///
/// Covers a perfect mirepoix match, single-word vs multi-word ingredients,
/// a recipe with no ingredients, a recipe with repeated ingredients and a
/// substring trap ("licorice" vs "rice").
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("soup", "Vegetable Soup", strings(&["carrot", "celery", "onion"]))
            .with_cook_time(45)
            .with_servings(4),
        Recipe::new(
            "stir-fry",
            "Chicken Stir Fry",
            strings(&["chicken breast", "soy sauce", "garlic"]),
        )
        .with_cuisine("Chinese"),
        Recipe::new(
            "salad",
            "Greek Salad",
            strings(&["tomato", "feta cheese", "olives"]),
        )
        .with_cuisine("Greek"),
        Recipe::new("toast", "Cheese Toast", strings(&["bread", "cheese", "butter"])),
        Recipe::new("candy", "Licorice Twists", strings(&["licorice", "sugar"])),
        Recipe::new(
            "garlic-rice",
            "Garlic Rice",
            strings(&["rice", "garlic", "garlic", "butter"]),
        ),
        Recipe::new("empty", "Mystery Dish", vec![]),
    ]
}

/// Service over the sample recipes with the hash embedder only.
pub fn fallback_service() -> RecommendationService {
    service_with(Arc::new(IngredientEmbedder::fallback_only()), sample_recipes())
}

/// Service over the given recipes with the given embedder and default weights.
pub fn service_with(embedder: Arc<IngredientEmbedder>, recipes: Vec<Recipe>) -> RecommendationService {
    let scorer = RecipeScorer::with_defaults(embedder);
    RecommendationService::new(scorer, Arc::new(StaticRecipeSource::new(recipes)), 20)
}

/// Settings pointing the remote embedder at a test server.
pub fn remote_settings(base_url: &str) -> Settings {
    Settings {
        embedding: EmbeddingSettings {
            api_key: Some("sk-e2e".to_string()),
            api_base_url: base_url.to_string(),
            timeout_ms: 2_000,
            max_retries: 1,
            cache_enabled: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Remote-backed embedder with a short per-call timeout.
pub fn remote_embedder(base_url: &str, timeout: Duration) -> IngredientEmbedder {
    let settings = remote_settings(base_url);
    let mut embedding = settings.embedding;
    embedding.timeout_ms = timeout.as_millis() as u64;
    IngredientEmbedder::from_settings(&embedding)
}

/// Write recipes to a temporary JSON catalog file.
pub fn write_recipes_file(recipes: &[Recipe]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let json = serde_json::to_string(recipes).expect("Failed to serialize recipes");
    file.write_all(json.as_bytes())
        .expect("Failed to write recipes");
    file
}
