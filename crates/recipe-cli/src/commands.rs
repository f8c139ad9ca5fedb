//! Command implementations for the recipe recommender.
//!
//! Handlers return the text to print; `main` owns stdout.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::info;

use recipe_scoring::filter_and_sort_json;
use recipe_service::{IngredientCatalog, JsonFileRecipeSource, RecommendationService};
use recipe_types::{RecipeScore, Settings};

/// Load layered settings and apply CLI overrides.
pub fn load_settings(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }

    Ok(settings)
}

/// Install the global tracing subscriber. Logs go to stderr.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Recommend recipes from a JSON recipe catalog.
pub async fn handle_recommend(
    settings: &Settings,
    ingredients: &[String],
    recipes_override: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<String> {
    let recipes_path = recipes_override
        .map(String::from)
        .or_else(|| settings.recipes_path.clone())
        .ok_or_else(|| anyhow!("No recipe catalog: pass --recipes or set recipes_path"))?;

    let source = Arc::new(JsonFileRecipeSource::new(&recipes_path));
    let mut service = RecommendationService::from_settings(settings, source)
        .context("Failed to build recommendation service")?;
    if let Some(limit) = limit {
        service = service.with_max_results(limit);
    }

    let results = service
        .generate_recipe_recommendations(ingredients)
        .await
        .with_context(|| format!("Failed to recommend from {recipes_path}"))?;

    let metrics = service.embedding_metrics();
    info!(
        remote = metrics.served_remote,
        fallback = metrics.total_fallback(),
        cache_hits = metrics.cache_hits,
        "Embedding usage"
    );

    if json {
        Ok(serde_json::to_string_pretty(&results)?)
    } else {
        Ok(render_recommendations(&results))
    }
}

/// Filter and sort a JSON array of heterogeneous scored results.
pub fn handle_rank(file: &str) -> Result<String> {
    let text = std::fs::read_to_string(file).with_context(|| format!("Failed to read {file}"))?;
    let document: Value =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {file}"))?;

    let ranked = filter_and_sort_json(&document);
    Ok(serde_json::to_string_pretty(&ranked)?)
}

/// Autocomplete an ingredient name from the catalog.
pub fn handle_suggest(
    settings: &Settings,
    prefix: &str,
    ingredients_override: Option<&str>,
    limit: usize,
) -> Result<String> {
    let path = ingredients_override
        .map(String::from)
        .or_else(|| settings.ingredients_path.clone())
        .ok_or_else(|| anyhow!("No ingredient catalog: pass --ingredients or set ingredients_path"))?;

    let catalog = IngredientCatalog::from_file(&path)
        .with_context(|| format!("Failed to load ingredient catalog {path}"))?;

    Ok(catalog.suggest(prefix, limit).join("\n"))
}

/// Human-readable result list.
pub fn render_recommendations(results: &[RecipeScore]) -> String {
    if results.is_empty() {
        return "No matching recipes.".to_string();
    }

    let mut out = String::new();
    for (rank, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({:.0}% match, {}/{} ingredients)",
            rank + 1,
            result.recipe.name,
            result.ranking_score() * 100.0,
            result.matched_ingredients.len(),
            result.recipe.ingredient_count(),
        );
        if !result.missing_ingredients.is_empty() {
            let _ = writeln!(out, "   missing: {}", result.missing_ingredients.join(", "));
        }
    }

    out.trim_end().to_string()
}
