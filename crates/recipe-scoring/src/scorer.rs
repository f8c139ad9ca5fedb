//! Weighted recipe scoring.
//!
//! Scoring is total: a recipe sharing nothing with the user still gets a
//! `RecipeScore` (with an empty matched list). Dropping non-matches is the
//! ranker's job.

use std::sync::Arc;
use tracing::trace;

use recipe_embeddings::{Embedding, IngredientEmbedder};
use recipe_types::{Recipe, RecipeScore, ScoringWeights};

use crate::error::ScoringError;
use crate::metrics::{
    calculate_exact_matches, calculate_ingredient_match_rate, calculate_similarity_score,
    calculate_utilization_score, partition_ingredients,
};

/// Scores recipes with a fixed weight vector.
pub struct RecipeScorer {
    embedder: Arc<IngredientEmbedder>,
    weights: ScoringWeights,
}

impl RecipeScorer {
    /// Create a scorer. Rejects weights that break the scoring invariants.
    pub fn new(embedder: Arc<IngredientEmbedder>, weights: ScoringWeights) -> Result<Self, ScoringError> {
        weights.validate().map_err(ScoringError::InvalidWeights)?;
        Ok(Self { embedder, weights })
    }

    /// Create a scorer with the default weights.
    pub fn with_defaults(embedder: Arc<IngredientEmbedder>) -> Self {
        Self {
            embedder,
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn embedder(&self) -> &Arc<IngredientEmbedder> {
        &self.embedder
    }

    /// Score one recipe, embedding its ingredient list first.
    pub async fn score(
        &self,
        recipe: &Recipe,
        user_ingredients: &[String],
        user_embedding: &Embedding,
    ) -> Result<RecipeScore, ScoringError> {
        let recipe_embedding = self.embedder.embed(&recipe.ingredients_text()).await;
        self.score_with_embedding(recipe, user_ingredients, user_embedding, &recipe_embedding)
    }

    /// Score one recipe against precomputed embeddings.
    pub fn score_with_embedding(
        &self,
        recipe: &Recipe,
        user_ingredients: &[String],
        user_embedding: &Embedding,
        recipe_embedding: &Embedding,
    ) -> Result<RecipeScore, ScoringError> {
        let similarity_score = calculate_similarity_score(user_embedding, recipe_embedding)?;
        let ingredient_match_rate =
            calculate_ingredient_match_rate(user_ingredients, &recipe.ingredients);
        let utilization_score = calculate_utilization_score(user_ingredients, &recipe.ingredients);
        let exact_matches = calculate_exact_matches(user_ingredients, &recipe.ingredients);
        let (matched_ingredients, missing_ingredients) =
            partition_ingredients(user_ingredients, &recipe.ingredients);

        let combined_score = self.combine(
            similarity_score,
            ingredient_match_rate,
            utilization_score,
            exact_matches,
            recipe.ingredient_count(),
        );

        trace!(
            recipe_id = %recipe.id,
            similarity = similarity_score,
            match_rate = ingredient_match_rate,
            utilization = utilization_score,
            exact_matches,
            combined = combined_score,
            "Recipe scored"
        );

        Ok(RecipeScore {
            recipe: recipe.clone(),
            similarity_score,
            ingredient_match_rate,
            utilization_score,
            exact_matches,
            combined_score,
            matched_ingredients,
            missing_ingredients,
        })
    }

    /// Weighted sum of the four metrics, clamped to [0, 1].
    pub fn combine(
        &self,
        similarity: f32,
        match_rate: f32,
        utilization: f32,
        exact_matches: usize,
        recipe_ingredient_count: usize,
    ) -> f32 {
        let exact_ratio = exact_matches as f32 / recipe_ingredient_count.max(1) as f32;

        let combined = similarity * self.weights.similarity
            + match_rate * self.weights.match_rate
            + utilization * self.weights.utilization
            + exact_ratio * self.weights.exact;

        combined.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RecipeScorer {
        RecipeScorer::with_defaults(Arc::new(IngredientEmbedder::fallback_only()))
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rejects_invalid_weights() {
        let weights = ScoringWeights {
            similarity: 0.7,
            match_rate: 0.1,
            utilization: 0.1,
            exact: 0.1,
        };
        let result = RecipeScorer::new(Arc::new(IngredientEmbedder::fallback_only()), weights);
        assert!(matches!(result, Err(ScoringError::InvalidWeights(_))));
    }

    #[test]
    fn test_combine_maximum_is_one() {
        let combined = scorer().combine(1.0, 1.0, 1.0, 4, 4);
        assert!((combined - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_combine_capped_at_tolerance_edge() {
        let weights = ScoringWeights {
            similarity: 0.25,
            match_rate: 0.40008,
            utilization: 0.15,
            exact: 0.2,
        };
        let s = RecipeScorer::new(Arc::new(IngredientEmbedder::fallback_only()), weights).unwrap();

        assert_eq!(s.combine(1.0, 1.0, 1.0, 3, 3), 1.0);
        let partial = s.combine(1.0, 0.25, 0.25, 1, 4);
        assert!(partial < 1.0);
    }

    #[tokio::test]
    async fn test_perfect_recipe_ranks_first_at_tolerance_edge() {
        use crate::rank::filter_and_sort_recipes;

        let weights = ScoringWeights {
            similarity: 0.25,
            match_rate: 0.40008,
            utilization: 0.15,
            exact: 0.2,
        };
        let s = RecipeScorer::new(Arc::new(IngredientEmbedder::fallback_only()), weights).unwrap();
        let user = strings(&["carrot", "celery", "onion"]);
        let user_emb = s.embedder().embed_ingredients(&user).await;

        let perfect = Recipe::new("perfect", "Mirepoix", user.clone());
        let partial = Recipe::new("partial", "Stew", strings(&["carrot", "beef", "pork", "salt"]));

        let scores = vec![
            s.score_with_embedding(&partial, &user, &user_emb, &user_emb).unwrap(),
            s.score_with_embedding(&perfect, &user, &user_emb, &user_emb).unwrap(),
        ];
        assert!(scores.iter().all(|r| r.combined_score <= 1.0));

        let ranked = filter_and_sort_recipes(Some(scores.as_slice()));
        let ids: Vec<&str> = ranked.iter().map(|r| r.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["perfect", "partial"]);
    }

    #[test]
    fn test_combine_monotonic() {
        let s = scorer();
        let base = s.combine(0.3, 0.4, 0.5, 1, 4);
        assert!(s.combine(0.4, 0.4, 0.5, 1, 4) >= base);
        assert!(s.combine(0.3, 0.5, 0.5, 1, 4) >= base);
        assert!(s.combine(0.3, 0.4, 0.6, 1, 4) >= base);
        assert!(s.combine(0.3, 0.4, 0.5, 2, 4) >= base);
    }

    #[test]
    fn test_combine_empty_recipe_no_division_by_zero() {
        let combined = scorer().combine(0.0, 0.0, 0.0, 0, 0);
        assert_eq!(combined, 0.0);
    }

    #[tokio::test]
    async fn test_score_perfect_overlap() {
        let s = scorer();
        let user = strings(&["carrot", "celery", "onion"]);
        let recipe = Recipe::new("m1", "Mirepoix", user.clone());
        let user_emb = s.embedder().embed_ingredients(&user).await;

        let score = s.score(&recipe, &user, &user_emb).await.unwrap();

        assert_eq!(score.ingredient_match_rate, 1.0);
        assert_eq!(score.utilization_score, 1.0);
        assert_eq!(score.exact_matches, 3);
        assert!((score.similarity_score - 1.0).abs() < 1e-4);
        assert!((score.combined_score - 1.0).abs() < 1e-3);
        assert!(score.missing_ingredients.is_empty());
    }

    #[tokio::test]
    async fn test_score_single_user_ingredient() {
        let s = scorer();
        let user = strings(&["chicken"]);
        let recipe = Recipe::new(
            "c1",
            "Chicken stir fry",
            strings(&["chicken breast", "soy sauce", "garlic"]),
        );
        let user_emb = s.embedder().embed_ingredients(&user).await;

        let score = s.score(&recipe, &user, &user_emb).await.unwrap();

        assert_eq!(score.ingredient_match_rate, 1.0);
        assert!((score.utilization_score - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(score.exact_matches, 0);
        assert_eq!(score.matched_ingredients, vec!["chicken breast"]);
        assert_eq!(score.missing_ingredients, vec!["soy sauce", "garlic"]);
    }

    #[tokio::test]
    async fn test_score_no_overlap_is_still_scored() {
        let s = scorer();
        let user = strings(&["salmon"]);
        let recipe = Recipe::new("b1", "Brownies", strings(&["chocolate", "sugar"]));
        let user_emb = s.embedder().embed_ingredients(&user).await;

        let score = s.score(&recipe, &user, &user_emb).await.unwrap();

        assert_eq!(score.ingredient_match_rate, 0.0);
        assert_eq!(score.utilization_score, 0.0);
        assert!(score.matched_ingredients.is_empty());
        assert_eq!(score.ranking_score(), 0.0);
        assert!(score.combined_score >= 0.0);
    }

    #[tokio::test]
    async fn test_score_empty_recipe() {
        let s = scorer();
        let user = strings(&["rice"]);
        let recipe = Recipe::new("e1", "Nothing", vec![]);
        let user_emb = s.embedder().embed_ingredients(&user).await;

        let score = s.score(&recipe, &user, &user_emb).await.unwrap();
        assert_eq!(score.utilization_score, 0.0);
        assert_eq!(score.exact_matches, 0);
        assert!(score.matched_ingredients.is_empty());
        assert!(score.missing_ingredients.is_empty());
    }

    #[test]
    fn test_score_with_mismatched_embeddings() {
        use recipe_embeddings::EmbeddingSource;

        let s = scorer();
        let recipe = Recipe::new("x", "X", strings(&["rice"]));
        let a = Embedding::from_raw(vec![1.0; 3], EmbeddingSource::Hash);
        let b = Embedding::from_raw(vec![1.0; 4], EmbeddingSource::Hash);

        let result = s.score_with_embedding(&recipe, &strings(&["rice"]), &a, &b);
        assert!(matches!(result, Err(ScoringError::Embedding(_))));
    }
}
