//! Per-recipe scoring results.

use serde::{Deserialize, Serialize};

use crate::recipe::Recipe;

/// Result of scoring one recipe against the user's ingredients.
///
/// Created once per scoring pass and never modified afterwards.
/// `matched_ingredients` and `missing_ingredients` partition
/// `recipe.ingredients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeScore {
    pub recipe: Recipe,

    /// Embedding similarity clamped to [0, 1]
    pub similarity_score: f32,

    /// Fraction of user ingredients used by the recipe, [0, 1]
    pub ingredient_match_rate: f32,

    /// Fraction of recipe ingredients the user has, [0, 1]
    pub utilization_score: f32,

    /// Recipe ingredients hit by the strict matcher
    pub exact_matches: usize,

    /// Weighted combination of the four metrics
    pub combined_score: f32,

    pub matched_ingredients: Vec<String>,

    pub missing_ingredients: Vec<String>,
}

impl RecipeScore {
    /// Value used to rank recommendations.
    ///
    /// A recipe that uses none of the user's ingredients ranks at zero,
    /// whatever its similarity.
    pub fn ranking_score(&self) -> f32 {
        if self.matched_ingredients.is_empty() {
            0.0
        } else {
            self.combined_score
        }
    }

    /// Legacy alias for the utilization score.
    pub fn coverage_score(&self) -> f32 {
        self.utilization_score
    }
}
