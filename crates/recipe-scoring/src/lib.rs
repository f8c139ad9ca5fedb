//! # recipe-scoring
//!
//! Scores candidate recipes against a user's ingredients and ranks the
//! results.
//!
//! ## Pipeline
//!
//! 1. [`matcher`]: lenient word-boundary matching plus a strict variant for exact hits
//! 2. [`metrics`]: match rate, utilization, exact-match count, embedding similarity
//! 3. [`scorer`]: weighted combination into a [`recipe_types::RecipeScore`]
//! 4. [`rank`]: normalizes heterogeneous match values, drops non-matches,
//!    stable-sorts descending
//!
//! ## Scoring Formula
//!
//! ```text
//! combined = similarity * w_sim
//!          + match_rate * w_match
//!          + utilization * w_util
//!          + (exact_matches / max(1, recipe_ingredients)) * w_exact
//! ```

pub mod error;
pub mod matcher;
pub mod metrics;
pub mod rank;
pub mod scorer;

pub use error::ScoringError;
pub use matcher::{ingredients_match, is_exact_match, normalize_ingredient};
pub use metrics::{
    calculate_exact_matches, calculate_ingredient_match_rate, calculate_similarity_score,
    calculate_utilization_score, partition_ingredients,
};
pub use rank::{
    filter_and_sort_by, filter_and_sort_json, filter_and_sort_recipes, normalize_match_value,
    resolve_match_value, MatchField, MatchFields, MatchValue,
};
pub use scorer::RecipeScorer;
