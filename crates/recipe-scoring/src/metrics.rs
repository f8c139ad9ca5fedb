//! Per-recipe metric calculators.
//!
//! All calculators are total: empty inputs give zero, never an error.
//! Only the similarity metric can fail, on a vector length mismatch.

use recipe_embeddings::{clamped_similarity, Embedding, EmbeddingError};

use crate::matcher::{ingredients_match, is_exact_match};

/// Fraction of user ingredients matched by at least one recipe ingredient.
///
/// "What fraction of what the user has does this recipe use?"
pub fn calculate_ingredient_match_rate<U, R>(user_ingredients: &[U], recipe_ingredients: &[R]) -> f32
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    if user_ingredients.is_empty() {
        return 0.0;
    }

    let matched = user_ingredients
        .iter()
        .filter(|u| {
            recipe_ingredients
                .iter()
                .any(|r| ingredients_match(u.as_ref(), r.as_ref()))
        })
        .count();

    matched as f32 / user_ingredients.len() as f32
}

/// Fraction of recipe ingredients matched by at least one user ingredient.
///
/// "What fraction of this recipe can the user make?" Formerly called the
/// coverage score.
pub fn calculate_utilization_score<U, R>(user_ingredients: &[U], recipe_ingredients: &[R]) -> f32
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    if recipe_ingredients.is_empty() {
        return 0.0;
    }

    let used = recipe_ingredients
        .iter()
        .filter(|r| {
            user_ingredients
                .iter()
                .any(|u| ingredients_match(u.as_ref(), r.as_ref()))
        })
        .count();

    used as f32 / recipe_ingredients.len() as f32
}

/// Recipe ingredients with at least one strict hit among the user ingredients.
pub fn calculate_exact_matches<U, R>(user_ingredients: &[U], recipe_ingredients: &[R]) -> usize
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    recipe_ingredients
        .iter()
        .filter(|r| {
            user_ingredients
                .iter()
                .any(|u| is_exact_match(u.as_ref(), r.as_ref()))
        })
        .count()
}

/// Cosine similarity of the two embeddings, clamped to [0, 1].
pub fn calculate_similarity_score(
    user_embedding: &Embedding,
    recipe_embedding: &Embedding,
) -> Result<f32, EmbeddingError> {
    clamped_similarity(&user_embedding.values, &recipe_embedding.values)
}

/// Split recipe ingredients into (matched, missing), preserving recipe order.
pub fn partition_ingredients<U, R>(
    user_ingredients: &[U],
    recipe_ingredients: &[R],
) -> (Vec<String>, Vec<String>)
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for r in recipe_ingredients {
        let hit = user_ingredients
            .iter()
            .any(|u| ingredients_match(u.as_ref(), r.as_ref()));
        if hit {
            matched.push(r.as_ref().to_string());
        } else {
            missing.push(r.as_ref().to_string());
        }
    }

    (matched, missing)
}
