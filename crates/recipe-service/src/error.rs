//! Service error types.

use recipe_scoring::ScoringError;
use thiserror::Error;

/// Malformed caller input at the API boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ingredients must be a JSON array")]
    NotAnArray,

    #[error("Ingredient at index {index} is not a string")]
    NotAString { index: usize },

    #[error("Ingredient at index {index} is blank")]
    BlankIngredient { index: usize },

    #[error("At least one ingredient is required")]
    NoIngredients,
}

/// Errors surfaced by the recommendation service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    /// Recipe source could not provide candidates
    #[error("Recipe source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
