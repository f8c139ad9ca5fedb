//! # recipe-types
//!
//! Shared domain types for the recipe recommender.
//!
//! - Recipes: read-only candidates supplied by recipe sources
//! - Recipe scores: per-request results of the scoring pass
//! - Settings: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use recipe_types::Recipe;
//!
//! let recipe = Recipe::new("r1", "Mirepoix", vec!["carrot".into(), "celery".into()]);
//! assert_eq!(recipe.ingredient_count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod recipe;
pub mod score;

pub use config::{EmbeddingSettings, ScoringWeights, Settings};
pub use error::RecipeError;
pub use recipe::Recipe;
pub use score::RecipeScore;
