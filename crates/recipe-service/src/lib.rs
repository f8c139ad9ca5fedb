//! # recipe-service
//!
//! Caller-facing recommendation flow.
//!
//! - [`RecommendationService`]: user ingredients in, ranked [`recipe_types::RecipeScore`]s out
//! - [`RecipeSource`]: where candidate recipes come from
//! - [`IngredientCatalog`]: read-only ingredient names for validation and autocomplete
//! - [`validation`]: boundary checks for raw caller input
//!
//! ## Usage
//!
//! ```rust,ignore
//! let service = RecommendationService::from_settings(&settings, source)?;
//! let results = service
//!     .generate_recipe_recommendations(&["chicken".to_string(), "garlic".to_string()])
//!     .await?;
//! ```

pub mod catalog;
pub mod error;
pub mod recommend;
pub mod source;
pub mod validation;

pub use catalog::IngredientCatalog;
pub use error::{ServiceError, ValidationError};
pub use recommend::RecommendationService;
pub use source::{JsonFileRecipeSource, MultiRecipeSource, RecipeSource, StaticRecipeSource};
pub use validation::{clean_ingredients, validate_ingredient_payload};
