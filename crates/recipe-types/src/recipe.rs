//! Recipe records supplied by recipe sources.
//!
//! Recipes are owned by whichever source produced them (local catalog or a
//! remote search client). Scoring treats them as read-only input.

use serde::{Deserialize, Deserializer, Serialize};

/// A candidate recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Opaque identifier assigned by the source
    pub id: String,

    /// Display name
    pub name: String,

    /// Ingredient phrases in recipe order (may be empty, may repeat)
    #[serde(default)]
    pub ingredients: Vec<String>,

    /// Cook time in minutes
    #[serde(default)]
    pub cook_time_minutes: u32,

    /// Number of servings, at least one
    #[serde(default = "default_servings", deserialize_with = "deserialize_servings")]
    pub servings: u32,

    /// Cuisine label, e.g. "Italian"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,

    /// Difficulty label, e.g. "easy"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

fn default_servings() -> u32 {
    1
}

/// Zero servings is clamped to one, like [`Recipe::with_servings`].
fn deserialize_servings<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u32::deserialize(deserializer)?.max(1))
}

impl Recipe {
    /// Create a recipe with default cook time and servings.
    pub fn new(id: impl Into<String>, name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ingredients,
            cook_time_minutes: 0,
            servings: default_servings(),
            cuisine: None,
            difficulty: None,
        }
    }

    /// Set cook time in minutes.
    pub fn with_cook_time(mut self, minutes: u32) -> Self {
        self.cook_time_minutes = minutes;
        self
    }

    /// Set servings. Zero is clamped to one.
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings.max(1);
        self
    }

    /// Set the cuisine label.
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Set the difficulty label.
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// Number of ingredient entries, duplicates included.
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Ingredient list in the form sent to the embedder.
    pub fn ingredients_text(&self) -> String {
        self.ingredients.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_builder() {
        let recipe = Recipe::new("r1", "Soup", vec!["carrot".to_string()])
            .with_cook_time(30)
            .with_servings(0)
            .with_cuisine("French")
            .with_difficulty("easy");

        assert_eq!(recipe.cook_time_minutes, 30);
        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.cuisine.as_deref(), Some("French"));
        assert_eq!(recipe.difficulty.as_deref(), Some("easy"));
    }

    #[test]
    fn test_ingredients_text() {
        let recipe = Recipe::new(
            "r1",
            "Stir fry",
            vec!["chicken breast".to_string(), "soy sauce".to_string()],
        );
        assert_eq!(recipe.ingredients_text(), "chicken breast, soy sauce");
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"id": "7", "name": "Toast"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.servings, 1);
        assert!(recipe.cuisine.is_none());
    }

    #[test]
    fn test_deserialize_zero_servings_clamped() {
        let json = r#"{"id": "8", "name": "Soup", "servings": 0}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.servings, 1);

        let json = r#"{"id": "9", "name": "Stew", "servings": 6}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.servings, 6);
    }

    #[test]
    fn test_serialization_camel_case() {
        let recipe = Recipe::new("1", "Rice", vec![]).with_cook_time(15);
        let json = serde_json::to_string(&recipe).unwrap();
        assert!(json.contains("cookTimeMinutes"));
        assert!(!json.contains("cuisine"));
    }
}
