//! Boundary validation for user-supplied ingredients.

use serde_json::Value;

use crate::error::ValidationError;

/// Trim every ingredient and drop the blank ones.
///
/// Used by the recommendation entry point, which treats an all-blank list
/// as "nothing to recommend" rather than an error.
pub fn clean_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Vec<String> {
    ingredients
        .iter()
        .map(|i| i.as_ref().trim())
        .filter(|i| !i.is_empty())
        .map(String::from)
        .collect()
}

/// Strictly validate a raw JSON ingredient payload.
///
/// Requires a non-empty array of non-blank strings. Returns the trimmed
/// ingredients.
pub fn validate_ingredient_payload(payload: &Value) -> Result<Vec<String>, ValidationError> {
    let items = payload.as_array().ok_or(ValidationError::NotAnArray)?;

    if items.is_empty() {
        return Err(ValidationError::NoIngredients);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let text = item
                .as_str()
                .ok_or(ValidationError::NotAString { index })?
                .trim();
            if text.is_empty() {
                return Err(ValidationError::BlankIngredient { index });
            }
            Ok(text.to_string())
        })
        .collect()
}
