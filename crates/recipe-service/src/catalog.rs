//! Read-only ingredient catalog for validation and autocomplete.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::error::ServiceError;

/// Known ingredient names, loaded once and never mutated.
///
/// Names are keyed by their lowercased, trimmed form. The first spelling
/// seen for a key is kept for display.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    names: BTreeMap<String, String>,
}

impl IngredientCatalog {
    /// Build from a list of names. Blank entries are ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for name in names {
            let display = name.as_ref().trim();
            if display.is_empty() {
                continue;
            }
            map.entry(display.to_lowercase())
                .or_insert_with(|| display.to_string());
        }
        Self { names: map }
    }

    /// Load a JSON array of strings.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let names: Vec<String> = serde_json::from_str(&text)?;
        let catalog = Self::from_names(names);
        info!(path = ?path, count = catalog.len(), "Ingredient catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Case-insensitive membership.
    pub fn contains(&self, ingredient: &str) -> bool {
        self.names.contains_key(&ingredient.trim().to_lowercase())
    }

    /// Up to `limit` names starting with `prefix` (case-insensitive), in
    /// alphabetical order. A blank prefix yields nothing.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        let key = prefix.trim().to_lowercase();
        if key.is_empty() {
            return Vec::new();
        }

        self.names
            .range(key.clone()..)
            .take_while(|(k, _)| k.starts_with(&key))
            .take(limit)
            .map(|(_, display)| display.clone())
            .collect()
    }

    /// Iterate display names in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }
}
