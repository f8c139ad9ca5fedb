//! Recipe sources.
//!
//! A source hands the recommender its candidate recipes. Remote search
//! clients plug in through the same trait.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use recipe_types::Recipe;

use crate::error::ServiceError;

/// Provider of candidate recipes.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Candidate recipes for the given user ingredients.
    async fn fetch_candidates(&self, user_ingredients: &[String]) -> Result<Vec<Recipe>, ServiceError>;
}

/// In-memory recipe list.
#[derive(Debug, Clone, Default)]
pub struct StaticRecipeSource {
    recipes: Vec<Recipe>,
}

impl StaticRecipeSource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[async_trait]
impl RecipeSource for StaticRecipeSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_candidates(&self, _user_ingredients: &[String]) -> Result<Vec<Recipe>, ServiceError> {
        Ok(self.recipes.clone())
    }
}

/// Recipes read from a JSON array on disk, loaded on first use.
pub struct JsonFileRecipeSource {
    path: PathBuf,
    recipes: OnceCell<Vec<Recipe>>,
}

impl JsonFileRecipeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recipes: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn load(&self) -> Result<&Vec<Recipe>, ServiceError> {
        self.recipes
            .get_or_try_init(|| async {
                let text = tokio::fs::read_to_string(&self.path).await?;
                let recipes: Vec<Recipe> = serde_json::from_str(&text)?;
                info!(path = ?self.path, count = recipes.len(), "Recipe catalog loaded");
                Ok::<_, ServiceError>(recipes)
            })
            .await
    }
}

#[async_trait]
impl RecipeSource for JsonFileRecipeSource {
    fn name(&self) -> &str {
        "json_file"
    }

    async fn fetch_candidates(&self, _user_ingredients: &[String]) -> Result<Vec<Recipe>, ServiceError> {
        Ok(self.load().await?.clone())
    }
}

/// Queries several sources and concatenates their candidates.
///
/// A failing source is skipped with a warning; the first recipe seen for a
/// given id wins.
pub struct MultiRecipeSource {
    sources: Vec<Arc<dyn RecipeSource>>,
}

impl MultiRecipeSource {
    pub fn new(sources: Vec<Arc<dyn RecipeSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl RecipeSource for MultiRecipeSource {
    fn name(&self) -> &str {
        "multi"
    }

    async fn fetch_candidates(&self, user_ingredients: &[String]) -> Result<Vec<Recipe>, ServiceError> {
        let fetches = self
            .sources
            .iter()
            .map(|source| source.fetch_candidates(user_ingredients));
        let results = futures::future::join_all(fetches).await;

        let mut seen = HashSet::new();
        let mut recipes = Vec::new();

        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(candidates) => {
                    debug!(source = source.name(), count = candidates.len(), "Source returned candidates");
                    recipes.extend(candidates.into_iter().filter(|r| seen.insert(r.id.clone())));
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Recipe source failed, skipping");
                }
            }
        }

        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct BrokenSource;

    #[async_trait]
    impl RecipeSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch_candidates(&self, _: &[String]) -> Result<Vec<Recipe>, ServiceError> {
            Err(ServiceError::Source("offline".to_string()))
        }
    }

    fn recipe(id: &str) -> Recipe {
        Recipe::new(id, format!("Recipe {id}"), vec!["rice".to_string()])
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticRecipeSource::new(vec![recipe("a"), recipe("b")]);
        assert_eq!(source.len(), 2);
        let recipes = source.fetch_candidates(&[]).await.unwrap();
        assert_eq!(recipes.len(), 2);
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "1", "name": "Fried rice", "ingredients": ["rice", "egg"], "cookTimeMinutes": 15, "servings": 2}}]"#
        )
        .unwrap();

        let source = JsonFileRecipeSource::new(file.path());
        let recipes = source.fetch_candidates(&[]).await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients, vec!["rice", "egg"]);
        assert_eq!(recipes[0].cook_time_minutes, 15);
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileRecipeSource::new("/nonexistent/recipes.json");
        let err = source.fetch_candidates(&[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)));
    }

    #[tokio::test]
    async fn test_json_file_source_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let source = JsonFileRecipeSource::new(file.path());
        let err = source.fetch_candidates(&[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Json(_)));
    }

    #[tokio::test]
    async fn test_multi_source_skips_failures_and_dedups() {
        let sources: Vec<Arc<dyn RecipeSource>> = vec![
            Arc::new(StaticRecipeSource::new(vec![recipe("a"), recipe("b")])),
            Arc::new(BrokenSource) as Arc<dyn RecipeSource>,
            Arc::new(StaticRecipeSource::new(vec![recipe("b"), recipe("c")])),
        ];
        let source = MultiRecipeSource::new(sources);

        let recipes = source.fetch_candidates(&[]).await.unwrap();
        let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
