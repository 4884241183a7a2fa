use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::error::RecipeError;
use crate::recipe::Recipe;
use crate::store::{read_json, write_json};

pub const FAVORITES_FILE: &str = "favoritos.json";

#[derive(Debug, Clone)]
pub struct Favorites {
    path: PathBuf,
    names: Vec<String>,
}

impl Favorites {
    /// A missing or unreadable file means no favorites yet.
    pub async fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(FAVORITES_FILE);
        let names = read_json::<Vec<String>>(&path).await.unwrap_or_default();
        Self { path, names }
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Flips the favorite flag of a recipe and persists the list.
    /// Returns whether the recipe is a favorite afterwards.
    pub async fn toggle(&mut self, recipe: &Recipe) -> Result<bool> {
        if recipe.is_placeholder() {
            return Err(RecipeError::invalid(
                "save the recipe under a real name before marking it as favorite",
            )
            .into());
        }

        let name = recipe.name();
        let now_favorite = if self.is_favorite(name) {
            self.names.retain(|n| n != name);
            false
        } else {
            self.names.push(name.to_string());
            true
        };
        write_json(&self.path, &self.names).await?;
        Ok(now_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_toggle_adds_then_removes() -> Result<()> {
        let dir = tempdir()?;
        let pudim = Recipe::new("Pudim", 6.0)?;
        let mut favorites = Favorites::open(dir.path()).await;
        assert!(!favorites.is_favorite("Pudim"));

        assert!(favorites.toggle(&pudim).await?);
        let reopened = Favorites::open(dir.path()).await;
        assert!(reopened.is_favorite("Pudim"));

        assert!(!favorites.toggle(&pudim).await?);
        assert!(!favorites.is_favorite("Pudim"));
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_rejects_placeholder_recipe() -> Result<()> {
        let dir = tempdir()?;
        let mut favorites = Favorites::open(dir.path()).await;
        let err = favorites.toggle(&Recipe::default()).await.unwrap_err();
        assert!(err.downcast_ref::<RecipeError>().is_some());
        assert!(!dir.path().join(FAVORITES_FILE).exists());
        Ok(())
    }
}
