//! File persistence for recipes and the small JSON lists kept beside them.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::recipe::Recipe;

pub async fn load_recipe(path: &Path) -> Result<Recipe> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read recipe file '{}'", path.display()))?;
    let recipe = Recipe::from_json(&content)
        .with_context(|| format!("Failed to load recipe from '{}'", path.display()))?;
    info!(
        "Loaded recipe '{}' ({} ingredients) from {}",
        recipe.name(),
        recipe.ingredients().len(),
        path.display()
    );
    Ok(recipe)
}

pub async fn save_recipe(path: &Path, recipe: &Recipe) -> Result<()> {
    let json = recipe.to_json()?;
    replace_file(path, json)
        .await
        .with_context(|| format!("Failed to write recipe file '{}'", path.display()))?;
    debug!("Saved recipe '{}' to {}", recipe.name(), path.display());
    Ok(())
}

pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in '{}'", path.display()))
}

pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    replace_file(path, json)
        .await
        .with_context(|| format!("Failed to write '{}'", path.display()))
}

/// Writes `contents` to a sibling temporary file and renames it over `path`,
/// so readers see either the old file or the new one in full.
async fn replace_file(path: &Path, contents: String) -> Result<()> {
    let tmp = temp_sibling(path);
    let written = match fs::write(&tmp, contents).await {
        Ok(()) => fs::rename(&tmp, path).await,
        Err(err) => Err(err),
    };
    if written.is_err() {
        fs::remove_file(&tmp).await.ok();
    }
    Ok(written?)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("recipe"));
    name.push(".tmp");
    path.with_file_name(name)
}
