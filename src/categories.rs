use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::store::{read_json, write_json};

pub const CATEGORIES_FILE: &str = "categorias.json";

pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Geral",
    "Sobremesas",
    "Massas",
    "Carnes",
    "Vegetariano",
    "Vegano",
    "Bebidas",
];

/// User-extensible list of recipe categories, persisted as a JSON array.
#[derive(Debug, Clone)]
pub struct CategoryBook {
    path: PathBuf,
    categories: Vec<String>,
}

impl CategoryBook {
    /// Loads the list from `data_dir`. A missing or unreadable file falls back
    /// to the default categories, which are written back immediately.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CATEGORIES_FILE);
        match read_json::<Vec<String>>(&path).await {
            Ok(categories) => Ok(Self { path, categories }),
            Err(e) => {
                warn!("Using default categories: {:#}", e);
                let book = Self {
                    path,
                    categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
                };
                book.save().await?;
                Ok(book)
            }
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category.trim())
    }

    /// Adds and persists a category. Returns `false` for blank or duplicate names.
    pub async fn add(&mut self, category: &str) -> Result<bool> {
        let category = category.trim();
        if category.is_empty() || self.contains(category) {
            return Ok(false);
        }
        self.categories.push(category.to_string());
        self.save().await?;
        Ok(true)
    }

    async fn save(&self) -> Result<()> {
        write_json(&self.path, &self.categories).await
    }
}
