//! Runs one CLI command against a recipe file: load, apply, save, report.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::categories::CategoryBook;
use crate::cli::{to_index, CategoryAction, Command};
use crate::config::AppConfig;
use crate::favorites::Favorites;
use crate::nutrition::NutritionTable;
use crate::recipe::Recipe;
use crate::render::{numbered_ingredients, nutrition_report, recipe_card};
use crate::store::{load_recipe, save_recipe};
use crate::units::{UnitConfig, DEFAULT_UNITS};

pub struct App {
    config: AppConfig,
    units: UnitConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            units: UnitConfig::default(),
        }
    }

    /// Executes `command` and returns the text to show the user.
    pub async fn execute(&self, command: Command) -> Result<String> {
        match command {
            Command::New {
                file,
                name,
                yield_count,
                category,
            } => {
                let mut recipe = Recipe::new(&name, yield_count)?;
                if let Some(category) = category {
                    let mut book = CategoryBook::open(&self.config.data_dir).await?;
                    if book.add(&category).await? {
                        info!("Registered new category '{}'", category.trim());
                    }
                    recipe.set_category(&category)?;
                }
                save_recipe(&file, &recipe).await?;
                Ok(recipe_card(&recipe))
            }
            Command::Show { file } => {
                let recipe = load_recipe(&file).await?;
                Ok(format!("{}\n{}", recipe_card(&recipe), numbered_ingredients(&recipe)))
            }
            Command::Add {
                file,
                name,
                quantity,
                unit,
            } => {
                self.update(&file, |recipe| Ok(recipe.add_ingredient(&name, quantity, &unit)?))
                    .await
            }
            Command::Edit {
                file,
                index,
                name,
                quantity,
                unit,
            } => {
                let index = to_index(index)?;
                self.update(&file, |recipe| {
                    Ok(recipe.edit_ingredient(index, &name, quantity, &unit)?)
                })
                .await
            }
            Command::Remove { file, index } => {
                let index = to_index(index)?;
                self.update(&file, |recipe| {
                    let removed = recipe.remove_ingredient(index)?;
                    info!("Removed {}", removed);
                    Ok(())
                })
                .await
            }
            Command::Rename { file, name } => {
                self.update(&file, |recipe| Ok(recipe.rename(&name)?)).await
            }
            Command::Category { file, category } => {
                let card = self
                    .update(&file, |recipe| Ok(recipe.set_category(&category)?))
                    .await?;
                let mut book = CategoryBook::open(&self.config.data_dir).await?;
                book.add(&category).await?;
                Ok(card)
            }
            Command::Prepare { file, text } => {
                self.update(&file, |recipe| {
                    recipe.set_preparation(&text);
                    Ok(())
                })
                .await
            }
            Command::SetYield { file, yield_count } => {
                self.update(&file, |recipe| Ok(recipe.set_yield(yield_count)?))
                    .await
            }
            Command::Scale { file, new_yield } => {
                self.update(&file, |recipe| Ok(recipe.scale(new_yield, &self.units)?))
                    .await
            }
            Command::Multiply { file, factor } => {
                self.update(&file, |recipe| Ok(recipe.multiply(factor, &self.units)?))
                    .await
            }
            Command::Divide { file, factor } => {
                self.update(&file, |recipe| Ok(recipe.divide(factor, &self.units)?))
                    .await
            }
            Command::Convert {
                file,
                index,
                target_unit,
            } => self.convert(&file, to_index(index)?, &target_unit).await,
            Command::Units => Ok(DEFAULT_UNITS
                .iter()
                .map(|unit| {
                    let targets = self.units.available_conversions(unit);
                    if targets.is_empty() {
                        unit.to_string()
                    } else {
                        format!("{} -> {}", unit, targets.join(", "))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")),
            Command::Nutrition { file } => {
                let recipe = load_recipe(&file).await?;
                let table = self.nutrition_table();
                Ok(nutrition_report(&table.profile(&recipe)))
            }
            Command::Categories { action } => {
                let mut book = CategoryBook::open(&self.config.data_dir).await?;
                match action {
                    CategoryAction::List => Ok(book.categories().join("\n")),
                    CategoryAction::Add { name } => {
                        if book.add(&name).await? {
                            Ok(format!("Categoria '{}' adicionada", name.trim()))
                        } else {
                            Ok(format!("Categoria '{}' já existe ou é inválida", name.trim()))
                        }
                    }
                }
            }
            Command::Favorite { file } => {
                let recipe = load_recipe(&file).await?;
                let mut favorites = Favorites::open(&self.config.data_dir).await;
                if favorites.toggle(&recipe).await? {
                    Ok(format!("★ '{}' adicionada aos favoritos", recipe.name()))
                } else {
                    Ok(format!("☆ '{}' removida dos favoritos", recipe.name()))
                }
            }
            Command::Export { file, output } => {
                let recipe = load_recipe(&file).await?;
                tokio::fs::write(&output, recipe_card(&recipe))
                    .await
                    .with_context(|| format!("Failed to export recipe to '{}'", output.display()))?;
                Ok(format!("Receita exportada para {}", output.display()))
            }
        }
    }

    /// Loads, mutates and saves a recipe. The file is only rewritten when the
    /// mutation succeeds.
    async fn update(
        &self,
        file: &Path,
        mutate: impl FnOnce(&mut Recipe) -> Result<()>,
    ) -> Result<String> {
        let mut recipe = load_recipe(file).await?;
        mutate(&mut recipe)?;
        save_recipe(file, &recipe).await?;
        Ok(recipe_card(&recipe))
    }

    async fn convert(&self, file: &Path, index: usize, target_unit: &str) -> Result<String> {
        let mut recipe = load_recipe(file).await?;
        if recipe.convert(index, target_unit, &self.units) {
            save_recipe(file, &recipe).await?;
            return Ok(recipe_card(&recipe));
        }

        let source_unit = recipe
            .ingredients()
            .get(index)
            .map(|ingredient| ingredient.unit.clone())
            .ok_or_else(|| anyhow::anyhow!("No ingredient at position {}", index + 1))?;
        let targets = self.units.available_conversions(&source_unit);
        if targets.is_empty() {
            Ok(format!("Não há conversões disponíveis para {}", source_unit))
        } else {
            Ok(format!(
                "Falha na conversão de {} para {}. Opções: {}",
                source_unit,
                target_unit,
                targets.join(", ")
            ))
        }
    }

    fn nutrition_table(&self) -> NutritionTable {
        let mut table = NutritionTable::default();
        if let Some(csv_path) = &self.config.nutrition_csv {
            match table.extend_from_csv(csv_path) {
                Ok(count) => info!("Extended nutrition table with {} entries", count),
                Err(e) => warn!("Ignoring nutrition CSV: {:#}", e),
            }
        }
        table
    }
}
