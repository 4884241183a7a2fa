use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, Div, Mul};
use std::path::Path;
use tracing::debug;

use crate::recipe::Recipe;

// Expected column headers of a nutrition CSV
const NAME_COL: &str = "Name";
const KCAL_COL: &str = "kcal/100g";
const CARB_COL: &str = "Carbohydrate (g/100g)";
const PROTEIN_COL: &str = "Protein (g/100g)";
const FAT_COL: &str = "Fat (g/100g)";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct NutritionalSummary {
    pub kcal: f64,
    pub carbohydrate_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
}

impl AddAssign for NutritionalSummary {
    fn add_assign(&mut self, other: Self) {
        self.kcal += other.kcal;
        self.carbohydrate_g += other.carbohydrate_g;
        self.protein_g += other.protein_g;
        self.fat_g += other.fat_g;
    }
}

impl Mul<f64> for NutritionalSummary {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self {
            kcal: self.kcal * factor,
            carbohydrate_g: self.carbohydrate_g * factor,
            protein_g: self.protein_g * factor,
            fat_g: self.fat_g * factor,
        }
    }
}

impl Div<f64> for NutritionalSummary {
    type Output = Self;

    fn div(self, divisor: f64) -> Self {
        self * (1.0 / divisor)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NutritionEntry {
    pub name: String,
    pub per_100g: NutritionalSummary,
}

/// Per-100 g nutrition values keyed by ingredient name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NutritionTable {
    pub entries: Vec<NutritionEntry>,
}

impl Default for NutritionTable {
    fn default() -> Self {
        Self {
            entries: vec![
                NutritionEntry {
                    name: "Farinha".to_string(),
                    per_100g: NutritionalSummary {
                        kcal: 364.0,
                        carbohydrate_g: 76.0,
                        protein_g: 10.0,
                        fat_g: 1.0,
                    },
                },
                NutritionEntry {
                    name: "Açúcar".to_string(),
                    per_100g: NutritionalSummary {
                        kcal: 387.0,
                        carbohydrate_g: 100.0,
                        protein_g: 0.0,
                        fat_g: 0.0,
                    },
                },
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeNutritionalProfile {
    pub totals: NutritionalSummary,
    pub per_serving: NutritionalSummary,
    pub yield_count: f64,
    /// Ingredients with no entry in the table.
    pub unmatched: Vec<String>,
}

impl NutritionTable {
    /// First entry whose name appears, case-insensitively, inside `ingredient_name`.
    pub fn lookup(&self, ingredient_name: &str) -> Option<&NutritionEntry> {
        let ingredient_name = ingredient_name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| ingredient_name.contains(&entry.name.to_lowercase()))
    }

    /// Appends entries from a CSV file. Rows with an empty name are skipped and
    /// unparsable values count as zero.
    pub fn extend_from_csv(&mut self, csv_path: &Path) -> Result<usize> {
        if !csv_path.exists() {
            return Err(anyhow::anyhow!("Nutrition CSV file not found at: {:?}", csv_path));
        }

        let file = std::fs::File::open(csv_path)
            .with_context(|| format!("Failed to open nutrition CSV file at {:?}", csv_path))?;
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
        };
        let name_idx = column(NAME_COL)?;
        let kcal_idx = column(KCAL_COL)?;
        let carb_idx = column(CARB_COL)?;
        let protein_idx = column(PROTEIN_COL)?;
        let fat_idx = column(FAT_COL)?;

        let mut added = 0;
        for (row_index, result) in rdr.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to read record at row index {}", row_index))?;
            let name = record.get(name_idx).unwrap_or_default().trim().to_string();
            if name.is_empty() {
                continue;
            }
            let value = |idx: usize| parse_or_zero(record.get(idx).unwrap_or_default());
            self.entries.push(NutritionEntry {
                name,
                per_100g: NutritionalSummary {
                    kcal: value(kcal_idx),
                    carbohydrate_g: value(carb_idx),
                    protein_g: value(protein_idx),
                    fat_g: value(fat_idx),
                },
            });
            added += 1;
        }

        debug!("Loaded {} nutrition entries from {:?}", added, csv_path);
        Ok(added)
    }

    /// Sums the table values over the recipe. Quantities are read as grams
    /// whatever their unit.
    pub fn profile(&self, recipe: &Recipe) -> RecipeNutritionalProfile {
        let mut totals = NutritionalSummary::default();
        let mut unmatched = Vec::new();

        for ingredient in recipe.ingredients() {
            match self.lookup(&ingredient.name) {
                Some(entry) => totals += entry.per_100g * (ingredient.quantity / 100.0),
                None => unmatched.push(ingredient.name.clone()),
            }
        }

        RecipeNutritionalProfile {
            totals,
            per_serving: totals / recipe.yield_count(),
            yield_count: recipe.yield_count(),
            unmatched,
        }
    }
}

fn parse_or_zero(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_profile_sums_matching_ingredients() {
        let mut recipe = Recipe::new("Bolo", 2.0).unwrap();
        recipe.add_ingredient("Farinha de trigo", 200.0, "g").unwrap();
        recipe.add_ingredient("açúcar refinado", 50.0, "g").unwrap();
        recipe.add_ingredient("ovos", 3.0, "unidades").unwrap();

        let profile = NutritionTable::default().profile(&recipe);
        assert_eq!(profile.totals.kcal, 364.0 * 2.0 + 387.0 * 0.5);
        assert_eq!(profile.totals.carbohydrate_g, 152.0 + 50.0);
        assert_eq!(profile.totals.protein_g, 20.0);
        assert_eq!(profile.totals.fat_g, 2.0);
        assert_eq!(profile.per_serving.protein_g, 10.0);
        assert_eq!(profile.unmatched, vec!["ovos".to_string()]);
    }

    #[test]
    fn test_profile_of_empty_recipe_is_zero() {
        let profile = NutritionTable::default().profile(&Recipe::default());
        assert_eq!(profile.totals, NutritionalSummary::default());
        assert!(profile.unmatched.is_empty());
    }

    #[test]
    fn test_extend_from_csv() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{},{},{},{},{}", NAME_COL, KCAL_COL, CARB_COL, PROTEIN_COL, FAT_COL)?;
        writeln!(file, "Manteiga,717,0.1,0.9,81")?;
        writeln!(file, ",1,1,1,1")?; // Empty name
        writeln!(file, "Leite,abc,4.8,3.4,1")?; // Invalid kcal
        file.flush()?;

        let mut table = NutritionTable::default();
        let added = table.extend_from_csv(file.path())?;
        assert_eq!(added, 2);

        let butter = table.lookup("manteiga sem sal").unwrap();
        assert_eq!(butter.per_100g.fat_g, 81.0);
        let milk = table.lookup("leite integral").unwrap();
        assert_eq!(milk.per_100g.kcal, 0.0);
        Ok(())
    }

    #[test]
    fn test_extend_from_csv_missing_column() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{},{}", NAME_COL, KCAL_COL)?;
        writeln!(file, "Manteiga,717")?;
        file.flush()?;

        let result = NutritionTable::default().extend_from_csv(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains(&format!("Column '{}' not found", CARB_COL)));
        Ok(())
    }

    #[test]
    fn test_extend_from_csv_file_not_found() {
        let result = NutritionTable::default().extend_from_csv(Path::new("no_such_table.csv"));
        assert!(result.unwrap_err().to_string().contains("Nutrition CSV file not found"));
    }
}
