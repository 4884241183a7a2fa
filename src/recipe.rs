use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RecipeError, RecipeResult};
use crate::ingredient::{positive, required_text, Ingredient};
use crate::units::{round_half_even, same_unit, UnitConfig, MEASURED_DECIMALS};

pub const PLACEHOLDER_NAME: &str = "Nova Receita";
pub const DEFAULT_CATEGORY: &str = "Geral";

/// On-disk shape of a recipe. Portuguese keys written by older versions of the
/// calculator are accepted on read; writes always use the English keys.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipeDocument {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "ingredientes")]
    pub ingredients: Vec<Ingredient>,
    #[serde(alias = "rendimento", default = "default_yield")]
    pub yield_count: f64,
    #[serde(alias = "categoria", default = "default_category")]
    pub category: String,
    #[serde(alias = "modo_preparo", default)]
    pub preparation_text: String,
}

fn default_yield() -> f64 {
    1.0
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A recipe: an ordered ingredient list plus the number of servings it makes.
///
/// All mutators validate before touching state, so a returned error always
/// means the recipe is unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(try_from = "RecipeDocument")]
pub struct Recipe {
    name: String,
    ingredients: Vec<Ingredient>,
    yield_count: f64,
    category: String,
    preparation_text: String,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            ingredients: Vec::new(),
            yield_count: 1.0,
            category: DEFAULT_CATEGORY.to_string(),
            preparation_text: String::new(),
        }
    }
}

impl TryFrom<RecipeDocument> for Recipe {
    type Error = RecipeError;

    fn try_from(doc: RecipeDocument) -> RecipeResult<Self> {
        let mut recipe = Recipe::new(&doc.name, doc.yield_count)?;
        recipe.set_category(&doc.category)?;
        recipe.set_preparation(&doc.preparation_text);
        recipe.ingredients = doc
            .ingredients
            .into_iter()
            .map(Ingredient::validated)
            .collect::<RecipeResult<Vec<_>>>()?;
        Ok(recipe)
    }
}

impl Recipe {
    pub fn new(name: &str, yield_count: f64) -> RecipeResult<Self> {
        Ok(Self {
            name: required_text("recipe name", name)?,
            yield_count: positive("yield", yield_count)?,
            ..Self::default()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn yield_count(&self) -> f64 {
        self.yield_count
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn preparation_text(&self) -> &str {
        &self.preparation_text
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME
    }

    pub fn rename(&mut self, name: &str) -> RecipeResult<()> {
        self.name = required_text("recipe name", name)?;
        Ok(())
    }

    pub fn set_category(&mut self, category: &str) -> RecipeResult<()> {
        self.category = required_text("category", category)?;
        Ok(())
    }

    pub fn set_preparation(&mut self, text: &str) {
        self.preparation_text = text.trim().to_string();
    }

    /// Declares how many servings the current quantities make, without
    /// touching any quantity.
    pub fn set_yield(&mut self, yield_count: f64) -> RecipeResult<()> {
        self.yield_count = positive("yield", yield_count)?;
        Ok(())
    }

    pub fn add_ingredient(&mut self, name: &str, quantity: f64, unit: &str) -> RecipeResult<()> {
        let ingredient = Ingredient::new(name, quantity, unit)?;
        debug!("Adding ingredient to '{}': {}", self.name, ingredient);
        self.ingredients.push(ingredient);
        Ok(())
    }

    pub fn edit_ingredient(
        &mut self,
        index: usize,
        name: &str,
        quantity: f64,
        unit: &str,
    ) -> RecipeResult<()> {
        self.check_index(index)?;
        let ingredient = Ingredient::new(name, quantity, unit)?;
        debug!("Replacing ingredient #{} with {}", index, ingredient);
        self.ingredients[index] = ingredient;
        Ok(())
    }

    pub fn remove_ingredient(&mut self, index: usize) -> RecipeResult<Ingredient> {
        self.check_index(index)?;
        Ok(self.ingredients.remove(index))
    }

    /// Rescales every quantity so the recipe makes `new_yield` servings.
    pub fn scale(&mut self, new_yield: f64, units: &UnitConfig) -> RecipeResult<()> {
        positive("current yield", self.yield_count)?;
        let new_yield = positive("new yield", new_yield)?;
        let factor = new_yield / self.yield_count;

        let quantities = self.rescaled_quantities(units, |q| q * factor)?;
        self.commit_quantities(quantities);
        info!(
            "Scaled '{}' from {} to {} servings (factor {})",
            self.name, self.yield_count, new_yield, factor
        );
        self.yield_count = new_yield;
        Ok(())
    }

    /// Multiplies every quantity by `factor`. The declared yield is left as is.
    pub fn multiply(&mut self, factor: f64, units: &UnitConfig) -> RecipeResult<()> {
        let factor = positive("factor", factor)?;
        let quantities = self.rescaled_quantities(units, |q| q * factor)?;
        self.commit_quantities(quantities);
        info!("Multiplied '{}' by {}", self.name, factor);
        Ok(())
    }

    /// Divides every quantity by `factor`. The declared yield is left as is.
    pub fn divide(&mut self, factor: f64, units: &UnitConfig) -> RecipeResult<()> {
        let factor = positive("factor", factor)?;
        let quantities = self.rescaled_quantities(units, |q| q / factor)?;
        self.commit_quantities(quantities);
        info!("Divided '{}' by {}", self.name, factor);
        Ok(())
    }

    /// Converts the ingredient at `index` into `target_unit`.
    ///
    /// Returns `false` without changing anything when the index is out of
    /// range, the units are equal, no table leads from the ingredient's unit
    /// to `target_unit`, or the converted quantity would round to zero. Units
    /// are compared ignoring case; the stored unit takes the table's spelling.
    pub fn convert(&mut self, index: usize, target_unit: &str, units: &UnitConfig) -> bool {
        let Some(ingredient) = self.ingredients.get_mut(index) else {
            debug!("Conversion skipped: no ingredient at index {}", index);
            return false;
        };
        let target_unit = target_unit.trim();
        if same_unit(&ingredient.unit, target_unit) {
            return false;
        }
        let Some(conversion) = units.find_conversion(&ingredient.unit, target_unit) else {
            debug!(
                "Conversion skipped: no rule from '{}' to '{}'",
                ingredient.unit, target_unit
            );
            return false;
        };

        let converted = round_half_even(
            conversion.rule.apply(ingredient.quantity),
            MEASURED_DECIMALS,
        );
        if converted <= 0.0 {
            debug!(
                "Conversion skipped: {} {} is below the precision of '{}'",
                ingredient.quantity, ingredient.unit, target_unit
            );
            return false;
        }

        info!(
            "Converted {} from {} {} to {} {}",
            ingredient.name, ingredient.quantity, ingredient.unit, converted, conversion.to
        );
        ingredient.quantity = converted;
        ingredient.unit = conversion.to.clone();
        true
    }

    pub fn to_document(&self) -> RecipeDocument {
        RecipeDocument {
            name: self.name.clone(),
            ingredients: self.ingredients.clone(),
            yield_count: self.yield_count,
            category: self.category.clone(),
            preparation_text: self.preparation_text.clone(),
        }
    }

    /// Pretty-printed JSON document, four-space indented.
    pub fn to_json(&self) -> RecipeResult<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.to_document().serialize(&mut serializer)?;
        String::from_utf8(buffer)
            .map_err(|e| RecipeError::invalid(format!("recipe document is not UTF-8: {}", e)))
    }

    pub fn from_json(json: &str) -> RecipeResult<Self> {
        let doc: RecipeDocument = serde_json::from_str(json)?;
        Recipe::try_from(doc)
    }

    fn check_index(&self, index: usize) -> RecipeResult<()> {
        if index >= self.ingredients.len() {
            return Err(RecipeError::invalid(format!(
                "ingredient index {} out of range (recipe has {} ingredients)",
                index,
                self.ingredients.len()
            )));
        }
        Ok(())
    }

    /// Computes every new quantity before anything is written, so a quantity
    /// that would round to zero aborts the whole operation.
    fn rescaled_quantities(
        &self,
        units: &UnitConfig,
        apply: impl Fn(f64) -> f64,
    ) -> RecipeResult<Vec<f64>> {
        self.ingredients
            .iter()
            .map(|ingredient| {
                let rounded = units.round_for_unit(&ingredient.unit, apply(ingredient.quantity));
                debug!(
                    "  {}: {} -> {} {}",
                    ingredient.name, ingredient.quantity, rounded, ingredient.unit
                );
                if !rounded.is_finite() || rounded <= 0.0 {
                    return Err(RecipeError::invalid(format!(
                        "'{}' would become {} {}; quantities must stay positive",
                        ingredient.name, rounded, ingredient.unit
                    )));
                }
                Ok(rounded)
            })
            .collect()
    }

    fn commit_quantities(&mut self, quantities: Vec<f64>) {
        for (ingredient, quantity) in self.ingredients.iter_mut().zip(quantities) {
            ingredient.quantity = quantity;
        }
    }
}
