use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RecipeError, RecipeResult};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "quantidade")]
    pub quantity: f64,
    #[serde(alias = "unidade")]
    pub unit: String,
}

impl Ingredient {
    /// Builds a validated ingredient. Name and unit are trimmed.
    pub fn new(name: &str, quantity: f64, unit: &str) -> RecipeResult<Self> {
        let name = required_text("ingredient name", name)?;
        let unit = required_text("ingredient unit", unit)?;
        let quantity = positive("ingredient quantity", quantity)?;
        Ok(Self {
            name,
            quantity,
            unit,
        })
    }

    /// Re-runs construction-time validation, used after decoding.
    pub fn validated(self) -> RecipeResult<Self> {
        Self::new(&self.name, self.quantity, &self.unit)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} de {}", self.quantity, self.unit, self.name)
    }
}

pub(crate) fn required_text(field: &str, value: &str) -> RecipeResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecipeError::invalid(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn positive(field: &str, value: f64) -> RecipeResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RecipeError::invalid(format!(
            "{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_text_fields() {
        let ingredient = Ingredient::new("  farinha ", 100.0, " g ").unwrap();
        assert_eq!(ingredient.name, "farinha");
        assert_eq!(ingredient.unit, "g");
    }

    #[test]
    fn test_new_rejects_invalid_values() {
        assert!(matches!(
            Ingredient::new("farinha", -5.0, "g"),
            Err(RecipeError::InvalidArgument(_))
        ));
        assert!(Ingredient::new("farinha", 0.0, "g").is_err());
        assert!(Ingredient::new("farinha", f64::NAN, "g").is_err());
        assert!(Ingredient::new("   ", 1.0, "g").is_err());
        assert!(Ingredient::new("farinha", 1.0, "").is_err());
    }

    #[test]
    fn test_display() {
        let eggs = Ingredient::new("ovos", 2.0, "unidades").unwrap();
        assert_eq!(eggs.to_string(), "2 unidades de ovos");
        let flour = Ingredient::new("farinha", 0.5, "kg").unwrap();
        assert_eq!(flour.to_string(), "0.5 kg de farinha");
    }
}
