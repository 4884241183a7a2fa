use serde::{Deserialize, Serialize};

/// Units whose quantities are counted rather than measured. A unit is treated as
/// countable when its lowercased text contains any of these keywords.
pub const DEFAULT_INTEGER_UNITS: [&str; 5] = ["unidade", "un", "unidades", "ovo", "ovos"];

/// Units offered to the user when picking a unit for a new ingredient.
pub const DEFAULT_UNITS: [&str; 13] = [
    "g",
    "kg",
    "mg",
    "ml",
    "l",
    "xícara",
    "colher de sopa",
    "colher de chá",
    "unidades",
    "pitada",
    "a gosto",
    "oz",
    "lb",
];

/// Decimal places kept for measured (non-countable) quantities and for
/// converted quantities.
pub const MEASURED_DECIMALS: usize = 2;

/// A linear conversion rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionRule {
    MultiplyBy(f64),
    DivideBy(f64),
}

impl ConversionRule {
    pub fn apply(&self, quantity: f64) -> f64 {
        match self {
            ConversionRule::MultiplyBy(factor) => quantity * factor,
            ConversionRule::DivideBy(divisor) => quantity / divisor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    pub from: String,
    pub to: String,
    pub rule: ConversionRule,
}

impl UnitConversion {
    fn new(from: &str, to: &str, rule: ConversionRule) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            rule,
        }
    }
}

/// Unit vocabulary used by the scaling and conversion operations.
///
/// The defaults hold the calculator's fixed tables: only
/// grams and milliliters can be converted, and only away from the base unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub integer_units: Vec<String>,
    pub conversions: Vec<UnitConversion>,
}

impl Default for UnitConfig {
    fn default() -> Self {
        use ConversionRule::{DivideBy, MultiplyBy};

        let conversions = vec![
            UnitConversion::new("g", "kg", DivideBy(1000.0)),
            UnitConversion::new("g", "mg", MultiplyBy(1000.0)),
            UnitConversion::new("g", "oz", MultiplyBy(0.035274)),
            UnitConversion::new("g", "lb", MultiplyBy(0.00220462)),
            UnitConversion::new("ml", "l", DivideBy(1000.0)),
            UnitConversion::new("ml", "cup", DivideBy(240.0)),
            UnitConversion::new("ml", "tablespoon", DivideBy(15.0)),
            UnitConversion::new("ml", "teaspoon", DivideBy(5.0)),
            // Same volume measures under the names the unit picker offers.
            UnitConversion::new("ml", "xícara", DivideBy(240.0)),
            UnitConversion::new("ml", "colher de sopa", DivideBy(15.0)),
            UnitConversion::new("ml", "colher de chá", DivideBy(5.0)),
        ];

        Self {
            integer_units: DEFAULT_INTEGER_UNITS.iter().map(|u| u.to_string()).collect(),
            conversions,
        }
    }
}

impl UnitConfig {
    /// Whether quantities in `unit` are rounded to whole numbers when scaled.
    pub fn is_integer_unit(&self, unit: &str) -> bool {
        let unit = unit.to_lowercase();
        self.integer_units
            .iter()
            .any(|keyword| unit.contains(keyword.as_str()))
    }

    /// Rounds a scaled quantity according to the unit it is expressed in.
    pub fn round_for_unit(&self, unit: &str, value: f64) -> f64 {
        if self.is_integer_unit(unit) {
            round_half_even(value, 0)
        } else {
            round_half_even(value, MEASURED_DECIMALS)
        }
    }

    /// Conversion from `from` to `to`, matching both units case-insensitively.
    pub fn find_conversion(&self, from: &str, to: &str) -> Option<&UnitConversion> {
        self.conversions
            .iter()
            .find(|c| same_unit(&c.from, from) && same_unit(&c.to, to))
    }

    /// Target units reachable from `unit`, in table order.
    pub fn available_conversions(&self, unit: &str) -> Vec<&str> {
        self.conversions
            .iter()
            .filter(|c| same_unit(&c.from, unit))
            .map(|c| c.to.as_str())
            .collect()
    }
}

pub fn same_unit(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Rounds to `decimals` places, sending exact ties to the even neighbour.
///
/// Rounding is decided on the exact binary value, so 2.675 (stored as
/// 2.67499999...) and 0.015 (stored as 0.01499999...) both round down.
pub fn round_half_even(value: f64, decimals: usize) -> f64 {
    if decimals == 0 {
        return value.round_ties_even();
    }
    // Float formatting rounds the exact value, ties to even.
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_units_match_by_substring_ignoring_case() {
        let config = UnitConfig::default();
        assert!(config.is_integer_unit("unidades"));
        assert!(config.is_integer_unit("Ovos"));
        assert!(config.is_integer_unit("UN"));
        assert!(config.is_integer_unit("ovo grande"));
        assert!(!config.is_integer_unit("g"));
        assert!(!config.is_integer_unit("colher de sopa"));
        assert!(!config.is_integer_unit("a gosto"));
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(0.125, 2), 0.12);
        assert_eq!(round_half_even(0.375, 2), 0.38);
        assert_eq!(round_half_even(33.3333, 2), 33.33);
    }

    #[test]
    fn test_round_half_even_uses_exact_binary_value() {
        assert_eq!(round_half_even(0.015, 2), 0.01);
        assert_eq!(round_half_even(1.115, 2), 1.11);
        assert_eq!(round_half_even(2.675, 2), 2.67);
        assert_eq!(round_half_even(0.025, 2), 0.03);
        assert_eq!(round_half_even(1.005, 2), 1.0);
    }

    #[test]
    fn test_round_for_unit() {
        let config = UnitConfig::default();
        assert_eq!(config.round_for_unit("ovos", 1.5), 2.0);
        assert_eq!(config.round_for_unit("g", 1.555555), 1.56);
    }

    #[test]
    fn test_available_conversions() {
        let config = UnitConfig::default();
        assert_eq!(config.available_conversions("g"), vec!["kg", "mg", "oz", "lb"]);
        assert!(config.available_conversions("ml").contains(&"cup"));
        assert!(config.available_conversions("kg").is_empty());
        assert_eq!(config.available_conversions("G"), vec!["kg", "mg", "oz", "lb"]);
    }

    #[test]
    fn test_conversion_rules() {
        let config = UnitConfig::default();
        let to_kg = config.find_conversion("g", "kg").unwrap();
        assert_eq!(to_kg.rule.apply(500.0), 0.5);
        let to_cup = config.find_conversion("ml", "cup").unwrap();
        assert_eq!(to_cup.rule.apply(240.0), 1.0);
        assert!(config.find_conversion("kg", "g").is_none());
        assert!(config.find_conversion("ML", "Xícara").is_some());
    }

    #[test]
    fn test_portuguese_volume_targets() {
        let config = UnitConfig::default();
        let rule = |to: &str| config.find_conversion("ml", to).unwrap().rule;
        assert_eq!(rule("xícara").apply(480.0), 2.0);
        assert_eq!(rule("colher de sopa").apply(45.0), 3.0);
        assert_eq!(rule("colher de chá").apply(10.0), 2.0);
    }
}
