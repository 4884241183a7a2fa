use std::env;
use std::path::PathBuf;

pub const DATA_DIR_ENV_VAR: &str = "RECIPE_SCALER_DATA_DIR";
pub const NUTRITION_CSV_ENV_VAR: &str = "RECIPE_SCALER_NUTRITION_CSV";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the category and favorite lists.
    pub data_dir: PathBuf,
    /// Optional CSV extending the built-in nutrition table.
    pub nutrition_csv: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            nutrition_csv: None,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the environment (after `.env` is loaded).
    /// An explicit `data_dir` wins over the environment.
    pub fn from_env(data_dir: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        let data_dir = data_dir
            .or_else(|| env::var(DATA_DIR_ENV_VAR).ok().map(PathBuf::from))
            .unwrap_or(defaults.data_dir);
        let nutrition_csv = env::var(NUTRITION_CSV_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self {
            data_dir,
            nutrition_csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = AppConfig::from_env(Some(PathBuf::from("/tmp/receitas")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/receitas"));
    }
}
