use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scale, convert and manage cooking recipes", long_about = None)]
pub struct Cli {
    /// Directory holding the category and favorite lists
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new, empty recipe file
    New {
        file: PathBuf,
        #[arg(short, long)]
        name: String,
        #[arg(short, long = "yield", default_value_t = 1.0)]
        yield_count: f64,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Print the recipe card
    Show { file: PathBuf },
    /// Append an ingredient
    Add {
        file: PathBuf,
        name: String,
        quantity: f64,
        unit: String,
    },
    /// Replace the ingredient at a 1-based position
    Edit {
        file: PathBuf,
        index: usize,
        name: String,
        quantity: f64,
        unit: String,
    },
    /// Remove the ingredient at a 1-based position
    Remove { file: PathBuf, index: usize },
    /// Rename the recipe
    Rename { file: PathBuf, name: String },
    /// Set the recipe category
    Category { file: PathBuf, category: String },
    /// Set the preparation text
    Prepare { file: PathBuf, text: String },
    /// Declare the yield of the current quantities without rescaling them
    SetYield { file: PathBuf, yield_count: f64 },
    /// Rescale every quantity to a new yield
    Scale { file: PathBuf, new_yield: f64 },
    /// Multiply every quantity by a factor (yield unchanged)
    Multiply { file: PathBuf, factor: f64 },
    /// Divide every quantity by a factor (yield unchanged)
    Divide { file: PathBuf, factor: f64 },
    /// Convert the ingredient at a 1-based position to another unit
    Convert {
        file: PathBuf,
        index: usize,
        target_unit: String,
    },
    /// List the suggested units and the conversions available from each
    Units,
    /// Show nutrition totals for the recipe
    Nutrition { file: PathBuf },
    /// List or extend the category list
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Toggle the recipe as favorite
    Favorite { file: PathBuf },
    /// Write the recipe card to a text file
    Export { file: PathBuf, output: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    List,
    Add { name: String },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Turns a 1-based position typed by the user into a list index.
pub fn to_index(position: usize) -> anyhow::Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("Ingredient positions start at 1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scale_command() {
        let cli = Cli::try_parse_from(["recipe-scaler", "scale", "bolo.json", "6"]).unwrap();
        match cli.command {
            Command::Scale { file, new_yield } => {
                assert_eq!(file, PathBuf::from("bolo.json"));
                assert_eq!(new_yield, 6.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_with_multi_word_unit() {
        let cli = Cli::try_parse_from([
            "recipe-scaler",
            "--data-dir",
            "/tmp",
            "add",
            "bolo.json",
            "óleo",
            "2",
            "colher de sopa",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp")));
        assert!(matches!(cli.command, Command::Add { ref unit, .. } if unit == "colher de sopa"));
    }

    #[test]
    fn test_to_index() {
        assert_eq!(to_index(1).unwrap(), 0);
        assert!(to_index(0).is_err());
    }
}
