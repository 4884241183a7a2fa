pub mod app;
pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod favorites;
pub mod ingredient;
pub mod nutrition;
pub mod recipe;
pub mod render;
pub mod store;
pub mod units;

pub use error::{RecipeError, RecipeResult};
pub use ingredient::Ingredient;
pub use recipe::Recipe;
pub use units::UnitConfig;
