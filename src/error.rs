use thiserror::Error;

/// The one failure kind of the recipe core. Every operation that returns it
/// leaves the recipe exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RecipeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RecipeError::InvalidArgument(message.into())
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::InvalidArgument(format!("malformed recipe document: {}", err))
    }
}

pub type RecipeResult<T> = std::result::Result<T, RecipeError>;
