//! Recipe parsing and validation error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RecipeError {
    #[error("failed to parse recipe: {message}")]
    ParseError { message: String },

    #[error("unknown generator: {name}")]
    UnknownGenerator { name: String },

    #[error("duplicate dependency declaration: {name}")]
    DuplicateRequirement { name: String },

    #[error("invalid build folder {folder:?}: {message}")]
    InvalidLayout { folder: String, message: String },
}
