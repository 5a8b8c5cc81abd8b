//! Version and dependency specification error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VersionError {
    #[error("invalid version: {message}")]
    ParseError { message: String },

    #[error("invalid dependency spec: {input}")]
    InvalidSpec { input: String },

    #[error("dependency pin is not exact: {input}")]
    NotExact { input: String },
}
