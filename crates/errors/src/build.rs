//! Build system error types

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum BuildError {
    #[error("build failed: {message}")]
    Failed { message: String },

    #[error("configure failed: {message}")]
    ConfigureFailed { message: String },

    #[error("compilation failed: {message}")]
    CompilationFailed { message: String },

    #[error("build hook invoked in phase {phase}, dependency resolution has not completed")]
    NotConfigured { phase: String },

    #[error("invalid phase transition: {from} -> {to}")]
    InvalidPhaseTransition { from: String, to: String },

    #[error("missing build tool: {tool}")]
    MissingBuildTool { tool: String },

    #[error("source export failed: {message}")]
    ExportFailed { message: String },

    #[error("no sources matched the export globs")]
    NoSourcesExported,
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            BuildError::MissingBuildTool { .. } => {
                Some("Install cmake and make sure it is on PATH.")
            }
            BuildError::NotConfigured { .. } => {
                Some("Run the configure step before building.")
            }
            _ => None,
        }
    }
}
