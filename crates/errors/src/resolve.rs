//! Dependency resolution error types

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ResolveError {
    #[error("package not found in store: {name}@{version}")]
    PackageNotFound { name: String, version: String },

    #[error("package store unavailable: {path}")]
    StoreUnavailable { path: String },
}

impl UserFacingError for ResolveError {
    fn user_message(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            ResolveError::PackageNotFound { .. } => {
                Some("Add the pinned version to the package store or fix the pin.")
            }
            ResolveError::StoreUnavailable { .. } => {
                Some("Set the store path in the config file or with --store.")
            }
        }
    }
}
