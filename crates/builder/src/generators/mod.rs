//! Generator emission
//!
//! Generators translate the resolved build configuration and dependency
//! graph into files the native build system consumes: a toolchain file and
//! per-dependency package config files. Emission is a deterministic function
//! of (configuration, resolution, layout).

use crate::layout::Layout;
use crate::resolver::Resolution;
use kiln_events::{AppEvent, BuildEvent, EventEmitter};
use kiln_types::BuildConfiguration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::fs;

use kiln_errors::{Error, RecipeError};

mod cmake_deps;
mod cmake_toolchain;

/// Recognized generator names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Per-dependency CMake package config files
    CmakeDeps,
    /// CMake toolchain file carrying the build configuration
    CmakeToolchain,
}

impl GeneratorKind {
    /// Default generator set for recipes that declare none
    pub const DEFAULT: [GeneratorKind; 2] = [Self::CmakeDeps, Self::CmakeToolchain];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CmakeDeps => "cmake_deps",
            Self::CmakeToolchain => "cmake_toolchain",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cmake_deps" => Ok(Self::CmakeDeps),
            "cmake_toolchain" => Ok(Self::CmakeToolchain),
            _ => Err(RecipeError::UnknownGenerator {
                name: s.to_string(),
            }),
        }
    }
}

/// Emit all requested generators into the layout's generators folder
///
/// # Errors
///
/// Returns an error if the generators folder cannot be created or a file
/// cannot be written.
pub async fn emit_generators<E: EventEmitter>(
    generators: &[GeneratorKind],
    configuration: &BuildConfiguration,
    resolution: &Resolution,
    layout: &Layout,
    emitter: &E,
) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(&layout.generators_dir)
        .await
        .map_err(|e| Error::io_with_path(&e, layout.generators_dir.clone()))?;

    let mut written = Vec::new();
    for generator in generators {
        let paths = match generator {
            GeneratorKind::CmakeDeps => cmake_deps::emit(resolution, layout).await?,
            GeneratorKind::CmakeToolchain => {
                vec![cmake_toolchain::emit(configuration, resolution, layout).await?]
            }
        };

        for path in &paths {
            emitter.emit(AppEvent::Build(BuildEvent::GeneratorEmitted {
                generator: generator.name().to_string(),
                path: path.clone(),
            }));
        }
        written.extend(paths);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_names_roundtrip() {
        for kind in GeneratorKind::DEFAULT {
            assert_eq!(kind.name().parse::<GeneratorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_generator_rejected() {
        assert!(matches!(
            "ninja_deps".parse::<GeneratorKind>(),
            Err(RecipeError::UnknownGenerator { .. })
        ));
    }
}
