//! Folder layout policy
//!
//! The layout hook records where generated and built files go; it never
//! touches the filesystem itself. The policy is a pure function of the recipe
//! and the source directory, so establishing it twice for the same build
//! configuration always selects the same folders.

use std::path::{Path, PathBuf};

/// Name of the toolchain file written into the generators folder
pub const TOOLCHAIN_FILE: &str = "kiln_toolchain.cmake";

/// Folder policy for one package build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Directory containing the recipe and the package sources
    pub source_dir: PathBuf,
    /// Out-of-source build directory, relative to `source_dir`
    pub build_dir: PathBuf,
    /// Directory for generated integration files, inside `build_dir`
    pub generators_dir: PathBuf,
}

impl Layout {
    /// Derive the layout for a source directory and a build folder name
    #[must_use]
    pub fn new(source_dir: &Path, build_folder: &str) -> Self {
        let build_dir = source_dir.join(build_folder);
        let generators_dir = build_dir.join("generators");
        Self {
            source_dir: source_dir.to_path_buf(),
            build_dir,
            generators_dir,
        }
    }

    /// Path of the generated CMake toolchain file
    #[must_use]
    pub fn toolchain_file(&self) -> PathBuf {
        self.generators_dir.join(TOOLCHAIN_FILE)
    }
}
