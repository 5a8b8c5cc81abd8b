//! Source export
//!
//! `exports_sources` globs select the files that make up a packaged source
//! archive. Export walks the recipe directory, matches the globs against
//! paths relative to it, and packs the selection into
//! `<name>-<version>.src.tar`.

use crate::recipe::PackageRecipe;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use kiln_errors::{BuildError, Error};

/// Pack the recipe's exported sources into a tar archive under `out_dir`
///
/// # Errors
///
/// Returns an error when the recipe declares no export globs, a glob is
/// malformed, nothing matches, or the archive cannot be written.
pub fn export_sources(
    recipe: &PackageRecipe,
    source_dir: &Path,
    out_dir: &Path,
) -> Result<PathBuf, Error> {
    if recipe.exports_sources.is_empty() {
        return Err(BuildError::ExportFailed {
            message: "recipe declares no exports_sources".to_string(),
        }
        .into());
    }

    let globs = build_glob_set(&recipe.exports_sources)?;
    let build_folder = Path::new(&recipe.layout.build_folder);

    let mut selected = Vec::new();
    for entry in WalkBuilder::new(source_dir).build() {
        let entry = entry.map_err(|e| BuildError::ExportFailed {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        // Never export build artifacts, even when a glob would match them.
        if relative.starts_with(build_folder) {
            continue;
        }
        if globs.is_match(relative) {
            selected.push(relative.to_path_buf());
        }
    }

    if selected.is_empty() {
        return Err(BuildError::NoSourcesExported.into());
    }
    selected.sort();

    std::fs::create_dir_all(out_dir).map_err(|e| Error::io_with_path(&e, out_dir))?;
    let archive_path = out_dir.join(format!("{}-{}.src.tar", recipe.name, recipe.version));
    let file = std::fs::File::create(&archive_path)
        .map_err(|e| Error::io_with_path(&e, archive_path.clone()))?;

    let mut archive = tar::Builder::new(file);
    for relative in &selected {
        archive
            .append_path_with_name(source_dir.join(relative), relative)
            .map_err(|e| BuildError::ExportFailed {
                message: format!("{}: {e}", relative.display()),
            })?;
    }
    archive.finish().map_err(|e| BuildError::ExportFailed {
        message: e.to_string(),
    })?;

    Ok(archive_path)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| BuildError::ExportFailed {
            message: format!("invalid glob {pattern:?}: {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        BuildError::ExportFailed {
            message: e.to_string(),
        }
        .into()
    })
}
