//! Recipe loading and parsing

use crate::recipe::PackageRecipe;
use std::path::Path;
use tokio::fs;

use kiln_errors::{Error, RecipeError};

/// Load and validate a recipe file
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub async fn load_recipe(path: &Path) -> Result<PackageRecipe, Error> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(&e, path))?;
    parse_recipe(&content)
}

/// Parse and validate recipe YAML
///
/// # Errors
///
/// Returns `RecipeError::ParseError` for malformed YAML or field values
/// (including non-exact dependency pins), plus any validation error.
pub fn parse_recipe(yaml: &str) -> Result<PackageRecipe, Error> {
    let recipe: PackageRecipe =
        serde_yml::from_str(yaml).map_err(|e| RecipeError::ParseError {
            message: e.to_string(),
        })?;
    recipe.validate()?;
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::GeneratorKind;
    use kiln_types::{SettingsAxis, Version};

    #[test]
    fn test_parse_minimal_recipe() {
        let yaml = r"
name: lama_launcher
version: 0.1.0
requires:
  - jsonlib@3.12.0
";
        let recipe = parse_recipe(yaml).unwrap();
        assert_eq!(recipe.name, "lama_launcher");
        assert_eq!(recipe.version, Version::new(0, 1, 0));
        assert_eq!(recipe.settings, SettingsAxis::ALL.to_vec());
        assert_eq!(recipe.generators, GeneratorKind::DEFAULT.to_vec());
        assert_eq!(recipe.layout.build_folder, "build");
        assert_eq!(recipe.requires.len(), 1);
        assert_eq!(recipe.requires[0].name, "jsonlib");
    }

    #[test]
    fn test_parse_full_recipe() {
        let yaml = r#"
name: lama_launcher
version: 0.1.0
license: MIT
description: Launcher for a local inference server

settings: [os, compiler, build_type, arch]
generators: [cmake_deps, cmake_toolchain]

requires:
  - jsonlib@3.12.0

exports_sources:
  - CMakeLists.txt
  - "src/**"

layout:
  build_folder: out
"#;
        let recipe = parse_recipe(yaml).unwrap();
        assert_eq!(recipe.license.as_deref(), Some("MIT"));
        assert_eq!(recipe.exports_sources.len(), 2);
        assert_eq!(recipe.layout.build_folder, "out");
    }

    #[test]
    fn test_range_pin_rejected_at_parse_time() {
        let yaml = r"
name: lama_launcher
version: 0.1.0
requires:
  - jsonlib@>=3.0
";
        let err = parse_recipe(yaml).unwrap_err();
        assert!(err.to_string().contains("not exact"), "got: {err}");
    }

    #[test]
    fn test_unknown_generator_rejected() {
        let yaml = r"
name: lama_launcher
version: 0.1.0
generators: [ninja_deps]
";
        assert!(parse_recipe(yaml).is_err());
    }

    #[test]
    fn test_unknown_settings_axis_rejected() {
        let yaml = r"
name: lama_launcher
version: 0.1.0
settings: [os, libc]
";
        assert!(parse_recipe(yaml).is_err());
    }

    #[test]
    fn test_duplicate_requirement_rejected() {
        let yaml = r"
name: lama_launcher
version: 0.1.0
requires:
  - jsonlib@3.12.0
  - jsonlib@3.11.0
";
        let err = parse_recipe(yaml).unwrap_err();
        assert!(matches!(
            err,
            Error::Recipe(RecipeError::DuplicateRequirement { .. })
        ));
    }

    #[test]
    fn test_escaping_build_folder_rejected() {
        let yaml = r"
name: lama_launcher
version: 0.1.0
layout:
  build_folder: ../elsewhere
";
        let err = parse_recipe(yaml).unwrap_err();
        assert!(matches!(
            err,
            Error::Recipe(RecipeError::InvalidLayout { .. })
        ));
    }
}
