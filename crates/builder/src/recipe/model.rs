//! Declarative recipe structure

use crate::cmake::CmakeDriver;
use crate::context::BuildContext;
use crate::generators::GeneratorKind;
use crate::layout::Layout;
use crate::recipe::Recipe;
use async_trait::async_trait;
use kiln_types::{PackageSpec, SettingsAxis, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path};

use kiln_errors::{Error, RecipeError};

/// Complete recipe structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecipe {
    /// Package name
    pub name: String,

    /// Package version
    pub version: Version,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Settings axes forming the build-configuration identity
    #[serde(default = "default_settings")]
    pub settings: Vec<SettingsAxis>,

    /// Generators to emit, in order
    #[serde(default = "default_generators")]
    pub generators: Vec<GeneratorKind>,

    /// Exact-pinned dependency declarations
    #[serde(default)]
    pub requires: Vec<PackageSpec>,

    /// Path globs included in a packaged source archive
    #[serde(default)]
    pub exports_sources: Vec<String>,

    /// Folder layout policy
    #[serde(default)]
    pub layout: LayoutSpec,
}

/// Layout section of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default = "default_build_folder")]
    pub build_folder: String,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            build_folder: default_build_folder(),
        }
    }
}

fn default_settings() -> Vec<SettingsAxis> {
    SettingsAxis::ALL.to_vec()
}

fn default_generators() -> Vec<GeneratorKind> {
    GeneratorKind::DEFAULT.to_vec()
}

fn default_build_folder() -> String {
    "build".to_string()
}

impl PackageRecipe {
    /// Validate invariants serde cannot express
    ///
    /// # Errors
    ///
    /// Returns an error for an empty package name, duplicate dependency
    /// declarations, or a build folder escaping the source directory.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(RecipeError::ParseError {
                message: "package name must not be empty".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for spec in &self.requires {
            if !seen.insert(spec.name.as_str()) {
                return Err(RecipeError::DuplicateRequirement {
                    name: spec.name.clone(),
                }
                .into());
            }
        }

        let folder = Path::new(&self.layout.build_folder);
        if self.layout.build_folder.is_empty()
            || folder.is_absolute()
            || folder.components().any(|c| c == Component::ParentDir)
        {
            return Err(RecipeError::InvalidLayout {
                folder: self.layout.build_folder.clone(),
                message: "build folder must be a relative path inside the source directory"
                    .to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl Recipe for PackageRecipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &Version {
        &self.version
    }

    fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    fn settings(&self) -> &[SettingsAxis] {
        &self.settings
    }

    fn generators(&self) -> &[GeneratorKind] {
        &self.generators
    }

    fn establish_layout(&self, source_dir: &Path) -> Layout {
        Layout::new(source_dir, &self.layout.build_folder)
    }

    fn declare_requirements(&self) -> Vec<PackageSpec> {
        self.requires.clone()
    }

    async fn run_build(&self, ctx: &BuildContext) -> Result<(), Error> {
        let driver = CmakeDriver::new();
        driver.configure(ctx).await?;
        driver.build(ctx).await
    }
}
