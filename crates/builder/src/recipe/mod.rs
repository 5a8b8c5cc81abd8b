//! Package recipes
//!
//! A recipe declares what a package needs to build; the host drives it
//! through an explicit three-operation contract instead of looking hooks up
//! by name. Recipes are declarative YAML documents parsed into
//! [`PackageRecipe`], which implements the [`Recipe`] trait.

mod model;
mod parser;

pub use model::{LayoutSpec, PackageRecipe};
pub use parser::{load_recipe, parse_recipe};

use crate::context::BuildContext;
use crate::generators::GeneratorKind;
use crate::layout::Layout;
use async_trait::async_trait;
use kiln_types::{PackageSpec, SettingsAxis, Version};
use std::path::Path;

use kiln_errors::Error;

/// The three lifecycle operations of a package recipe
///
/// The host invokes them in order, once per build invocation: layout, then
/// requirements, then build.
#[async_trait]
pub trait Recipe: Send + Sync {
    /// Package name
    fn name(&self) -> &str;

    /// Package version
    fn version(&self) -> &Version;

    /// Declared license, if any
    fn license(&self) -> Option<&str>;

    /// Settings axes that are part of this package's build identity
    fn settings(&self) -> &[SettingsAxis];

    /// Generators to emit before the build hook runs
    fn generators(&self) -> &[GeneratorKind];

    /// Establish the folder layout for one build
    ///
    /// Deterministic and idempotent: the same recipe and source directory
    /// always select the same folders. Records path policy only; the
    /// filesystem is not touched here.
    fn establish_layout(&self, source_dir: &Path) -> Layout;

    /// Declare the exact-pinned dependency set
    ///
    /// Registers entries for the resolver; fetches and builds nothing.
    fn declare_requirements(&self) -> Vec<PackageSpec>;

    /// Run the underlying build system's configure and build phases
    ///
    /// # Errors
    ///
    /// Any configure or build failure aborts the package build with the
    /// tool's diagnostics carried verbatim; recipes perform no recovery.
    async fn run_build(&self, ctx: &BuildContext) -> Result<(), Error>;
}
