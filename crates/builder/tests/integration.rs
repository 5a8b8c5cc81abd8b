//! Integration tests for build orchestration
//!
//! These walk a recipe through the full lifecycle against a temporary source
//! directory and package store. The cmake end-to-end test only runs when a
//! real toolchain is present on the host.

use async_trait::async_trait;
use kiln_builder::{parse_recipe, Builder, BuildContext, GeneratorKind, Layout, Recipe};
use kiln_config::Config;
use kiln_errors::{BuildError, Error, ResolveError};
use kiln_types::{
    Arch, BuildConfiguration, BuildType, Compiler, CompilerFamily, ConfigurationDraft, Os,
    PackageSpec, RecipePhase, SettingsAxis, Version,
};
use std::path::{Path, PathBuf};

const RECIPE_YAML: &str = r"
name: lama_launcher
version: 0.1.0
license: MIT
requires:
  - jsonlib@3.12.0
";

fn configuration() -> BuildConfiguration {
    ConfigurationDraft::new()
        .with_os(Os::Linux)
        .with_compiler(Compiler::new(CompilerFamily::Gcc, 13))
        .with_build_type(BuildType::Release)
        .with_arch(Arch::X86_64)
        .resolve()
        .unwrap()
}

fn config_with_store(store: &Path) -> Config {
    let mut config = Config::default();
    config.paths.store_path = Some(store.to_path_buf());
    config
}

fn seeded_store(root: &Path) -> PathBuf {
    let store = root.join("store");
    std::fs::create_dir_all(store.join("jsonlib/3.12.0/include")).unwrap();
    store
}

#[tokio::test]
async fn test_configure_resolves_and_emits_generators() {
    let temp = tempfile::tempdir().unwrap();
    let store = seeded_store(temp.path());
    let recipe = parse_recipe(RECIPE_YAML).unwrap();

    let mut builder = Builder::new(
        Box::new(recipe),
        temp.path(),
        configuration(),
        config_with_store(&store),
    );
    assert_eq!(builder.phase(), RecipePhase::Declared);

    builder.configure().await.unwrap();
    assert_eq!(builder.phase(), RecipePhase::Configured);

    let generators = temp.path().join("build/generators");
    assert!(generators.join("kiln_toolchain.cmake").exists());
    assert!(generators.join("jsonlib-config.cmake").exists());
}

#[tokio::test]
async fn test_build_without_configure_fails() {
    let temp = tempfile::tempdir().unwrap();
    let store = seeded_store(temp.path());
    let recipe = parse_recipe(RECIPE_YAML).unwrap();

    let mut builder = Builder::new(
        Box::new(recipe),
        temp.path(),
        configuration(),
        config_with_store(&store),
    );

    let err = builder.build().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Build(BuildError::NotConfigured { .. })
    ));
    assert_eq!(builder.phase(), RecipePhase::Declared);
}

#[tokio::test]
async fn test_unresolvable_pin_fails_before_the_build_hook() {
    let temp = tempfile::tempdir().unwrap();
    let store = seeded_store(temp.path());
    let recipe = parse_recipe(
        r"
name: lama_launcher
version: 0.1.0
requires:
  - jsonlib@99.99.99
",
    )
    .unwrap();

    let mut builder = Builder::new(
        Box::new(recipe),
        temp.path(),
        configuration(),
        config_with_store(&store),
    );

    let err = builder.configure().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Resolve(ResolveError::PackageNotFound { .. })
    ));
    assert_eq!(builder.phase(), RecipePhase::Declared);
}

#[tokio::test]
async fn test_configure_twice_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let store = seeded_store(temp.path());
    let recipe = parse_recipe(RECIPE_YAML).unwrap();

    let mut builder = Builder::new(
        Box::new(recipe),
        temp.path(),
        configuration(),
        config_with_store(&store),
    );
    builder.configure().await.unwrap();

    let err = builder.configure().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Build(BuildError::InvalidPhaseTransition { .. })
    ));
}

#[test]
fn test_layout_hook_is_idempotent() {
    let recipe = parse_recipe(RECIPE_YAML).unwrap();
    let source = Path::new("/work/lama_launcher");
    assert_eq!(
        recipe.establish_layout(source),
        recipe.establish_layout(source)
    );
}

/// Recipe whose build hook always fails, for exercising the phase machine
struct FailingRecipe {
    version: Version,
}

#[async_trait]
impl Recipe for FailingRecipe {
    fn name(&self) -> &str {
        "doomed"
    }

    fn version(&self) -> &Version {
        &self.version
    }

    fn license(&self) -> Option<&str> {
        None
    }

    fn settings(&self) -> &[SettingsAxis] {
        &SettingsAxis::ALL
    }

    fn generators(&self) -> &[GeneratorKind] {
        &[]
    }

    fn establish_layout(&self, source_dir: &Path) -> Layout {
        Layout::new(source_dir, "build")
    }

    fn declare_requirements(&self) -> Vec<PackageSpec> {
        Vec::new()
    }

    async fn run_build(&self, _ctx: &BuildContext) -> Result<(), Error> {
        Err(BuildError::CompilationFailed {
            message: "simulated compiler crash".to_string(),
        }
        .into())
    }
}

#[tokio::test]
async fn test_failed_build_is_terminal() {
    let temp = tempfile::tempdir().unwrap();
    let recipe = FailingRecipe {
        version: Version::new(0, 1, 0),
    };

    let mut builder = Builder::new(
        Box::new(recipe),
        temp.path(),
        configuration(),
        Config::default(),
    );
    builder.configure().await.unwrap();

    let err = builder.build().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Build(BuildError::CompilationFailed { .. })
    ));
    assert_eq!(builder.phase(), RecipePhase::Failed);

    // Terminal: a fresh orchestrator is required to start over
    let err = builder.build().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Build(BuildError::NotConfigured { .. })
    ));
}

#[tokio::test]
async fn test_end_to_end_cmake_build() {
    if which::which("cmake").is_err() || which::which("gcc").is_err() {
        eprintln!("skipping: cmake or gcc not available");
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("CMakeLists.txt"),
        "cmake_minimum_required(VERSION 3.10)\nproject(hello C)\nadd_executable(hello main.c)\n",
    )
    .unwrap();
    std::fs::write(temp.path().join("main.c"), "int main(void) { return 0; }\n").unwrap();

    // Use the real host identity so the emitted toolchain file matches the
    // machine the compile runs on.
    let draft = ConfigurationDraft::detect_host()
        .with_build_type(BuildType::Release)
        .with_compiler(Compiler::new(CompilerFamily::Gcc, 13));
    let Ok(host_configuration) = draft.resolve() else {
        eprintln!("skipping: unsupported host platform");
        return;
    };

    let recipe = parse_recipe("name: hello\nversion: 0.1.0\n").unwrap();
    let mut builder = Builder::new(
        Box::new(recipe),
        temp.path(),
        host_configuration,
        Config::default(),
    );

    builder.configure().await.unwrap();
    builder.build().await.unwrap();

    assert_eq!(builder.phase(), RecipePhase::Built);
    assert!(temp.path().join("build/CMakeCache.txt").exists());
}
