//! CMake toolchain file generator

use crate::layout::Layout;
use crate::resolver::Resolution;
use kiln_types::BuildConfiguration;
use std::path::PathBuf;
use tokio::fs;

use kiln_errors::Error;

/// Write the toolchain file carrying the build configuration
///
/// The file pins the build type, system identity, and compiler, and extends
/// `CMAKE_PREFIX_PATH` with the generators folder and every resolved
/// dependency root so `find_package` resolves out of the store.
pub(crate) async fn emit(
    configuration: &BuildConfiguration,
    resolution: &Resolution,
    layout: &Layout,
) -> Result<PathBuf, Error> {
    let (cc, cxx) = configuration.compiler.family.executables();

    let mut prefix_paths = vec![layout.generators_dir.clone()];
    prefix_paths.extend(resolution.prefix_paths());
    let prefix_list = prefix_paths
        .iter()
        .map(|p| format!("\"{}\"", p.display()))
        .collect::<Vec<_>>()
        .join(" ");

    let content = format!(
        r#"# Toolchain file generated by kiln. Do not edit.
# Build configuration: {configuration}

set(CMAKE_BUILD_TYPE {build_type} CACHE STRING "" FORCE)
set(CMAKE_SYSTEM_NAME {system_name})
set(CMAKE_SYSTEM_PROCESSOR {processor})

set(CMAKE_C_COMPILER {cc})
set(CMAKE_CXX_COMPILER {cxx})

list(PREPEND CMAKE_PREFIX_PATH {prefix_list})
set(CMAKE_FIND_PACKAGE_PREFER_CONFIG ON)
"#,
        build_type = configuration.build_type,
        system_name = configuration.os.cmake_system_name(),
        processor = configuration.arch.cmake_system_processor(),
    );

    let path = layout.toolchain_file();
    fs::write(&path, content)
        .await
        .map_err(|e| Error::io_with_path(&e, path.clone()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolvedDependency;
    use kiln_types::{
        Arch, BuildType, Compiler, CompilerFamily, ConfigurationDraft, Os, PackageSpec,
    };

    fn configuration() -> BuildConfiguration {
        ConfigurationDraft::new()
            .with_os(Os::Linux)
            .with_compiler(Compiler::new(CompilerFamily::Gcc, 13))
            .with_build_type(BuildType::Release)
            .with_arch(Arch::X86_64)
            .resolve()
            .unwrap()
    }

    #[tokio::test]
    async fn test_toolchain_file_contents() {
        let temp = tempfile::tempdir().unwrap();
        let layout = Layout::new(temp.path(), "build");
        fs::create_dir_all(&layout.generators_dir).await.unwrap();

        let mut resolution = Resolution::default();
        resolution_push(
            &mut resolution,
            "jsonlib@3.12.0",
            temp.path().join("store/jsonlib/3.12.0"),
        );

        let path = emit(&configuration(), &resolution, &layout).await.unwrap();
        let content = std::fs::read_to_string(path).unwrap();

        assert!(content.contains("set(CMAKE_BUILD_TYPE Release"));
        assert!(content.contains("set(CMAKE_SYSTEM_NAME Linux)"));
        assert!(content.contains("set(CMAKE_SYSTEM_PROCESSOR x86_64)"));
        assert!(content.contains("set(CMAKE_C_COMPILER gcc)"));
        assert!(content.contains("jsonlib/3.12.0"));
        assert!(content.contains("set(CMAKE_FIND_PACKAGE_PREFER_CONFIG ON)"));
    }

    #[tokio::test]
    async fn test_emission_is_deterministic() {
        let temp = tempfile::tempdir().unwrap();
        let layout = Layout::new(temp.path(), "build");
        fs::create_dir_all(&layout.generators_dir).await.unwrap();

        let resolution = Resolution::default();
        let first = emit(&configuration(), &resolution, &layout).await.unwrap();
        let first_content = std::fs::read_to_string(&first).unwrap();
        let second = emit(&configuration(), &resolution, &layout).await.unwrap();
        let second_content = std::fs::read_to_string(&second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_content, second_content);
    }

    fn resolution_push(resolution: &mut Resolution, spec: &str, root: std::path::PathBuf) {
        *resolution = Resolution::from_dependencies(vec![ResolvedDependency {
            spec: PackageSpec::parse(spec).unwrap(),
            root,
        }]);
    }
}
