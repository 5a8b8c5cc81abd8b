//! CMake build driver
//!
//! The build hook is a thin pass-through to CMake's two-phase protocol:
//! configure generates the native build files from the toolchain and
//! dependency config files, build invokes the native toolchain. Failures
//! abort the package build with the tool's diagnostics carried verbatim.

use crate::context::BuildContext;
use tokio::fs;

use kiln_errors::{BuildError, Error};

/// Driver for CMake's configure and build phases
#[derive(Debug, Clone, Copy, Default)]
pub struct CmakeDriver;

impl CmakeDriver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Arguments for the configure phase
    #[must_use]
    pub fn configure_args(&self, ctx: &BuildContext) -> Vec<String> {
        vec![
            ctx.layout.source_dir.display().to_string(),
            format!(
                "-DCMAKE_TOOLCHAIN_FILE={}",
                ctx.layout.toolchain_file().display()
            ),
            format!("-DCMAKE_BUILD_TYPE={}", ctx.configuration.build_type),
        ]
    }

    /// Run the configure phase in the build directory
    ///
    /// # Errors
    ///
    /// Returns `BuildError::MissingBuildTool` when cmake is not on PATH and
    /// `BuildError::ConfigureFailed` carrying cmake's stderr otherwise.
    pub async fn configure(&self, ctx: &BuildContext) -> Result<(), Error> {
        if which::which("cmake").is_err() {
            return Err(BuildError::MissingBuildTool {
                tool: "cmake".to_string(),
            }
            .into());
        }

        fs::create_dir_all(&ctx.layout.build_dir)
            .await
            .map_err(|e| Error::io_with_path(&e, ctx.layout.build_dir.clone()))?;

        let args = self.configure_args(ctx);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let result = ctx
            .env
            .execute_command("cmake", &arg_refs, Some(&ctx.layout.build_dir))
            .await?;

        if !result.success {
            return Err(BuildError::ConfigureFailed {
                message: result.stderr,
            }
            .into());
        }

        Ok(())
    }

    /// Run the build phase in the build directory
    ///
    /// # Errors
    ///
    /// Returns `BuildError::CompilationFailed` carrying cmake's stderr.
    pub async fn build(&self, ctx: &BuildContext) -> Result<(), Error> {
        let mut args = vec!["--build".to_string(), ".".to_string()];

        let jobs;
        if ctx.jobs > 1 {
            jobs = ctx.jobs.to_string();
            args.push("--parallel".to_string());
            args.push(jobs);
        }

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let result = ctx
            .env
            .execute_command("cmake", &arg_refs, Some(&ctx.layout.build_dir))
            .await?;

        if !result.success {
            return Err(BuildError::CompilationFailed {
                message: result.stderr,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::BuildEnvironment;
    use crate::layout::Layout;
    use crate::resolver::Resolution;
    use kiln_types::{
        Arch, BuildType, Compiler, CompilerFamily, ConfigurationDraft, Os, Version,
    };

    fn context(source_dir: &std::path::Path) -> BuildContext {
        let configuration = ConfigurationDraft::new()
            .with_os(Os::Linux)
            .with_compiler(Compiler::new(CompilerFamily::Gcc, 13))
            .with_build_type(BuildType::Release)
            .with_arch(Arch::X86_64)
            .resolve()
            .unwrap();
        let layout = Layout::new(source_dir, "build");
        let env = BuildEnvironment::new("test", layout.build_dir.clone());
        BuildContext {
            package: "test".to_string(),
            version: Version::new(0, 1, 0),
            configuration,
            layout,
            resolution: Resolution::default(),
            env,
            jobs: 4,
            event_sender: None,
        }
    }

    #[test]
    fn test_configure_args() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(temp.path());
        let args = CmakeDriver::new().configure_args(&ctx);

        assert_eq!(args[0], temp.path().display().to_string());
        assert!(args
            .iter()
            .any(|a| a.starts_with("-DCMAKE_TOOLCHAIN_FILE=")
                && a.ends_with("kiln_toolchain.cmake")));
        assert!(args.iter().any(|a| a == "-DCMAKE_BUILD_TYPE=Release"));
    }
}
