//! Build environment and command execution

use kiln_events::{AppEvent, BuildEvent, EventEmitter, EventSender};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use kiln_errors::{BuildError, Error};

/// Environment a package build runs in: working directory plus the extra
/// variables layered over the inherited process environment
#[derive(Debug, Clone)]
pub struct BuildEnvironment {
    package: String,
    build_dir: PathBuf,
    env_vars: HashMap<String, String>,
    event_sender: Option<EventSender>,
}

impl EventEmitter for BuildEnvironment {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl BuildEnvironment {
    /// Create a new build environment rooted at the build directory
    #[must_use]
    pub fn new(package: impl Into<String>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            package: package.into(),
            build_dir: build_dir.into(),
            env_vars: HashMap::new(),
            event_sender: None,
        }
    }

    /// Set event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Set an extra environment variable for all commands
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env_vars.insert(key.into(), value.into());
    }

    /// Extra environment variables layered over the inherited environment
    #[must_use]
    pub fn env_vars(&self) -> &HashMap<String, String> {
        &self.env_vars
    }

    /// Execute a command in the build environment, capturing its output
    ///
    /// A non-zero exit is not an error at this layer; callers inspect
    /// [`BuildCommandResult::success`] and decide how the failure maps into
    /// their phase. Diagnostics are captured verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error only if the program cannot be spawned at all.
    pub async fn execute_command(
        &self,
        program: &str,
        args: &[&str],
        working_dir: Option<&Path>,
    ) -> Result<BuildCommandResult, Error> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.envs(&self.env_vars);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        } else {
            cmd.current_dir(&self.build_dir);
        }

        self.emit(AppEvent::Build(BuildEvent::StepStarted {
            step: format!("{program} {}", args.join(" ")),
            package: self.package.clone(),
        }));

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::from(BuildError::MissingBuildTool {
                    tool: program.to_string(),
                })
            } else {
                BuildError::Failed {
                    message: format!("{program}: {e}"),
                }
                .into()
            }
        })?;

        Ok(BuildCommandResult {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Captured result of one build command
#[derive(Debug, Clone)]
pub struct BuildCommandResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_captures_output() {
        let temp = tempfile::tempdir().unwrap();
        let env = BuildEnvironment::new("test", temp.path());
        let result = env
            .execute_command("sh", &["-c", "echo out; echo err >&2"], None)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout.trim(), "out");
        assert_eq!(result.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let env = BuildEnvironment::new("test", temp.path());
        let result = env
            .execute_command("sh", &["-c", "exit 3"], None)
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[tokio::test]
    async fn test_missing_program_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let env = BuildEnvironment::new("test", temp.path());
        let err = env
            .execute_command("definitely-not-a-real-tool", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::MissingBuildTool { .. })
        ));
    }

    #[tokio::test]
    async fn test_extra_env_vars_are_passed() {
        let temp = tempfile::tempdir().unwrap();
        let mut env = BuildEnvironment::new("test", temp.path());
        env.set_var("KILN_TEST_VAR", "42");
        let result = env
            .execute_command("sh", &["-c", "printf %s \"$KILN_TEST_VAR\""], None)
            .await
            .unwrap();
        assert_eq!(result.stdout, "42");
    }
}
