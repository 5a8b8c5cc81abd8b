//! Host toolchain probing
//!
//! Fills the compiler axis when neither the CLI nor the config pins one.
//! The probe asks the system `cc` for its identity and major version; when
//! that fails the axis stays unresolved and configuration resolution reports
//! it before any hook runs.

use kiln_types::{Compiler, CompilerFamily};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Probe the host C compiler
///
/// Returns `None` when `cc` is missing or its output is unrecognizable.
pub async fn detect_host_compiler() -> Option<Compiler> {
    let version_out = run_cc(&["--version"]).await?;
    let family = if version_out.to_ascii_lowercase().contains("apple clang") {
        CompilerFamily::AppleClang
    } else if version_out.to_ascii_lowercase().contains("clang") {
        CompilerFamily::Clang
    } else {
        CompilerFamily::Gcc
    };

    let dumped = run_cc(&["-dumpversion"]).await?;
    let major: u32 = dumped.trim().split('.').next()?.parse().ok()?;

    let compiler = Compiler::new(family, major);
    debug!(compiler = %compiler, "detected host compiler");
    Some(compiler)
}

async fn run_cc(args: &[&str]) -> Option<String> {
    let output = Command::new("cc")
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
