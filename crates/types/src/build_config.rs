//! The build configuration tuple
//!
//! A `BuildConfiguration` is the immutable (os, compiler, `build_type`, arch)
//! tuple identifying one build variant. It is constructed once per build
//! invocation through a [`ConfigurationDraft`], which fails resolution while
//! any axis is still unset, and is read-only afterwards.

use crate::settings::{Arch, BuildType, Compiler, Os, SettingsAxis};
use kiln_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully resolved build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildConfiguration {
    pub os: Os,
    pub compiler: Compiler,
    pub build_type: BuildType,
    pub arch: Arch,
}

impl BuildConfiguration {
    /// Stable identity string for this build variant, usable as a cache key
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.os,
            self.compiler,
            self.build_type.to_string().to_ascii_lowercase(),
            self.arch
        )
    }

    /// Value of the given settings axis, in display spelling
    #[must_use]
    pub fn axis_value(&self, axis: SettingsAxis) -> String {
        match axis {
            SettingsAxis::Os => self.os.to_string(),
            SettingsAxis::Compiler => self.compiler.to_string(),
            SettingsAxis::BuildType => self.build_type.to_string(),
            SettingsAxis::Arch => self.arch.to_string(),
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "os={} compiler={} build_type={} arch={}",
            self.os, self.compiler, self.build_type, self.arch
        )
    }
}

/// Partially resolved configuration, filled from host detection and overrides
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationDraft {
    pub os: Option<Os>,
    pub compiler: Option<Compiler>,
    pub build_type: Option<BuildType>,
    pub arch: Option<Arch>,
}

impl ConfigurationDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-filled with the host operating system and architecture
    #[must_use]
    pub fn detect_host() -> Self {
        Self {
            os: Os::detect_host(),
            arch: Arch::detect_host(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_os(mut self, os: Os) -> Self {
        self.os = Some(os);
        self
    }

    #[must_use]
    pub fn with_compiler(mut self, compiler: Compiler) -> Self {
        self.compiler = Some(compiler);
        self
    }

    #[must_use]
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = Some(build_type);
        self
    }

    #[must_use]
    pub fn with_arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Resolve into an immutable configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnresolvedSetting` naming the first unset axis.
    /// Every axis must be resolved before the dependency graph or the build
    /// hook can be evaluated deterministically.
    pub fn resolve(self) -> Result<BuildConfiguration, ConfigError> {
        let unresolved = |axis: SettingsAxis| ConfigError::UnresolvedSetting {
            axis: axis.to_string(),
        };

        Ok(BuildConfiguration {
            os: self.os.ok_or_else(|| unresolved(SettingsAxis::Os))?,
            compiler: self
                .compiler
                .ok_or_else(|| unresolved(SettingsAxis::Compiler))?,
            build_type: self
                .build_type
                .ok_or_else(|| unresolved(SettingsAxis::BuildType))?,
            arch: self.arch.ok_or_else(|| unresolved(SettingsAxis::Arch))?,
        })
    }
}
