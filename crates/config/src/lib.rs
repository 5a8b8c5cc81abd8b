#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for kiln
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/kiln/config.toml)
//! - Environment variables (`KILN_*`)
//! - CLI flags (applied by the caller, highest precedence)

use kiln_errors::{ConfigError, Error};
use kiln_types::{BuildType, Compiler};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub debug: bool,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Number of parallel build jobs; 0 = auto-detect
    #[serde(default = "default_build_jobs")]
    pub build_jobs: usize,

    /// Default build type when not given on the command line
    #[serde(default = "default_build_type")]
    pub build_type: BuildType,

    /// Default compiler identity, e.g. "gcc-13"
    #[serde(default)]
    pub compiler: Option<Compiler>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_jobs: default_build_jobs(),
            build_type: default_build_type(),
            compiler: None,
        }
    }
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    pub store_path: Option<PathBuf>,
}

fn default_build_jobs() -> usize {
    0
}

fn default_build_type() -> BuildType {
    BuildType::Release
}

/// Default location of the config file, when a config dir exists
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kiln").join("config.toml"))
}

/// Default package store location
#[must_use]
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map_or_else(|| PathBuf::from(".kiln"), |dir| dir.join("kiln"))
        .join("store")
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(&e, path))?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// An explicitly given path must exist; the default path is optional and
    /// silently falls back to built-in defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is unreadable, or if any config
    /// file fails to parse.
    pub async fn load_or_default(explicit: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path).await,
            _ => Ok(Self::default()),
        }
    }

    /// Merge environment variables into this configuration
    ///
    /// Recognized variables: `KILN_STORE_PATH`, `KILN_BUILD_JOBS`,
    /// `KILN_BUILD_TYPE`, `KILN_COMPILER`.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set to an unparsable value.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(path) = std::env::var("KILN_STORE_PATH") {
            self.paths.store_path = Some(PathBuf::from(path));
        }

        if let Ok(jobs) = std::env::var("KILN_BUILD_JOBS") {
            self.build.build_jobs = jobs.parse().map_err(|_| ConfigError::InvalidValue {
                field: "KILN_BUILD_JOBS".to_string(),
                value: jobs.clone(),
            })?;
        }

        if let Ok(build_type) = std::env::var("KILN_BUILD_TYPE") {
            self.build.build_type = build_type.parse()?;
        }

        if let Ok(compiler) = std::env::var("KILN_COMPILER") {
            self.build.compiler = Some(compiler.parse()?);
        }

        Ok(())
    }

    /// Effective package store path
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.paths
            .store_path
            .clone()
            .unwrap_or_else(default_store_path)
    }

    /// Effective parallel build job count
    #[must_use]
    pub fn build_jobs(&self) -> usize {
        if self.build.build_jobs == 0 {
            num_cpus::get()
        } else {
            self.build.build_jobs
        }
    }
}
