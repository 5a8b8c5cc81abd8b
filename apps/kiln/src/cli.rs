//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kiln - recipe-driven CMake package builds
#[derive(Parser)]
#[command(name = "kiln")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recipe-driven CMake package builds")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build a package from its recipe
    #[command(alias = "b")]
    Build {
        /// Path to the recipe file (.yaml)
        recipe: PathBuf,

        /// Build type (Debug, Release, RelWithDebInfo, MinSizeRel)
        #[arg(long, value_name = "TYPE")]
        build_type: Option<String>,

        /// Compiler identity, e.g. gcc-13 (default: probe the host)
        #[arg(long, value_name = "ID")]
        compiler: Option<String>,

        /// Number of parallel build jobs (0=auto)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Package store to resolve dependencies from
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },

    /// Show recipe metadata and declared dependencies
    Info {
        /// Path to the recipe file (.yaml)
        recipe: PathBuf,
    },

    /// Pack exported sources into a source archive
    Export {
        /// Path to the recipe file (.yaml)
        recipe: PathBuf,

        /// Output directory for the archive (default: recipe directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}
