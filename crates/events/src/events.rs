//! Domain-driven event types

use kiln_types::{PackageSpec, Version};
use std::path::PathBuf;

/// Top-level application event, grouped by domain
#[derive(Debug, Clone)]
pub enum AppEvent {
    Build(BuildEvent),
    Resolver(ResolverEvent),
    General(GeneralEvent),
}

/// Build domain events
#[derive(Debug, Clone)]
pub enum BuildEvent {
    Started {
        package: String,
        version: Version,
        cache_key: String,
    },
    LayoutEstablished {
        build_dir: PathBuf,
    },
    GeneratorEmitted {
        generator: String,
        path: PathBuf,
    },
    StepStarted {
        step: String,
        package: String,
    },
    Completed {
        package: String,
        version: Version,
    },
    Failed {
        package: String,
        message: String,
    },
}

/// Dependency resolution events
#[derive(Debug, Clone)]
pub enum ResolverEvent {
    Started {
        count: usize,
    },
    Resolved {
        spec: PackageSpec,
        root: PathBuf,
    },
}

/// General events not tied to a domain
#[derive(Debug, Clone)]
pub enum GeneralEvent {
    OperationStarted { operation: String },
    OperationCompleted { operation: String, success: bool },
    Warning { message: String },
    DebugLog { message: String },
}
