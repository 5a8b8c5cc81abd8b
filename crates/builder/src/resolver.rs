//! Dependency resolution against the local package store
//!
//! The store is laid out as `<store>/<name>/<version>/` with the usual
//! `include/` and `lib/` subdirectories. Resolution only checks presence and
//! records paths; nothing is fetched or built here. Every declaration must
//! resolve before the build hook may run.

use kiln_events::{AppEvent, EventEmitter, EventSender, ResolverEvent};
use kiln_types::PackageSpec;
use std::path::{Path, PathBuf};
use tokio::fs;

use kiln_errors::{Error, ResolveError};

/// One resolved dependency: the declaration plus its store root
#[derive(Debug, Clone)]
pub struct ResolvedDependency {
    pub spec: PackageSpec,
    pub root: PathBuf,
}

impl ResolvedDependency {
    #[must_use]
    pub fn include_dir(&self) -> PathBuf {
        self.root.join("include")
    }

    #[must_use]
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }
}

/// The fully resolved dependency graph for one package build
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    dependencies: Vec<ResolvedDependency>,
}

impl Resolution {
    /// Build a resolution from already-resolved dependencies
    #[must_use]
    pub fn from_dependencies(dependencies: Vec<ResolvedDependency>) -> Self {
        Self { dependencies }
    }

    #[must_use]
    pub fn dependencies(&self) -> &[ResolvedDependency] {
        &self.dependencies
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Store roots of all dependencies, for `CMAKE_PREFIX_PATH`
    #[must_use]
    pub fn prefix_paths(&self) -> Vec<PathBuf> {
        self.dependencies.iter().map(|d| d.root.clone()).collect()
    }
}

/// Resolves exact-pinned declarations against a local store
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    store: PathBuf,
    event_sender: Option<EventSender>,
}

impl EventEmitter for DependencyResolver {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl DependencyResolver {
    #[must_use]
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
            event_sender: None,
        }
    }

    /// Set event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Store directory for one pinned package
    #[must_use]
    pub fn package_root(&self, spec: &PackageSpec) -> PathBuf {
        self.store.join(&spec.name).join(spec.version.to_string())
    }

    /// Resolve all declarations, failing on the first missing package
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::StoreUnavailable` when dependencies are
    /// declared but the store does not exist, and
    /// `ResolveError::PackageNotFound` for a pin with no store entry.
    pub async fn resolve(&self, specs: &[PackageSpec]) -> Result<Resolution, Error> {
        if specs.is_empty() {
            return Ok(Resolution::default());
        }

        if !dir_exists(&self.store).await {
            return Err(ResolveError::StoreUnavailable {
                path: self.store.display().to_string(),
            }
            .into());
        }

        self.emit(AppEvent::Resolver(ResolverEvent::Started {
            count: specs.len(),
        }));

        let mut dependencies = Vec::with_capacity(specs.len());
        for spec in specs {
            let root = self.package_root(spec);
            if !dir_exists(&root).await {
                return Err(ResolveError::PackageNotFound {
                    name: spec.name.clone(),
                    version: spec.version.to_string(),
                }
                .into());
            }

            self.emit(AppEvent::Resolver(ResolverEvent::Resolved {
                spec: spec.clone(),
                root: root.clone(),
            }));

            dependencies.push(ResolvedDependency {
                spec: spec.clone(),
                root,
            });
        }

        Ok(Resolution { dependencies })
    }
}

async fn dir_exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}
