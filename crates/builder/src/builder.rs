//! Build orchestration
//!
//! [`Builder`] walks one recipe through its lifecycle: `configure()` runs the
//! layout and requirements hooks, resolves dependencies, and emits generator
//! files; `build()` runs the build hook. The phase machine is strictly
//! linear, and the build hook can never run before dependency resolution has
//! completed.

use crate::context::BuildContext;
use crate::environment::BuildEnvironment;
use crate::generators::emit_generators;
use crate::layout::Layout;
use crate::recipe::Recipe;
use crate::resolver::{DependencyResolver, Resolution};
use kiln_config::Config;
use kiln_events::{AppEvent, BuildEvent, EventEmitter, EventSender};
use kiln_types::{BuildConfiguration, RecipePhase};
use std::path::PathBuf;

use kiln_errors::{BuildError, Error};

/// Drives one recipe through one build invocation
pub struct Builder {
    recipe: Box<dyn Recipe>,
    source_dir: PathBuf,
    configuration: BuildConfiguration,
    config: Config,
    phase: RecipePhase,
    layout: Option<Layout>,
    resolution: Option<Resolution>,
    event_sender: Option<EventSender>,
}

impl EventEmitter for Builder {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Builder {
    /// Create a builder in the `Declared` phase
    #[must_use]
    pub fn new(
        recipe: Box<dyn Recipe>,
        source_dir: impl Into<PathBuf>,
        configuration: BuildConfiguration,
        config: Config,
    ) -> Self {
        Self {
            recipe,
            source_dir: source_dir.into(),
            configuration,
            config,
            phase: RecipePhase::Declared,
            layout: None,
            resolution: None,
            event_sender: None,
        }
    }

    /// Set event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn phase(&self) -> RecipePhase {
        self.phase
    }

    /// The recipe being driven
    #[must_use]
    pub fn recipe(&self) -> &dyn Recipe {
        self.recipe.as_ref()
    }

    /// Run the layout and requirements hooks, resolve dependencies, and emit
    /// generator files (`Declared` -> `Configured`)
    ///
    /// # Errors
    ///
    /// Fails on an out-of-order call, an unresolvable dependency pin, or a
    /// generator that cannot be written. The phase is unchanged on failure;
    /// the invoking tool decides whether to start over.
    pub async fn configure(&mut self) -> Result<(), Error> {
        if !self.phase.can_transition_to(RecipePhase::Configured) {
            return Err(BuildError::InvalidPhaseTransition {
                from: self.phase.to_string(),
                to: RecipePhase::Configured.to_string(),
            }
            .into());
        }

        let layout = self.recipe.establish_layout(&self.source_dir);
        self.emit(AppEvent::Build(BuildEvent::LayoutEstablished {
            build_dir: layout.build_dir.clone(),
        }));

        let requirements = self.recipe.declare_requirements();
        let mut resolver = DependencyResolver::new(self.config.store_path());
        if let Some(sender) = &self.event_sender {
            resolver = resolver.with_event_sender(sender.clone());
        }
        let resolution = resolver.resolve(&requirements).await?;

        emit_generators(
            self.recipe.generators(),
            &self.configuration,
            &resolution,
            &layout,
            &self.event_sender,
        )
        .await?;

        self.layout = Some(layout);
        self.resolution = Some(resolution);
        self.phase = RecipePhase::Configured;
        Ok(())
    }

    /// Run the build hook (`Configured` -> `Built`, or terminal `Failed`)
    ///
    /// # Errors
    ///
    /// Returns `BuildError::NotConfigured` when dependency resolution has not
    /// completed. A failing build hook moves the recipe to `Failed` and the
    /// underlying diagnostics propagate unchanged.
    pub async fn build(&mut self) -> Result<(), Error> {
        if self.phase != RecipePhase::Configured {
            return Err(BuildError::NotConfigured {
                phase: self.phase.to_string(),
            }
            .into());
        }

        // Both are set when the phase is Configured
        let layout = self
            .layout
            .clone()
            .ok_or_else(|| Error::internal("configured builder has no layout"))?;
        let resolution = self
            .resolution
            .clone()
            .ok_or_else(|| Error::internal("configured builder has no resolution"))?;

        let package = self.recipe.name().to_string();
        let version = self.recipe.version().clone();

        self.emit(AppEvent::Build(BuildEvent::Started {
            package: package.clone(),
            version: version.clone(),
            cache_key: self.configuration.cache_key(),
        }));

        let mut env = BuildEnvironment::new(&package, layout.build_dir.clone());
        if let Some(sender) = &self.event_sender {
            env = env.with_event_sender(sender.clone());
        }

        let ctx = BuildContext {
            package: package.clone(),
            version: version.clone(),
            configuration: self.configuration,
            layout,
            resolution,
            env,
            jobs: self.config.build_jobs(),
            event_sender: self.event_sender.clone(),
        };

        match self.recipe.run_build(&ctx).await {
            Ok(()) => {
                self.phase = RecipePhase::Built;
                self.emit(AppEvent::Build(BuildEvent::Completed { package, version }));
                Ok(())
            }
            Err(e) => {
                self.phase = RecipePhase::Failed;
                self.emit(AppEvent::Build(BuildEvent::Failed {
                    package,
                    message: e.to_string(),
                }));
                Err(e)
            }
        }
    }
}
