//! Event rendering for the terminal
//!
//! Library crates never print; everything user-visible flows through events
//! and is rendered here. Events are also mirrored into tracing with
//! structured fields so `--debug` runs produce a useful log.

use kiln_events::{AppEvent, BuildEvent, GeneralEvent, ResolverEvent};
use tracing::{debug, error, info, warn};

/// Renders events as terminal output
pub struct EventHandler {
    debug_enabled: bool,
}

impl EventHandler {
    #[must_use]
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Build(build_event) => self.handle_build_event(build_event),
            AppEvent::Resolver(resolver_event) => Self::handle_resolver_event(&resolver_event),
            AppEvent::General(general_event) => self.handle_general_event(&general_event),
        }
    }

    fn handle_build_event(&mut self, event: BuildEvent) {
        match event {
            BuildEvent::Started {
                package,
                version,
                cache_key,
            } => {
                info!(package = %package, version = %version, cache_key = %cache_key, "Build started");
                println!("Building {package}@{version} [{cache_key}]");
            }
            BuildEvent::LayoutEstablished { build_dir } => {
                debug!(build_dir = %build_dir.display(), "Layout established");
                println!("  build folder: {}", build_dir.display());
            }
            BuildEvent::GeneratorEmitted { generator, path } => {
                debug!(generator = %generator, path = %path.display(), "Generator emitted");
                println!("  generated {generator}: {}", path.display());
            }
            BuildEvent::StepStarted { step, package } => {
                debug!(package = %package, step = %step, "Build step started");
                println!("  [{package}] {step}");
            }
            BuildEvent::Completed { package, version } => {
                info!(package = %package, version = %version, "Build completed");
                println!("Built {package}@{version}");
            }
            BuildEvent::Failed { package, message } => {
                error!(package = %package, message = %message, "Build failed");
                eprintln!("Build of {package} failed: {message}");
            }
        }
    }

    fn handle_resolver_event(event: &ResolverEvent) {
        match event {
            ResolverEvent::Started { count } => {
                info!(count = count, "Dependency resolution started");
                println!("Resolving {count} dependencies");
            }
            ResolverEvent::Resolved { spec, root } => {
                debug!(spec = %spec, root = %root.display(), "Dependency resolved");
                println!("  {spec} -> {}", root.display());
            }
        }
    }

    fn handle_general_event(&self, event: &GeneralEvent) {
        match event {
            GeneralEvent::OperationStarted { operation } => {
                info!(operation = %operation, "Operation started");
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                info!(operation = %operation, success = success, "Operation completed");
            }
            GeneralEvent::Warning { message } => {
                warn!(message = %message, "Warning");
                eprintln!("warning: {message}");
            }
            GeneralEvent::DebugLog { message } => {
                debug!(message = %message, "Debug log");
                if self.debug_enabled {
                    eprintln!("debug: {message}");
                }
            }
        }
    }
}
