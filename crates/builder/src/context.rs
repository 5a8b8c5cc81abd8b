//! Build context handed to the build hook

use crate::environment::BuildEnvironment;
use crate::layout::Layout;
use crate::resolver::Resolution;
use kiln_events::{EventEmitter, EventSender};
use kiln_types::{BuildConfiguration, Version};

/// Everything the build hook needs: the resolved configuration, the folder
/// layout, the resolved dependency graph, and the environment commands run in
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Package name
    pub package: String,
    /// Package version
    pub version: Version,
    /// Fully resolved build configuration
    pub configuration: BuildConfiguration,
    /// Folder layout established for this build
    pub layout: Layout,
    /// Resolved dependency graph
    pub resolution: Resolution,
    /// Build environment for command execution
    pub env: BuildEnvironment,
    /// Number of parallel jobs
    pub jobs: usize,
    /// Event sender for progress reporting
    pub event_sender: Option<EventSender>,
}

impl EventEmitter for BuildContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}
