//! Recipe lifecycle phase
//!
//! One build invocation walks a recipe through a strictly linear lifecycle:
//! `Declared` (loaded, no hooks run) -> `Configured` (layout and requirements
//! evaluated, dependencies resolved) -> `Built`. A failed build transition
//! lands in terminal `Failed`; the invoking tool decides whether to start
//! over from `Declared` with a fresh orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a recipe within one build invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipePhase {
    Declared,
    Configured,
    Built,
    Failed,
}

impl RecipePhase {
    /// Whether the lifecycle permits moving from this phase to `next`
    ///
    /// No retries, no backward transitions. `Failed` is only reachable from
    /// `Configured` (a build attempt that did not complete).
    #[must_use]
    pub fn can_transition_to(self, next: RecipePhase) -> bool {
        matches!(
            (self, next),
            (Self::Declared, Self::Configured)
                | (Self::Configured, Self::Built)
                | (Self::Configured, Self::Failed)
        )
    }

    /// Terminal phases accept no further transitions
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Built | Self::Failed)
    }
}

impl fmt::Display for RecipePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => write!(f, "Declared"),
            Self::Configured => write!(f, "Configured"),
            Self::Built => write!(f, "Built"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_transitions() {
        assert!(RecipePhase::Declared.can_transition_to(RecipePhase::Configured));
        assert!(RecipePhase::Configured.can_transition_to(RecipePhase::Built));
        assert!(RecipePhase::Configured.can_transition_to(RecipePhase::Failed));
    }

    #[test]
    fn test_no_skipping_or_backtracking() {
        assert!(!RecipePhase::Declared.can_transition_to(RecipePhase::Built));
        assert!(!RecipePhase::Built.can_transition_to(RecipePhase::Configured));
        assert!(!RecipePhase::Configured.can_transition_to(RecipePhase::Declared));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(RecipePhase::Built.is_terminal());
        assert!(RecipePhase::Failed.is_terminal());
        assert!(!RecipePhase::Failed.can_transition_to(RecipePhase::Configured));
        assert!(!RecipePhase::Built.can_transition_to(RecipePhase::Failed));
    }
}
