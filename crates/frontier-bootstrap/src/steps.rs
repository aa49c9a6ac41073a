//! Named bootstrap steps and their observable state.
//!
//! The set of step names is fixed when a tracker is built. State only moves
//! forward: `Pending` to `Completed` or `Pending` to `Failed`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Step covering the balance check and the funding cascade.
pub const FUNDING_STEP: &str = "Requesting funding";

/// Step covering session initialization and player registration.
pub const INIT_STEP: &str = "Initializing game";

/// Steps of one bootstrap run, in execution order.
pub const BOOTSTRAP_STEPS: [&str; 2] = [FUNDING_STEP, INIT_STEP];

/// Observable state of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Pending,
    Completed,
    Failed,
}

impl StepState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Completed and Failed are final for the run.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub name: String,
    pub state: StepState,
}

/// Tracker misuse. These are programming errors, not run failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("Unknown step: {name}")]
    UnknownStep { name: String },
    #[error("Step '{name}' cannot move from {from} to {to}")]
    InvalidTransition {
        name: String,
        from: StepState,
        to: StepState,
    },
}

/// Records step states for one run. Single writer.
#[derive(Debug, Clone)]
pub struct StepStatusTracker {
    steps: Vec<StepStatus>,
}

impl StepStatusTracker {
    /// Tracker over `names`, all Pending. Duplicate names are kept once.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut steps: Vec<StepStatus> = Vec::new();
        for name in names {
            let name = name.into();
            if !steps.iter().any(|step| step.name == name) {
                steps.push(StepStatus {
                    name,
                    state: StepState::Pending,
                });
            }
        }
        Self { steps }
    }

    /// Tracker over [`BOOTSTRAP_STEPS`].
    pub fn for_bootstrap() -> Self {
        Self::new(BOOTSTRAP_STEPS)
    }

    /// Move `name` to `state`.
    ///
    /// Returns `Ok(true)` when the state changed and `Ok(false)` when the
    /// step was already in `state`.
    pub fn set_status(&mut self, name: &str, state: StepState) -> Result<bool, TrackerError> {
        let step = self
            .steps
            .iter_mut()
            .find(|step| step.name == name)
            .ok_or_else(|| TrackerError::UnknownStep {
                name: name.to_string(),
            })?;

        if step.state == state {
            return Ok(false);
        }
        if step.state.is_terminal() || state == StepState::Pending {
            return Err(TrackerError::InvalidTransition {
                name: name.to_string(),
                from: step.state,
                to: state,
            });
        }

        step.state = state;
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<StepState> {
        self.steps
            .iter()
            .find(|step| step.name == name)
            .map(|step| step.state)
    }

    /// All steps in declaration order.
    pub fn get_all(&self) -> Vec<StepStatus> {
        self.steps.clone()
    }

    pub fn any_failed(&self) -> bool {
        self.steps.iter().any(|step| step.state == StepState::Failed)
    }

    pub fn all_completed(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.state == StepState::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn starts_pending_in_declared_order() {
        let tracker = StepStatusTracker::for_bootstrap();
        let names: Vec<_> = tracker.get_all().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec![FUNDING_STEP, INIT_STEP]);
        assert!(tracker
            .get_all()
            .iter()
            .all(|s| s.state == StepState::Pending));
    }

    #[test]
    fn unknown_step_is_rejected() {
        let mut tracker = StepStatusTracker::for_bootstrap();
        assert_matches!(
            tracker.set_status("Requesting airdrop", StepState::Completed),
            Err(TrackerError::UnknownStep { .. })
        );
    }

    #[test]
    fn transitions_are_monotonic() {
        let mut tracker = StepStatusTracker::for_bootstrap();
        assert_eq!(tracker.set_status(FUNDING_STEP, StepState::Completed), Ok(true));
        assert_eq!(tracker.set_status(FUNDING_STEP, StepState::Completed), Ok(false));
        assert_matches!(
            tracker.set_status(FUNDING_STEP, StepState::Failed),
            Err(TrackerError::InvalidTransition {
                from: StepState::Completed,
                to: StepState::Failed,
                ..
            })
        );
        assert_matches!(
            tracker.set_status(INIT_STEP, StepState::Pending),
            Ok(false)
        );
        tracker.set_status(INIT_STEP, StepState::Failed).unwrap();
        assert_matches!(
            tracker.set_status(INIT_STEP, StepState::Pending),
            Err(TrackerError::InvalidTransition { .. })
        );
        assert!(tracker.any_failed());
        assert!(!tracker.all_completed());
    }

    #[test]
    fn duplicate_names_collapse() {
        let tracker = StepStatusTracker::new(["a", "b", "a"]);
        assert_eq!(tracker.get_all().len(), 2);
    }
}
