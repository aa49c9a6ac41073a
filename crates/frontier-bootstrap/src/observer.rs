//! Progress observers notified on every step-state change.

use crate::steps::StepState;
use std::sync::{Mutex, PoisonError};

/// Receives `(step, state)` each time a step changes state.
pub trait ProgressObserver: Send + Sync {
    fn on_step(&self, step: &str, state: StepState);
}

impl<F> ProgressObserver for F
where
    F: Fn(&str, StepState) + Send + Sync,
{
    fn on_step(&self, step: &str, state: StepState) {
        self(step, state);
    }
}

/// Logs each transition through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn on_step(&self, step: &str, state: StepState) {
        match state {
            StepState::Failed => tracing::warn!(step, %state, "bootstrap step changed"),
            _ => tracing::info!(step, %state, "bootstrap step changed"),
        }
    }
}

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTransition {
    pub step: String,
    pub state: StepState,
}

/// Keeps an ordered log of every notification.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    log: Mutex<Vec<StepTransition>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions seen so far, oldest first.
    pub fn transitions(&self) -> Vec<StepTransition> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProgressObserver for RecordingObserver {
    fn on_step(&self, step: &str, state: StepState) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StepTransition {
                step: step.to_string(),
                state,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn closures_are_observers() {
        let calls = AtomicUsize::new(0);
        let observer = |_: &str, _: StepState| {
            calls.fetch_add(1, Ordering::SeqCst);
        };
        observer.on_step("x", StepState::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn recording_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_step("a", StepState::Completed);
        observer.on_step("b", StepState::Failed);
        assert_eq!(
            observer.transitions(),
            vec![
                StepTransition {
                    step: "a".into(),
                    state: StepState::Completed
                },
                StepTransition {
                    step: "b".into(),
                    state: StepState::Failed
                },
            ]
        );
    }
}
