//! Bootstrap orchestrator: the single entry point of the bootstrap flow.
//!
//! ```text
//! Start -> FundingInProgress -> FundingFailed                      (terminal)
//!                            -> FundingComplete -> InitInProgress -> InitFailed (terminal)
//!                                                                 -> Complete   (terminal)
//! ```
//!
//! A run holds the orchestrator's only permit for its whole duration, so a
//! second trigger while a run is in flight is rejected instead of issuing
//! duplicate funding requests or initialization transactions. The permit is
//! released when a run fails, which re-enables the trigger. After a
//! successful run the permit is retired and the trigger stays closed.

use crate::funding::{FundingError, FundingOutcome, FundingProvisioner};
use crate::initializer::{GameInitializer, InitError, InitReceipt};
use crate::observer::{ProgressObserver, TracingObserver};
use crate::provider::ProviderError;
use crate::steps::{StepState, StepStatus, StepStatusTracker, TrackerError, FUNDING_STEP, INIT_STEP};
use frontier_core::effects::{BackendEffects, GameProgramEffects, LedgerEffects};
use frontier_core::{ActorAddress, Lamports};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Phase of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapPhase {
    Start,
    FundingInProgress,
    FundingFailed,
    FundingComplete,
    InitInProgress,
    InitFailed,
    Complete,
}

impl BootstrapPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::FundingFailed | Self::InitFailed | Self::Complete)
    }

    const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::FundingInProgress)
                | (Self::FundingInProgress, Self::FundingFailed | Self::FundingComplete)
                | (Self::FundingComplete, Self::InitInProgress)
                | (Self::InitInProgress, Self::InitFailed | Self::Complete)
        )
    }
}

impl fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Success,
    Failure,
}

/// Terminal failure of a run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapFailure {
    #[error("all {attempts} funding providers failed; please fund your wallet using a web faucet")]
    FundingExhausted { attempts: usize },
    #[error(transparent)]
    Funding(FundingError),
    #[error(transparent)]
    Init(InitError),
}

impl BootstrapFailure {
    /// Step that failed.
    pub fn step(&self) -> &'static str {
        match self {
            Self::FundingExhausted { .. } | Self::Funding(_) => FUNDING_STEP,
            Self::Init(_) => INIT_STEP,
        }
    }

    /// Message for display to the player.
    pub fn user_message(&self) -> String {
        format!("{} failed: {self}", self.step())
    }
}

/// Errors that prevent a run from producing a result
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    #[error("a bootstrap run is already in progress")]
    AlreadyRunning,
    #[error("bootstrap already completed")]
    AlreadyBootstrapped,
    #[error("step tracking failed: {0}")]
    Tracker(#[from] TrackerError),
    #[error("invalid phase transition from {from} to {to}")]
    InvalidPhase {
        from: BootstrapPhase,
        to: BootstrapPhase,
    },
}

/// Result of one run, produced once at the end and not mutated afterward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapResult {
    pub outcome: BootstrapOutcome,
    /// Provider failures, in attempt order (empty unless funding was exhausted)
    pub causes: Vec<ProviderError>,
    pub terminal_error: Option<BootstrapFailure>,
    pub phase: BootstrapPhase,
    pub steps: Vec<StepStatus>,
    pub funding: Option<FundingOutcome>,
    pub receipt: Option<InitReceipt>,
    /// Whether the caller should offer the trigger again
    pub trigger_enabled: bool,
}

impl BootstrapResult {
    pub fn is_success(&self) -> bool {
        self.outcome == BootstrapOutcome::Success
    }

    pub fn user_message(&self) -> Option<String> {
        self.terminal_error.as_ref().map(BootstrapFailure::user_message)
    }
}

struct Run<'a> {
    actor: &'a ActorAddress,
    observer: &'a dyn ProgressObserver,
    tracker: StepStatusTracker,
    phase: BootstrapPhase,
    funding: Option<FundingOutcome>,
}

impl<'a> Run<'a> {
    fn new(actor: &'a ActorAddress, observer: &'a dyn ProgressObserver) -> Self {
        Self {
            actor,
            observer,
            tracker: StepStatusTracker::for_bootstrap(),
            phase: BootstrapPhase::Start,
            funding: None,
        }
    }

    fn advance(&mut self, next: BootstrapPhase) -> Result<(), BootstrapError> {
        if !self.phase.can_advance_to(next) {
            return Err(BootstrapError::InvalidPhase {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!(actor = %self.actor, from = %self.phase, to = %next, "bootstrap phase");
        self.phase = next;
        Ok(())
    }

    fn set_step(&mut self, step: &str, state: StepState) -> Result<(), BootstrapError> {
        if self.tracker.set_status(step, state)? {
            self.observer.on_step(step, state);
        }
        Ok(())
    }

    fn fail(
        mut self,
        step: &str,
        phase: BootstrapPhase,
        failure: BootstrapFailure,
        causes: Vec<ProviderError>,
    ) -> Result<BootstrapResult, BootstrapError> {
        self.set_step(step, StepState::Failed)?;
        self.advance(phase)?;
        tracing::warn!(actor = %self.actor, error = %failure, "bootstrap failed");
        Ok(BootstrapResult {
            outcome: BootstrapOutcome::Failure,
            causes,
            terminal_error: Some(failure),
            phase: self.phase,
            steps: self.tracker.get_all(),
            funding: self.funding,
            receipt: None,
            trigger_enabled: true,
        })
    }

    fn complete(mut self, receipt: InitReceipt) -> Result<BootstrapResult, BootstrapError> {
        self.set_step(INIT_STEP, StepState::Completed)?;
        self.advance(BootstrapPhase::Complete)?;
        tracing::info!(actor = %self.actor, resumed = receipt.resumed, "bootstrap complete");
        Ok(BootstrapResult {
            outcome: BootstrapOutcome::Success,
            causes: Vec::new(),
            terminal_error: None,
            phase: self.phase,
            steps: self.tracker.get_all(),
            funding: self.funding,
            receipt: Some(receipt),
            trigger_enabled: false,
        })
    }
}

/// Sequences funding and game initialization for one actor at a time.
pub struct BootstrapOrchestrator<L, P, B> {
    provisioner: FundingProvisioner<L>,
    initializer: GameInitializer<P, B>,
    min_balance: Lamports,
    observer: Arc<dyn ProgressObserver>,
    trigger: Semaphore,
    completed: AtomicBool,
}

impl<L, P, B> BootstrapOrchestrator<L, P, B>
where
    L: LedgerEffects,
    P: GameProgramEffects,
    B: BackendEffects,
{
    pub fn new(
        provisioner: FundingProvisioner<L>,
        initializer: GameInitializer<P, B>,
        min_balance: Lamports,
    ) -> Self {
        Self {
            provisioner,
            initializer,
            min_balance,
            observer: Arc::new(TracingObserver),
            trigger: Semaphore::new(1),
            completed: AtomicBool::new(false),
        }
    }

    /// Notify `observer` on every step-state change.
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// False while a run is in flight and after a successful run.
    pub fn is_trigger_enabled(&self) -> bool {
        self.trigger.available_permits() > 0
    }

    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// Fund `actor` if needed, then initialize its game session and
    /// register it.
    ///
    /// Terminal failures are reported inside the returned result. `Err` is
    /// reserved for a rejected trigger and for internal misuse.
    pub async fn run(&self, actor: &ActorAddress) -> Result<BootstrapResult, BootstrapError> {
        let permit = self.trigger.try_acquire().map_err(|_| {
            if self.is_completed() {
                BootstrapError::AlreadyBootstrapped
            } else {
                BootstrapError::AlreadyRunning
            }
        })?;

        let result = self.run_steps(actor).await;
        if matches!(&result, Ok(done) if done.is_success()) {
            self.completed.store(true, Ordering::Release);
            permit.forget();
        }
        result
    }

    async fn run_steps(&self, actor: &ActorAddress) -> Result<BootstrapResult, BootstrapError> {
        tracing::info!(%actor, min_balance = %self.min_balance, "bootstrap started");
        let mut run = Run::new(actor, self.observer.as_ref());

        run.advance(BootstrapPhase::FundingInProgress)?;
        match self.provisioner.ensure_funded(actor, self.min_balance).await {
            Ok(FundingOutcome::Exhausted { causes }) => {
                run.funding = Some(FundingOutcome::Exhausted {
                    causes: causes.clone(),
                });
                let failure = BootstrapFailure::FundingExhausted {
                    attempts: causes.len(),
                };
                return run.fail(FUNDING_STEP, BootstrapPhase::FundingFailed, failure, causes);
            }
            Err(error) => {
                return run.fail(
                    FUNDING_STEP,
                    BootstrapPhase::FundingFailed,
                    BootstrapFailure::Funding(error),
                    Vec::new(),
                );
            }
            Ok(outcome) => run.funding = Some(outcome),
        }
        run.set_step(FUNDING_STEP, StepState::Completed)?;
        run.advance(BootstrapPhase::FundingComplete)?;

        run.advance(BootstrapPhase::InitInProgress)?;
        match self.initializer.initialize_and_register(actor).await {
            Ok(receipt) => run.complete(receipt),
            Err(error) => run.fail(
                INIT_STEP,
                BootstrapPhase::InitFailed,
                BootstrapFailure::Init(error),
                Vec::new(),
            ),
        }
    }
}

impl<L, P, B> fmt::Debug for BootstrapOrchestrator<L, P, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapOrchestrator")
            .field("provisioner", &self.provisioner)
            .field("min_balance", &self.min_balance)
            .field("trigger_enabled", &(self.trigger.available_permits() > 0))
            .field("completed", &self.completed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
