//! # Frontier Bootstrap - Layer 5: Feature Implementation
//!
//! Takes a freshly connected player from "wallet connected" to "game session
//! initialized and registered".
//!
//! ## Purpose
//!
//! - Ensure the player's account holds a minimum balance, trying funding
//!   providers in a fixed order until one succeeds
//! - Submit the game-session initialization transaction, then register the
//!   player with the backend service
//! - Report per-step progress to an observer and a final result to the caller
//!
//! ## Architecture Constraints
//!
//! This crate depends on:
//! - **Layer 1** (frontier-core): identifiers, errors, effect traits, config
//! - **Layer 3** (frontier-effects): production handlers, used only by [`runtime`]
//!
//! Everything except [`runtime`] is generic over the effect traits, so tests
//! drive it with the doubles from frontier-testkit.
//!
//! ## What Does NOT Belong Here
//!
//! - JSON-RPC or HTTP details (belong in frontier-effects)
//! - Transaction signing (belongs to the player's wallet)
//! - Command-line parsing (belongs in frontier-cli)
//!
//! ## Key Types
//!
//! - [`FundingProvisioner`]: balance check plus ordered provider cascade
//! - [`GameInitializer`]: session transaction, then registration
//! - [`StepStatusTracker`]: named step states for one run
//! - [`BootstrapOrchestrator`]: sequences the above behind a single trigger

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Funding provisioner and its outcomes
pub mod funding;

/// Session initialization and player registration
pub mod initializer;

/// Step-change observers
pub mod observer;

/// Bootstrap state machine
pub mod orchestrator;

/// Funding provider strategies
pub mod provider;

/// Construction from `FrontierConfig` with production handlers
pub mod runtime;

/// Step names and status tracking
pub mod steps;

pub use funding::{FundingError, FundingOutcome, FundingProvisioner};
pub use initializer::{GameInitializer, InitError, InitReceipt};
pub use observer::{ProgressObserver, RecordingObserver, StepTransition, TracingObserver};
pub use orchestrator::{
    BootstrapError, BootstrapFailure, BootstrapOrchestrator, BootstrapOutcome, BootstrapPhase,
    BootstrapResult,
};
pub use provider::{
    default_cascade, BackendGrantStrategy, FaucetStrategy, ProviderError, ProviderStrategy,
    ALTERNATE_FAUCET, BACKEND_GRANT, PRIMARY_FAUCET,
};
pub use runtime::{build_orchestrator, build_provisioner, RpcOrchestrator};
pub use steps::{
    StepState, StepStatus, StepStatusTracker, TrackerError, BOOTSTRAP_STEPS, FUNDING_STEP,
    INIT_STEP,
};
