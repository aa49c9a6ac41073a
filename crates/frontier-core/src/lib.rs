//! # Frontier Core - Layer 1: Foundation
//!
//! Identifiers, the unified error type, effect trait definitions, and
//! configuration shared by every Frontier crate.
//!
//! ## What Belongs Here
//!
//! - Ledger identifiers and amounts (`ActorAddress`, `Lamports`, `TransactionSignature`)
//! - Pure effect interfaces for the ledger, the game program, and the backend service
//! - Workspace configuration (`FrontierConfig`) and its validation
//!
//! ## What Does NOT Belong Here
//!
//! - Effect handler implementations (belong in frontier-effects)
//! - Bootstrap orchestration (belongs in frontier-bootstrap)
//! - Test doubles (belong in frontier-testkit)

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Unified error handling
pub mod errors;

/// Actor addresses, ledger amounts, and transaction signatures
pub mod identifiers;

/// Pure effect interfaces (no implementations)
pub mod effects;

/// Workspace configuration
pub mod config;

pub use config::{
    BackendConfig, ConfigValidation, ConfirmationConfig, FrontierConfig, FundingConfig,
    LedgerConfig, SessionConfig,
};
pub use errors::{FrontierError, Result as FrontierResult};
pub use identifiers::{ActorAddress, Commitment, Lamports, TransactionSignature, LAMPORTS_PER_SOL};
