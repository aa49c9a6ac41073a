//! Layer 1: Core Effect Trait Definitions
//!
//! Pure trait definitions for every side effect the bootstrap flow performs.
//! This module defines **what** effects can be performed; handlers in
//! `frontier-effects` define **how**, and `frontier-testkit` provides
//! in-memory doubles.
//!
//! # Effect Classification
//!
//! - **Ledger** (`LedgerEffects`): balance reads, faucet airdrops, confirmation
//! - **Game program** (`GameProgramEffects`, `SessionTransactionSource`):
//!   session initialization and existence checks
//! - **Backend** (`BackendEffects`): funding grants and player registration
//!
//! All effect-using code is parameterized by these traits, so the bootstrap
//! flow is tested deterministically without network access.

pub mod backend;
pub mod ledger;
pub mod program;

pub use backend::{BackendEffects, BackendError};
pub use ledger::{LedgerEffects, LedgerError};
pub use program::{GameProgramEffects, ProgramError, SessionTransactionSource};
