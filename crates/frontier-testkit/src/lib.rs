//! Frontier Testing Infrastructure
//!
//! In-memory doubles for every effect trait in `frontier-core`, scripted
//! funding strategies, and common fixtures. Doubles share their state behind
//! an `Arc`, so a test keeps a clone to inspect calls after handing the
//! original to the code under test.
//!
//! # Usage
//!
//! ```rust,no_run
//! use frontier_testkit::*;
//!
//! # async fn demo() {
//! let ledger = MockLedger::new().with_balance(&test_actor(0), frontier_core::Lamports::ZERO);
//! let provider = ScriptedStrategy::succeeding("faucet");
//! let provisioner = frontier_bootstrap::FundingProvisioner::new(
//!     ledger.clone(),
//!     vec![Box::new(provider.clone())],
//! )
//! .unwrap();
//! # }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod backend;
pub mod fixtures;
pub mod ledger;
pub mod logging;
pub mod program;
pub mod strategy;

pub use backend::{GrantBehavior, MockBackend};
pub use fixtures::*;
pub use ledger::MockLedger;
pub use logging::init_test_tracing;
pub use program::MockProgram;
pub use strategy::{CallLog, ScriptedStrategy, StrategyBehavior};
