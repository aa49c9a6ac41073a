//! # Frontier Effects - Layer 3: Production Handlers
//!
//! Stateless handlers implementing the effect traits from `frontier-core`
//! against real services:
//!
//! - [`RpcLedgerHandler`]: JSON-RPC 2.0 over HTTP to one ledger endpoint
//! - [`HttpBackendHandler`]: the off-ledger grant and registration service
//! - [`RpcGameProgramHandler`]: submits the signed session-initialization
//!   transaction through a ledger handler
//! - [`PresignedTransactionSource`]: serves a transaction signed ahead of time
//!   by the player's wallet
//!
//! Handlers hold no state besides their HTTP client and configuration, so
//! constructing one per endpoint is cheap.

#![forbid(unsafe_code)]

/// Off-ledger backend handler
pub mod backend;

/// Ledger JSON-RPC handler
pub mod ledger;

/// Game program handler and transaction sources
pub mod program;

pub use backend::HttpBackendHandler;
pub use ledger::RpcLedgerHandler;
pub use program::{PresignedTransactionSource, RpcGameProgramHandler};
