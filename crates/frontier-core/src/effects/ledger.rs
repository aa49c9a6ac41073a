//! Ledger effects trait definitions
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `frontier-effects` (`RpcLedgerHandler`)
//! - **Usage**: balance checks and faucet strategies in `frontier-bootstrap`
//!
//! One handler talks to exactly one endpoint. The faucet cascade gets its
//! alternate endpoint by constructing a second handler, not by switching
//! endpoints inside one.

use crate::identifiers::{ActorAddress, Lamports, TransactionSignature};
use async_trait::async_trait;
use std::sync::Arc;

/// Ledger operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The endpoint answered with a JSON-RPC error object
    #[error("RPC error {code} from {endpoint}: {message}")]
    Rpc {
        /// Endpoint that produced the error
        endpoint: String,
        /// JSON-RPC error code
        code: i64,
        /// Error message reported by the node
        message: String,
    },
    /// The request never produced a usable HTTP response
    #[error("Transport error talking to {endpoint}: {reason}")]
    Transport {
        /// Endpoint that could not be reached
        endpoint: String,
        /// Reason for the failure
        reason: String,
    },
    /// The response could not be decoded
    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse {
        /// Endpoint that produced the response
        endpoint: String,
        /// What was wrong with it
        reason: String,
    },
    /// The transaction landed but failed on-ledger
    #[error("Transaction {signature} failed: {reason}")]
    TransactionFailed {
        /// Signature of the failed transaction
        signature: TransactionSignature,
        /// Ledger-reported error
        reason: String,
    },
    /// The transaction did not reach the requested commitment in time
    #[error("Transaction {signature} not confirmed after {polls} polls")]
    NotConfirmed {
        /// Signature that was polled
        signature: TransactionSignature,
        /// Number of status polls made
        polls: u32,
    },
}

/// Balance, faucet, and confirmation operations against one ledger endpoint.
#[async_trait]
pub trait LedgerEffects: Send + Sync {
    /// Endpoint URL this handler talks to (for logs and diagnostics).
    fn endpoint(&self) -> &str;

    /// Current balance of `actor`.
    async fn get_balance(&self, actor: &ActorAddress) -> Result<Lamports, LedgerError>;

    /// Ask the endpoint's faucet to airdrop `amount` to `actor`.
    async fn request_airdrop(
        &self,
        actor: &ActorAddress,
        amount: Lamports,
    ) -> Result<TransactionSignature, LedgerError>;

    /// Wait until `signature` reaches the handler's commitment level.
    async fn confirm_transaction(&self, signature: &TransactionSignature)
        -> Result<(), LedgerError>;
}

/// Blanket implementation for Arc<T> where T: LedgerEffects
#[async_trait]
impl<T: LedgerEffects + ?Sized> LedgerEffects for Arc<T> {
    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }

    async fn get_balance(&self, actor: &ActorAddress) -> Result<Lamports, LedgerError> {
        (**self).get_balance(actor).await
    }

    async fn request_airdrop(
        &self,
        actor: &ActorAddress,
        amount: Lamports,
    ) -> Result<TransactionSignature, LedgerError> {
        (**self).request_airdrop(actor, amount).await
    }

    async fn confirm_transaction(
        &self,
        signature: &TransactionSignature,
    ) -> Result<(), LedgerError> {
        (**self).confirm_transaction(signature).await
    }
}
