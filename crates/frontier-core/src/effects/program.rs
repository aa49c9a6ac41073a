//! Game program effects trait definitions
//!
//! # Effect Classification
//!
//! - **Category**: Application Effect
//! - **Implementation**: `frontier-effects` (`RpcGameProgramHandler`)
//! - **Usage**: the game initializer in `frontier-bootstrap`
//!
//! Building and signing the initialization transaction belongs to the
//! player's wallet. The program handler only submits what a
//! [`SessionTransactionSource`] hands it and waits for confirmation.

use crate::effects::ledger::LedgerError;
use crate::identifiers::{ActorAddress, TransactionSignature};
use async_trait::async_trait;
use std::sync::Arc;

/// Game program errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    /// No signed initialization transaction is available for the actor
    #[error("No initialization transaction for {actor}: {reason}")]
    TransactionUnavailable {
        /// Actor the transaction was requested for
        actor: ActorAddress,
        /// Why the source could not provide one
        reason: String,
    },
    /// The ledger rejected or failed the transaction
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Shared game-session program on the ledger.
#[async_trait]
pub trait GameProgramEffects: Send + Sync {
    /// Submit the session-initialization transaction for `actor` and wait
    /// for its confirmation.
    async fn initialize_session(
        &self,
        actor: &ActorAddress,
    ) -> Result<TransactionSignature, ProgramError>;

    /// Whether `actor` already has an initialized session on the ledger.
    async fn session_exists(&self, actor: &ActorAddress) -> Result<bool, ProgramError>;
}

/// Supplier of the signed session-initialization transaction.
///
/// Implemented by wallet integrations; the bootstrap flow never holds keys.
#[async_trait]
pub trait SessionTransactionSource: Send + Sync {
    /// Account that holds `actor`'s session state once initialized.
    async fn session_account(&self, actor: &ActorAddress) -> Result<ActorAddress, ProgramError>;

    /// Serialized, fully signed initialization transaction for `actor`.
    async fn signed_initialize_transaction(
        &self,
        actor: &ActorAddress,
    ) -> Result<Vec<u8>, ProgramError>;
}

/// Blanket implementation for Arc<T> where T: GameProgramEffects
#[async_trait]
impl<T: GameProgramEffects + ?Sized> GameProgramEffects for Arc<T> {
    async fn initialize_session(
        &self,
        actor: &ActorAddress,
    ) -> Result<TransactionSignature, ProgramError> {
        (**self).initialize_session(actor).await
    }

    async fn session_exists(&self, actor: &ActorAddress) -> Result<bool, ProgramError> {
        (**self).session_exists(actor).await
    }
}

/// Blanket implementation for Arc<T> where T: SessionTransactionSource
#[async_trait]
impl<T: SessionTransactionSource + ?Sized> SessionTransactionSource for Arc<T> {
    async fn session_account(&self, actor: &ActorAddress) -> Result<ActorAddress, ProgramError> {
        (**self).session_account(actor).await
    }

    async fn signed_initialize_transaction(
        &self,
        actor: &ActorAddress,
    ) -> Result<Vec<u8>, ProgramError> {
        (**self).signed_initialize_transaction(actor).await
    }
}
