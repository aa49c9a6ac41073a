//! `GameProgramEffects` backed by a ledger RPC handler.

use crate::ledger::RpcLedgerHandler;
use async_trait::async_trait;
use frontier_core::effects::{
    GameProgramEffects, LedgerEffects, ProgramError, SessionTransactionSource,
};
use frontier_core::{ActorAddress, TransactionSignature};
use std::sync::Arc;

/// Submits session-initialization transactions and checks session accounts.
#[derive(Debug)]
pub struct RpcGameProgramHandler<S> {
    ledger: Arc<RpcLedgerHandler>,
    source: S,
}

impl<S: SessionTransactionSource> RpcGameProgramHandler<S> {
    pub fn new(ledger: Arc<RpcLedgerHandler>, source: S) -> Self {
        Self { ledger, source }
    }
}

#[async_trait]
impl<S: SessionTransactionSource> GameProgramEffects for RpcGameProgramHandler<S> {
    async fn initialize_session(
        &self,
        actor: &ActorAddress,
    ) -> Result<TransactionSignature, ProgramError> {
        let transaction = self.source.signed_initialize_transaction(actor).await?;
        let signature = self.ledger.send_transaction(&transaction).await?;
        tracing::info!(%actor, %signature, "session initialization submitted");

        self.ledger.confirm_transaction(&signature).await?;
        Ok(signature)
    }

    async fn session_exists(&self, actor: &ActorAddress) -> Result<bool, ProgramError> {
        let account = self.source.session_account(actor).await?;
        let exists = self.ledger.account_exists(&account).await?;
        tracing::debug!(%actor, session_account = %account, exists, "session lookup");
        Ok(exists)
    }
}
