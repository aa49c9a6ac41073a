//! Transaction source for a transaction the wallet signed ahead of time.

use async_trait::async_trait;
use base64::Engine;
use frontier_core::effects::{ProgramError, SessionTransactionSource};
use frontier_core::{ActorAddress, FrontierError};
use std::path::Path;

/// Serves one pre-signed initialization transaction for one actor.
#[derive(Debug, Clone)]
pub struct PresignedTransactionSource {
    actor: ActorAddress,
    session_account: ActorAddress,
    transaction: Vec<u8>,
}

impl PresignedTransactionSource {
    pub fn new(actor: ActorAddress, session_account: ActorAddress, transaction: Vec<u8>) -> Self {
        Self {
            actor,
            session_account,
            transaction,
        }
    }

    /// Build from base64 transaction text, as exported by wallets.
    pub fn from_base64(
        actor: ActorAddress,
        session_account: ActorAddress,
        encoded: &str,
    ) -> Result<Self, FrontierError> {
        let transaction = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| FrontierError::invalid(format!("transaction is not base64: {e}")))?;
        if transaction.is_empty() {
            return Err(FrontierError::invalid("transaction is empty"));
        }
        Ok(Self::new(actor, session_account, transaction))
    }

    /// Read base64 transaction text from `path`.
    pub fn from_file(
        actor: ActorAddress,
        session_account: ActorAddress,
        path: &Path,
    ) -> Result<Self, FrontierError> {
        let encoded = std::fs::read_to_string(path)?;
        Self::from_base64(actor, session_account, &encoded)
    }

    fn check_actor(&self, actor: &ActorAddress) -> Result<(), ProgramError> {
        if actor == &self.actor {
            Ok(())
        } else {
            Err(ProgramError::TransactionUnavailable {
                actor: actor.clone(),
                reason: format!("transaction was signed for {}", self.actor),
            })
        }
    }
}

#[async_trait]
impl SessionTransactionSource for PresignedTransactionSource {
    async fn session_account(&self, actor: &ActorAddress) -> Result<ActorAddress, ProgramError> {
        self.check_actor(actor)?;
        Ok(self.session_account.clone())
    }

    async fn signed_initialize_transaction(
        &self,
        actor: &ActorAddress,
    ) -> Result<Vec<u8>, ProgramError> {
        self.check_actor(actor)?;
        Ok(self.transaction.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn actor() -> ActorAddress {
        ActorAddress::new("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin").unwrap()
    }

    fn session() -> ActorAddress {
        ActorAddress::new("So11111111111111111111111111111111111111112").unwrap()
    }

    #[tokio::test]
    async fn serves_transaction_for_bound_actor_only() {
        let source = PresignedTransactionSource::from_base64(actor(), session(), "AQID").unwrap();
        assert_eq!(
            source.signed_initialize_transaction(&actor()).await.unwrap(),
            vec![1, 2, 3]
        );
        assert_eq!(source.session_account(&actor()).await.unwrap(), session());

        assert_matches!(
            source.signed_initialize_transaction(&session()).await,
            Err(ProgramError::TransactionUnavailable { .. })
        );
    }

    #[test]
    fn rejects_garbage_and_empty_input() {
        assert!(PresignedTransactionSource::from_base64(actor(), session(), "!!").is_err());
        assert!(PresignedTransactionSource::from_base64(actor(), session(), "").is_err());
    }

    #[test]
    fn reads_trimmed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "AQID").unwrap();
        let source = PresignedTransactionSource::from_file(actor(), session(), file.path()).unwrap();
        assert_eq!(source.transaction, vec![1, 2, 3]);
    }
}
