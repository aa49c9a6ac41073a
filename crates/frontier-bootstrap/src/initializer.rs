//! Game initializer: on-ledger session initialization, then backend
//! registration.
//!
//! Registration only runs after the initialization transaction is confirmed.
//! A confirmed transaction cannot be undone, so a registration failure is
//! reported as `RegistrationFailed` while the session stays on the ledger.
//! When the session-existence check is enabled, a later run for the same
//! actor skips the transaction and only retries registration.

use frontier_core::effects::{BackendEffects, BackendError, GameProgramEffects, ProgramError};
use frontier_core::{ActorAddress, TransactionSignature};

/// Outcome of a successful `initialize_and_register`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReceipt {
    /// Signature of the initialization transaction, `None` when an existing
    /// session was reused
    pub signature: Option<TransactionSignature>,
    /// Whether an existing session was found and the transaction skipped
    pub resumed: bool,
}

/// Initialization failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    #[error("session lookup failed: {source}")]
    SessionLookup {
        #[source]
        source: ProgramError,
    },
    #[error("session initialization failed: {source}")]
    Transaction {
        #[source]
        source: ProgramError,
    },
    #[error("player registration failed after session initialization: {source}")]
    RegistrationFailed {
        /// Confirmed initialization transaction, if this run submitted one
        signature: Option<TransactionSignature>,
        #[source]
        source: BackendError,
    },
}

impl InitError {
    /// Whether a session exists on the ledger despite the failure.
    pub fn session_persisted(&self) -> bool {
        matches!(self, Self::RegistrationFailed { .. })
    }
}

/// Initializes the shared game session and registers the player.
#[derive(Debug)]
pub struct GameInitializer<P, B> {
    program: P,
    backend: B,
    skip_existing_session: bool,
}

impl<P: GameProgramEffects, B: BackendEffects> GameInitializer<P, B> {
    /// Initializer that checks for an existing session before submitting.
    pub fn new(program: P, backend: B) -> Self {
        Self {
            program,
            backend,
            skip_existing_session: true,
        }
    }

    /// Enable or disable the existing-session check.
    pub fn with_session_check(mut self, enabled: bool) -> Self {
        self.skip_existing_session = enabled;
        self
    }

    pub async fn initialize_and_register(
        &self,
        actor: &ActorAddress,
    ) -> Result<InitReceipt, InitError> {
        let resumed = if self.skip_existing_session {
            self.program
                .session_exists(actor)
                .await
                .map_err(|source| InitError::SessionLookup { source })?
        } else {
            false
        };

        let signature = if resumed {
            tracing::info!(%actor, "session already initialized, skipping transaction");
            None
        } else {
            let signature = self
                .program
                .initialize_session(actor)
                .await
                .map_err(|source| InitError::Transaction { source })?;
            tracing::info!(%actor, %signature, "session initialized");
            Some(signature)
        };

        self.backend
            .register_player(actor)
            .await
            .map_err(|source| InitError::RegistrationFailed {
                signature: signature.clone(),
                source,
            })?;

        Ok(InitReceipt { signature, resumed })
    }
}
