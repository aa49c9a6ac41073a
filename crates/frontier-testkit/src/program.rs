//! In-memory game program.

#![allow(clippy::disallowed_types)]

use async_trait::async_trait;
use frontier_core::effects::{GameProgramEffects, LedgerError, ProgramError};
use frontier_core::{ActorAddress, TransactionSignature};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Game program double. A successful initialization creates the session,
/// so a later `session_exists` for the same actor reports `true`.
#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    state: Arc<Mutex<ProgramState>>,
}

#[derive(Debug, Default)]
struct ProgramState {
    sessions: HashSet<ActorAddress>,
    init_failure: Option<ProgramError>,
    lookup_failure: Option<ProgramError>,
    init_calls: usize,
    lookups: usize,
}

impl MockProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program where `actor` already has a session.
    pub fn with_session(self, actor: &ActorAddress) -> Self {
        self.state.lock().unwrap().sessions.insert(actor.clone());
        self
    }

    pub fn set_init_failure(&self, error: Option<ProgramError>) {
        self.state.lock().unwrap().init_failure = error;
    }

    pub fn set_lookup_failure(&self, error: Option<ProgramError>) {
        self.state.lock().unwrap().lookup_failure = error;
    }

    /// Error a ledger reports when the program rejects the transaction.
    pub fn rejected(reason: &str) -> ProgramError {
        ProgramError::Ledger(LedgerError::TransactionFailed {
            signature: TransactionSignature::new("rejected"),
            reason: reason.to_string(),
        })
    }

    pub fn has_session(&self, actor: &ActorAddress) -> bool {
        self.state.lock().unwrap().sessions.contains(actor)
    }

    /// Number of initialization transactions submitted, failed ones included.
    pub fn init_calls(&self) -> usize {
        self.state.lock().unwrap().init_calls
    }

    pub fn lookups(&self) -> usize {
        self.state.lock().unwrap().lookups
    }
}

#[async_trait]
impl GameProgramEffects for MockProgram {
    async fn initialize_session(
        &self,
        actor: &ActorAddress,
    ) -> Result<TransactionSignature, ProgramError> {
        let mut state = self.state.lock().unwrap();
        state.init_calls += 1;
        if let Some(error) = &state.init_failure {
            return Err(error.clone());
        }
        state.sessions.insert(actor.clone());
        Ok(TransactionSignature::new(format!("init-{}", state.init_calls)))
    }

    async fn session_exists(&self, actor: &ActorAddress) -> Result<bool, ProgramError> {
        let mut state = self.state.lock().unwrap();
        state.lookups += 1;
        if let Some(error) = &state.lookup_failure {
            return Err(error.clone());
        }
        Ok(state.sessions.contains(actor))
    }
}
