//! In-memory ledger.
//!
//! Uses `std::sync::Mutex`: locks are never held across an await point.

#![allow(clippy::disallowed_types)]

use async_trait::async_trait;
use frontier_core::effects::{LedgerEffects, LedgerError};
use frontier_core::{ActorAddress, Lamports, TransactionSignature};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Ledger double with per-actor balances and injectable failures.
///
/// A successful airdrop credits the actor immediately.
#[derive(Debug, Clone)]
pub struct MockLedger {
    endpoint: String,
    state: Arc<Mutex<LedgerState>>,
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<ActorAddress, Lamports>,
    balance_failure: Option<LedgerError>,
    airdrop_failure: Option<LedgerError>,
    confirm_failure: Option<LedgerError>,
    balance_reads: usize,
    airdrops: Vec<(ActorAddress, Lamports)>,
    confirmations: Vec<TransactionSignature>,
    next_signature: u64,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    pub fn new() -> Self {
        Self::with_endpoint("mock://ledger")
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            state: Arc::new(Mutex::new(LedgerState::default())),
        }
    }

    pub fn with_balance(self, actor: &ActorAddress, balance: Lamports) -> Self {
        self.set_balance(actor, balance);
        self
    }

    pub fn set_balance(&self, actor: &ActorAddress, balance: Lamports) {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert(actor.clone(), balance);
    }

    /// Current balance; unknown actors hold zero.
    pub fn balance_of(&self, actor: &ActorAddress) -> Lamports {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(actor)
            .copied()
            .unwrap_or(Lamports::ZERO)
    }

    pub fn fail_balance_reads(&self, error: LedgerError) {
        self.state.lock().unwrap().balance_failure = Some(error);
    }

    pub fn fail_airdrops(&self, error: LedgerError) {
        self.state.lock().unwrap().airdrop_failure = Some(error);
    }

    pub fn fail_confirmations(&self, error: LedgerError) {
        self.state.lock().unwrap().confirm_failure = Some(error);
    }

    /// Error an endpoint would report for a rate-limited faucet.
    pub fn rate_limited(&self) -> LedgerError {
        LedgerError::Rpc {
            endpoint: self.endpoint.clone(),
            code: 429,
            message: "airdrop rate limit reached".to_string(),
        }
    }

    pub fn balance_reads(&self) -> usize {
        self.state.lock().unwrap().balance_reads
    }

    /// Successful airdrops, oldest first.
    pub fn airdrops(&self) -> Vec<(ActorAddress, Lamports)> {
        self.state.lock().unwrap().airdrops.clone()
    }

    pub fn confirmations(&self) -> Vec<TransactionSignature> {
        self.state.lock().unwrap().confirmations.clone()
    }
}

#[async_trait]
impl LedgerEffects for MockLedger {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_balance(&self, actor: &ActorAddress) -> Result<Lamports, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.balance_reads += 1;
        if let Some(error) = &state.balance_failure {
            return Err(error.clone());
        }
        Ok(state.balances.get(actor).copied().unwrap_or(Lamports::ZERO))
    }

    async fn request_airdrop(
        &self,
        actor: &ActorAddress,
        amount: Lamports,
    ) -> Result<TransactionSignature, LedgerError> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = &state.airdrop_failure {
            return Err(error.clone());
        }
        state.next_signature += 1;
        let signature = TransactionSignature::new(format!("airdrop-{}", state.next_signature));
        let balance = state.balances.entry(actor.clone()).or_default();
        *balance = balance.saturating_add(amount);
        state.airdrops.push((actor.clone(), amount));
        Ok(signature)
    }

    async fn confirm_transaction(&self, signature: &TransactionSignature) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = &state.confirm_failure {
            return Err(error.clone());
        }
        state.confirmations.push(signature.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test_actor;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn airdrop_credits_balance() {
        let actor = test_actor(0);
        let ledger = MockLedger::new();
        ledger
            .request_airdrop(&actor, Lamports::new(5))
            .await
            .unwrap();
        assert_eq!(ledger.get_balance(&actor).await, Ok(Lamports::new(5)));
        assert_eq!(ledger.balance_reads(), 1);
    }

    #[tokio::test]
    async fn injected_failures_are_returned() {
        let actor = test_actor(0);
        let ledger = MockLedger::new();
        ledger.fail_airdrops(ledger.rate_limited());
        assert_matches!(
            ledger.request_airdrop(&actor, Lamports::new(5)).await,
            Err(LedgerError::Rpc { code: 429, .. })
        );
        assert!(ledger.airdrops().is_empty());
    }
}
