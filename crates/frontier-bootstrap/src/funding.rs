//! Funding provisioner: ordered provider cascade with short-circuit on success.
//!
//! # Flow
//! 1. Read the actor's balance once
//! 2. At or above the minimum: done, no provider is invoked
//! 3. Otherwise try each strategy in declared order, stopping at the first success
//! 4. Every strategy failed: report all causes in attempt order
//!
//! Individual provider failures are recovered here and never abort the
//! cascade. Only exhaustion, or a failed balance read, is reportable.

use crate::provider::{ProviderError, ProviderStrategy};
use frontier_core::effects::{LedgerEffects, LedgerError};
use frontier_core::{ActorAddress, FrontierError, Lamports};
use std::time::Duration;

/// Result of one `ensure_funded` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingOutcome {
    /// Balance already met the minimum; no provider was invoked
    Skipped { balance: Lamports },
    /// `provider` funded the actor
    Funded {
        provider: String,
        balance_before: Lamports,
    },
    /// Every strategy failed; one cause per strategy, in attempt order
    Exhausted { causes: Vec<ProviderError> },
}

impl FundingOutcome {
    /// Skipped and Funded both leave the actor able to proceed.
    pub fn is_funded(&self) -> bool {
        !matches!(self, Self::Exhausted { .. })
    }

    pub fn causes(&self) -> &[ProviderError] {
        match self {
            Self::Exhausted { causes } => causes,
            _ => &[],
        }
    }
}

/// Funding failures outside the cascade itself
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FundingError {
    #[error("Invalid funding request: {message}")]
    InvalidRequest { message: String },
    #[error("Balance unavailable: {source}")]
    BalanceUnavailable {
        #[source]
        source: LedgerError,
    },
}

impl From<FundingError> for FrontierError {
    fn from(err: FundingError) -> Self {
        match err {
            FundingError::InvalidRequest { message } => FrontierError::invalid(message),
            FundingError::BalanceUnavailable { source } => FrontierError::network(source.to_string()),
        }
    }
}

/// Ensures an actor holds a minimum balance.
pub struct FundingProvisioner<L> {
    ledger: L,
    strategies: Vec<Box<dyn ProviderStrategy>>,
    attempt_timeout: Option<Duration>,
}

impl<L: LedgerEffects> FundingProvisioner<L> {
    /// Provisioner over `strategies`, tried in the given order. `ledger`
    /// answers the balance query.
    pub fn new(ledger: L, strategies: Vec<Box<dyn ProviderStrategy>>) -> Result<Self, FundingError> {
        if strategies.is_empty() {
            return Err(FundingError::InvalidRequest {
                message: "at least one provider strategy is required".to_string(),
            });
        }
        Ok(Self {
            ledger,
            strategies,
            attempt_timeout: None,
        })
    }

    /// Bound each attempt; an attempt that runs out of time counts as a
    /// failed provider. `None` leaves attempts unbounded.
    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Strategy names in attempt order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Make sure `actor` holds at least `min_amount`.
    pub async fn ensure_funded(
        &self,
        actor: &ActorAddress,
        min_amount: Lamports,
    ) -> Result<FundingOutcome, FundingError> {
        if min_amount.is_zero() {
            return Err(FundingError::InvalidRequest {
                message: "minimum amount must be greater than zero".to_string(),
            });
        }

        let balance = self
            .ledger
            .get_balance(actor)
            .await
            .map_err(|source| FundingError::BalanceUnavailable { source })?;

        if balance >= min_amount {
            tracing::info!(%actor, %balance, %min_amount, "balance sufficient, funding skipped");
            return Ok(FundingOutcome::Skipped { balance });
        }

        let shortfall = min_amount.saturating_sub(balance);
        tracing::info!(%actor, %balance, %min_amount, "balance below minimum, requesting funding");

        let mut causes = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            match self.attempt(&**strategy, actor, shortfall).await {
                Ok(()) => {
                    tracing::info!(%actor, provider = strategy.name(), "funding provided");
                    return Ok(FundingOutcome::Funded {
                        provider: strategy.name().to_string(),
                        balance_before: balance,
                    });
                }
                Err(error) => {
                    tracing::warn!(%actor, provider = strategy.name(), %error, "funding attempt failed");
                    causes.push(error);
                }
            }
        }

        tracing::warn!(%actor, attempts = causes.len(), "all funding providers failed");
        Ok(FundingOutcome::Exhausted { causes })
    }

    async fn attempt(
        &self,
        strategy: &dyn ProviderStrategy,
        actor: &ActorAddress,
        amount: Lamports,
    ) -> Result<(), ProviderError> {
        let attempt = strategy.attempt(actor, amount);
        match self.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, attempt)
                .await
                .unwrap_or_else(|_| {
                    Err(ProviderError::TimedOut {
                        provider: strategy.name().to_string(),
                        timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    })
                }),
            None => attempt.await,
        }
    }
}

impl<L> std::fmt::Debug for FundingProvisioner<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundingProvisioner")
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("attempt_timeout", &self.attempt_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use frontier_core::TransactionSignature;

    struct FixedLedger(Result<Lamports, LedgerError>);

    #[async_trait]
    impl LedgerEffects for FixedLedger {
        fn endpoint(&self) -> &str {
            "fixed"
        }

        async fn get_balance(&self, _actor: &ActorAddress) -> Result<Lamports, LedgerError> {
            self.0.clone()
        }

        async fn request_airdrop(
            &self,
            _actor: &ActorAddress,
            _amount: Lamports,
        ) -> Result<TransactionSignature, LedgerError> {
            unreachable!("provisioner never airdrops directly")
        }

        async fn confirm_transaction(
            &self,
            _signature: &TransactionSignature,
        ) -> Result<(), LedgerError> {
            unreachable!("provisioner never confirms directly")
        }
    }

    struct Declines;

    #[async_trait]
    impl ProviderStrategy for Declines {
        fn name(&self) -> &str {
            "declines"
        }

        async fn attempt(&self, _actor: &ActorAddress, _amount: Lamports) -> Result<(), ProviderError> {
            Err(ProviderError::failed("declines", "no"))
        }
    }

    fn actor() -> ActorAddress {
        ActorAddress::new("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin").unwrap()
    }

    #[test]
    fn empty_cascade_is_rejected() {
        let result = FundingProvisioner::new(FixedLedger(Ok(Lamports::ZERO)), Vec::new());
        assert!(matches!(result, Err(FundingError::InvalidRequest { .. })));
    }

    #[tokio::test]
    async fn zero_minimum_is_rejected() {
        let provisioner =
            FundingProvisioner::new(FixedLedger(Ok(Lamports::ZERO)), vec![Box::new(Declines)]).unwrap();
        let result = provisioner.ensure_funded(&actor(), Lamports::ZERO).await;
        assert!(matches!(result, Err(FundingError::InvalidRequest { .. })));
    }

    #[tokio::test]
    async fn balance_failure_is_reported() {
        let ledger = FixedLedger(Err(LedgerError::Transport {
            endpoint: "fixed".into(),
            reason: "down".into(),
        }));
        let provisioner = FundingProvisioner::new(ledger, vec![Box::new(Declines)]).unwrap();
        let result = provisioner
            .ensure_funded(&actor(), Lamports::new(250_000_000))
            .await;
        assert!(matches!(result, Err(FundingError::BalanceUnavailable { .. })));
    }

    #[tokio::test]
    async fn exhausted_lists_each_cause() {
        let provisioner = FundingProvisioner::new(
            FixedLedger(Ok(Lamports::ZERO)),
            vec![Box::new(Declines), Box::new(Declines)],
        )
        .unwrap();
        let outcome = provisioner
            .ensure_funded(&actor(), Lamports::new(1))
            .await
            .unwrap();
        assert!(!outcome.is_funded());
        assert_eq!(outcome.causes().len(), 2);
    }
}
