//! Funding provider strategies.
//!
//! A strategy is one way of getting lamports into an actor's account. The
//! provisioner tries strategies in order and never retries one within a run,
//! so strategies keep no per-run state.

use async_trait::async_trait;
use frontier_core::config::FundingConfig;
use frontier_core::effects::{BackendEffects, BackendError, LedgerEffects, LedgerError};
use frontier_core::{ActorAddress, Lamports};

/// Name of the faucet strategy on the primary endpoint.
pub const PRIMARY_FAUCET: &str = "primary-faucet";

/// Name of the faucet strategy on the alternate endpoint.
pub const ALTERNATE_FAUCET: &str = "alternate-faucet";

/// Name of the backend grant strategy.
pub const BACKEND_GRANT: &str = "backend-grant";

/// Failure of one strategy attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider}: {source}")]
    Ledger {
        provider: String,
        #[source]
        source: LedgerError,
    },
    #[error("{provider}: {source}")]
    Backend {
        provider: String,
        #[source]
        source: BackendError,
    },
    #[error("{provider}: grant declined by backend")]
    GrantDeclined { provider: String },
    #[error("{provider}: no answer within {timeout_ms}ms")]
    TimedOut { provider: String, timeout_ms: u64 },
    #[error("{provider}: {message}")]
    Failed { provider: String, message: String },
}

impl ProviderError {
    /// Generic failure for strategies without a dedicated variant.
    pub fn failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Name of the strategy that failed.
    pub fn provider(&self) -> &str {
        match self {
            Self::Ledger { provider, .. }
            | Self::Backend { provider, .. }
            | Self::GrantDeclined { provider }
            | Self::TimedOut { provider, .. }
            | Self::Failed { provider, .. } => provider,
        }
    }
}

/// One funding-acquisition method.
#[async_trait]
pub trait ProviderStrategy: Send + Sync {
    /// Stable name used in logs and error causes.
    fn name(&self) -> &str;

    /// Try to add at least `amount` to `actor`'s balance.
    async fn attempt(&self, actor: &ActorAddress, amount: Lamports) -> Result<(), ProviderError>;
}

/// Airdrop from a ledger endpoint's faucet, then wait for confirmation.
#[derive(Debug)]
pub struct FaucetStrategy<L> {
    name: String,
    ledger: L,
    airdrop_amount: Lamports,
}

impl<L: LedgerEffects> FaucetStrategy<L> {
    /// Faucet asking for `airdrop_amount`, or for the requested shortfall
    /// when that is larger.
    pub fn new(name: impl Into<String>, ledger: L, airdrop_amount: Lamports) -> Self {
        Self {
            name: name.into(),
            ledger,
            airdrop_amount,
        }
    }

    fn ledger_error(&self, source: LedgerError) -> ProviderError {
        ProviderError::Ledger {
            provider: self.name.clone(),
            source,
        }
    }
}

#[async_trait]
impl<L: LedgerEffects> ProviderStrategy for FaucetStrategy<L> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, actor: &ActorAddress, amount: Lamports) -> Result<(), ProviderError> {
        let request = self.airdrop_amount.max(amount);
        tracing::debug!(
            provider = %self.name,
            endpoint = self.ledger.endpoint(),
            %actor,
            %request,
            "requesting airdrop"
        );

        let signature = self
            .ledger
            .request_airdrop(actor, request)
            .await
            .map_err(|e| self.ledger_error(e))?;
        self.ledger
            .confirm_transaction(&signature)
            .await
            .map_err(|e| self.ledger_error(e))
    }
}

/// Funding granted by the backend service.
#[derive(Debug)]
pub struct BackendGrantStrategy<B> {
    name: String,
    backend: B,
}

impl<B: BackendEffects> BackendGrantStrategy<B> {
    pub fn new(name: impl Into<String>, backend: B) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }
}

#[async_trait]
impl<B: BackendEffects> ProviderStrategy for BackendGrantStrategy<B> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, actor: &ActorAddress, _amount: Lamports) -> Result<(), ProviderError> {
        match self.backend.request_grant(actor).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ProviderError::GrantDeclined {
                provider: self.name.clone(),
            }),
            Err(source) => Err(ProviderError::Backend {
                provider: self.name.clone(),
                source,
            }),
        }
    }
}

/// Primary faucet, then alternate faucet, then backend grant.
pub fn default_cascade<LP, LA, B>(
    funding: &FundingConfig,
    primary: LP,
    alternate: LA,
    backend: B,
) -> Vec<Box<dyn ProviderStrategy>>
where
    LP: LedgerEffects + 'static,
    LA: LedgerEffects + 'static,
    B: BackendEffects + 'static,
{
    vec![
        Box::new(FaucetStrategy::new(
            PRIMARY_FAUCET,
            primary,
            funding.airdrop_lamports,
        )),
        Box::new(FaucetStrategy::new(
            ALTERNATE_FAUCET,
            alternate,
            funding.airdrop_lamports,
        )),
        Box::new(BackendGrantStrategy::new(BACKEND_GRANT, backend)),
    ]
}
