//! `LedgerEffects` over JSON-RPC 2.0.

use super::jsonrpc::{RpcRequest, RpcResponse, SignatureStatus, WithContext};
use async_trait::async_trait;
use base64::Engine;
use frontier_core::config::{ConfirmationConfig, FrontierConfig};
use frontier_core::effects::{LedgerEffects, LedgerError};
use frontier_core::{ActorAddress, Commitment, FrontierError, Lamports, TransactionSignature};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Ledger handler bound to a single RPC endpoint.
#[derive(Debug)]
pub struct RpcLedgerHandler {
    endpoint: String,
    client: reqwest::Client,
    commitment: Commitment,
    confirmation: ConfirmationConfig,
    next_id: AtomicU64,
}

impl RpcLedgerHandler {
    /// Create a handler for `endpoint`.
    pub fn new(
        endpoint: impl Into<String>,
        commitment: Commitment,
        confirmation: ConfirmationConfig,
        request_timeout: Duration,
    ) -> Result<Self, FrontierError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| FrontierError::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
            commitment,
            confirmation,
            next_id: AtomicU64::new(1),
        })
    }

    /// Handler for an explicit endpoint using the rest of `config`.
    pub fn for_endpoint(config: &FrontierConfig, endpoint: &str) -> Result<Self, FrontierError> {
        Self::new(
            endpoint,
            config.ledger.commitment,
            config.confirmation.clone(),
            config.ledger.request_timeout(),
        )
    }

    /// Handler for the configured primary endpoint.
    pub fn primary(config: &FrontierConfig) -> Result<Self, FrontierError> {
        Self::for_endpoint(config, &config.ledger.primary_endpoint)
    }

    /// Handler for the configured alternate endpoint, or the default public
    /// endpoint when none is configured.
    pub fn alternate(config: &FrontierConfig) -> Result<Self, FrontierError> {
        Self::for_endpoint(config, config.ledger.alternate_endpoint_or_default())
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);

        tracing::debug!(endpoint = %self.endpoint, method, id, "ledger rpc request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| LedgerError::Transport {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body: RpcResponse<T> = response.json().await.map_err(|e| {
            if status.is_success() {
                LedgerError::InvalidResponse {
                    endpoint: self.endpoint.clone(),
                    reason: e.to_string(),
                }
            } else {
                LedgerError::Transport {
                    endpoint: self.endpoint.clone(),
                    reason: format!("HTTP {status}"),
                }
            }
        })?;

        body.into_result(&self.endpoint)
    }

    /// Submit a serialized, signed transaction.
    pub async fn send_transaction(
        &self,
        transaction: &[u8],
    ) -> Result<TransactionSignature, LedgerError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(transaction);
        let signature: String = self
            .call(
                "sendTransaction",
                json!([
                    encoded,
                    {"encoding": "base64", "preflightCommitment": self.commitment.as_str()}
                ]),
            )
            .await?;
        Ok(TransactionSignature::new(signature))
    }

    /// Whether `account` holds any data on the ledger.
    pub async fn account_exists(&self, account: &ActorAddress) -> Result<bool, LedgerError> {
        let info: WithContext<Option<Value>> = self
            .call(
                "getAccountInfo",
                json!([
                    account.as_str(),
                    {"encoding": "base64", "commitment": self.commitment.as_str()}
                ]),
            )
            .await?;
        Ok(info.value.is_some())
    }

    /// Current status of `signature`, `None` while the ledger has not seen it.
    pub async fn signature_status(
        &self,
        signature: &TransactionSignature,
    ) -> Result<Option<SignatureStatus>, LedgerError> {
        let statuses: WithContext<Vec<Option<SignatureStatus>>> = self
            .call(
                "getSignatureStatuses",
                json!([[signature.as_str()], {"searchTransactionHistory": true}]),
            )
            .await?;
        Ok(statuses.value.into_iter().next().flatten())
    }
}

#[async_trait]
impl LedgerEffects for RpcLedgerHandler {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_balance(&self, actor: &ActorAddress) -> Result<Lamports, LedgerError> {
        let balance: WithContext<u64> = self
            .call(
                "getBalance",
                json!([actor.as_str(), {"commitment": self.commitment.as_str()}]),
            )
            .await?;
        Ok(Lamports::new(balance.value))
    }

    async fn request_airdrop(
        &self,
        actor: &ActorAddress,
        amount: Lamports,
    ) -> Result<TransactionSignature, LedgerError> {
        let signature: String = self
            .call(
                "requestAirdrop",
                json!([
                    actor.as_str(),
                    amount.get(),
                    {"commitment": self.commitment.as_str()}
                ]),
            )
            .await?;
        tracing::debug!(endpoint = %self.endpoint, %actor, %amount, %signature, "airdrop submitted");
        Ok(TransactionSignature::new(signature))
    }

    async fn confirm_transaction(
        &self,
        signature: &TransactionSignature,
    ) -> Result<(), LedgerError> {
        let max_polls = self.confirmation.max_polls;
        for poll in 1..=max_polls {
            if let Some(status) = self.signature_status(signature).await? {
                if let Some(err) = status.err {
                    return Err(LedgerError::TransactionFailed {
                        signature: signature.clone(),
                        reason: err.to_string(),
                    });
                }
                let reached = status.confirmation_status.as_deref().unwrap_or_default();
                if self.commitment.is_satisfied_by(reached) {
                    tracing::debug!(%signature, poll, status = reached, "transaction confirmed");
                    return Ok(());
                }
            }
            if poll < max_polls {
                tokio::time::sleep(self.confirmation.poll_interval()).await;
            }
        }

        Err(LedgerError::NotConfirmed {
            signature: signature.clone(),
            polls: max_polls,
        })
    }
}
