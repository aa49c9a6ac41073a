//! Frontier configuration.
//!
//! Configuration is limited to endpoint selection, funding amounts, and
//! timing knobs. Values are passed into handler and provisioner
//! constructors explicitly; library code never reads the process
//! environment.
//!
//! ```toml
//! [ledger]
//! primary_endpoint = "https://api.devnet.solana.com"
//! alternate_endpoint = "https://devnet.helius-rpc.com/?api-key=..."
//!
//! [backend]
//! base_url = "https://api.example.com"
//!
//! [funding]
//! min_balance_lamports = 250000000
//! ```

mod validation;

pub use validation::{ConfigValidation, ConfigValidator, ValidationError};

use crate::identifiers::{Commitment, Lamports};
use crate::FrontierError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Public endpoint used when no alternate endpoint is configured.
pub const DEFAULT_PUBLIC_ENDPOINT: &str = "https://api.devnet.solana.com";

/// Balance below which a new player is funded (0.25 coin).
pub const DEFAULT_MIN_BALANCE: Lamports = Lamports::new(250_000_000);

/// Amount requested from a faucet per attempt (1 coin).
pub const DEFAULT_AIRDROP_AMOUNT: Lamports = Lamports::new(1_000_000_000);

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierConfig {
    pub ledger: LedgerConfig,
    pub backend: BackendConfig,
    pub funding: FundingConfig,
    pub confirmation: ConfirmationConfig,
    pub session: SessionConfig,
}

/// Ledger RPC endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Endpoint used for balance reads, the first faucet, and transactions
    pub primary_endpoint: String,
    /// Endpoint used by the second faucet attempt
    pub alternate_endpoint: Option<String>,
    /// Commitment level for reads and confirmations
    pub commitment: Commitment,
    /// Per-request HTTP timeout
    pub request_timeout_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            primary_endpoint: DEFAULT_PUBLIC_ENDPOINT.to_string(),
            alternate_endpoint: None,
            commitment: Commitment::Confirmed,
            request_timeout_ms: 10_000,
        }
    }
}

impl LedgerConfig {
    /// Alternate endpoint, or the default public endpoint when unset.
    pub fn alternate_endpoint_or_default(&self) -> &str {
        self.alternate_endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .unwrap_or(DEFAULT_PUBLIC_ENDPOINT)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Backend grant and registration service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Path of the funding-grant endpoint
    pub grant_path: String,
    /// Path of the player-registration endpoint
    pub register_path: String,
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            grant_path: "/airdrop".to_string(),
            register_path: "/players".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Funding thresholds and provider timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundingConfig {
    /// Balance below which funding is required
    pub min_balance_lamports: Lamports,
    /// Amount a faucet is asked for
    pub airdrop_lamports: Lamports,
    /// Upper bound on one provider attempt; `0` disables the bound.
    /// When set it must outlast a faucet's airdrop request plus its full
    /// confirmation wait.
    pub attempt_timeout_ms: u64,
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            min_balance_lamports: DEFAULT_MIN_BALANCE,
            airdrop_lamports: DEFAULT_AIRDROP_AMOUNT,
            attempt_timeout_ms: 60_000,
        }
    }
}

impl FundingConfig {
    pub fn attempt_timeout(&self) -> Option<Duration> {
        (self.attempt_timeout_ms > 0).then(|| Duration::from_millis(self.attempt_timeout_ms))
    }
}

/// Transaction confirmation polling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub poll_interval_ms: u64,
    pub max_polls: u32,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            max_polls: 60,
        }
    }
}

impl ConfirmationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Time spent sleeping between status polls when every poll is used.
    pub fn wait_budget_ms(&self) -> u64 {
        self.poll_interval_ms
            .saturating_mul(u64::from(self.max_polls.saturating_sub(1)))
    }
}

/// Session initialization behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Skip the initialization transaction when the actor already has a
    /// session and only register the player
    pub skip_existing_session: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            skip_existing_session: true,
        }
    }
}

impl FrontierConfig {
    /// Parse configuration from TOML text, filling unset fields with defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, FrontierError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, FrontierError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FrontierError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Worst-case duration of one faucet attempt: the airdrop request, the
    /// sleeps between confirmation polls, and the last status request.
    pub fn faucet_attempt_budget_ms(&self) -> u64 {
        self.confirmation
            .wait_budget_ms()
            .saturating_add(self.ledger.request_timeout_ms.saturating_mul(2))
    }

    /// Render configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, FrontierError> {
        toml::to_string_pretty(self).map_err(|e| FrontierError::serialization(e.to_string()))
    }
}

impl ConfigValidation for FrontierConfig {
    fn validate(&self) -> Result<(), FrontierError> {
        let mut validator = ConfigValidator::new();

        let mut ledger = ConfigValidator::for_section("ledger");
        ledger
            .http_url("primary_endpoint", &self.ledger.primary_endpoint)
            .at_least("request_timeout_ms", self.ledger.request_timeout_ms, 1);
        if let Some(alternate) = &self.ledger.alternate_endpoint {
            ledger.http_url("alternate_endpoint", alternate);
        }

        let mut backend = ConfigValidator::for_section("backend");
        backend
            .http_url("base_url", &self.backend.base_url)
            .require("grant_path", &self.backend.grant_path)
            .require("register_path", &self.backend.register_path)
            .at_least("request_timeout_ms", self.backend.request_timeout_ms, 1);

        let mut funding = ConfigValidator::for_section("funding");
        funding
            .at_least(
                "min_balance_lamports",
                self.funding.min_balance_lamports.get(),
                1,
            )
            .at_least("airdrop_lamports", self.funding.airdrop_lamports.get(), 1);
        if self.funding.attempt_timeout_ms > 0 {
            funding.at_least(
                "attempt_timeout_ms",
                self.funding.attempt_timeout_ms,
                self.faucet_attempt_budget_ms().saturating_add(1),
            );
        }

        let mut confirmation = ConfigValidator::for_section("confirmation");
        confirmation.at_least("max_polls", u64::from(self.confirmation.max_polls), 1);

        validator
            .absorb(ledger)
            .absorb(backend)
            .absorb(funding)
            .absorb(confirmation);
        validator.finish()
    }
}
