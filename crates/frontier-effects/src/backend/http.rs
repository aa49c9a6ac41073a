//! `BackendEffects` over HTTP.
//!
//! Both endpoints take `{"address": "<base58>"}`. The grant endpoint answers
//! `{"success": bool}`; registration only needs a 2xx status.

use async_trait::async_trait;
use frontier_core::config::BackendConfig;
use frontier_core::effects::{BackendEffects, BackendError};
use frontier_core::{ActorAddress, FrontierError};
use serde::{Deserialize, Serialize};

/// Request body shared by the grant and registration endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAddressBody {
    pub address: String,
}

/// Grant endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantResponse {
    pub success: bool,
}

/// HTTP client for the backend service
#[derive(Debug, Clone)]
pub struct HttpBackendHandler {
    client: reqwest::Client,
    grant_url: String,
    register_url: String,
}

impl HttpBackendHandler {
    /// Create a handler from the backend section of the configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, FrontierError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FrontierError::network(format!("Failed to build HTTP client: {e}")))?;

        let base = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            grant_url: format!("{base}{}", config.grant_path),
            register_url: format!("{base}{}", config.register_path),
        })
    }

    pub fn grant_url(&self) -> &str {
        &self.grant_url
    }

    pub fn register_url(&self) -> &str {
        &self.register_url
    }

    async fn post_address(
        &self,
        url: &str,
        actor: &ActorAddress,
    ) -> Result<reqwest::Response, BackendError> {
        let body = PlayerAddressBody {
            address: actor.to_string(),
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(BackendError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            })
        }
    }
}

#[async_trait]
impl BackendEffects for HttpBackendHandler {
    async fn request_grant(&self, actor: &ActorAddress) -> Result<bool, BackendError> {
        let response = self.post_address(&self.grant_url, actor).await?;
        let grant: GrantResponse =
            response
                .json()
                .await
                .map_err(|e| BackendError::InvalidResponse {
                    url: self.grant_url.clone(),
                    reason: e.to_string(),
                })?;

        tracing::debug!(%actor, success = grant.success, "backend grant answered");
        Ok(grant.success)
    }

    async fn register_player(&self, actor: &ActorAddress) -> Result<(), BackendError> {
        self.post_address(&self.register_url, actor).await?;
        tracing::info!(%actor, "player registered with backend");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slash() {
        let config = BackendConfig {
            base_url: "https://api.example.com/".to_string(),
            ..BackendConfig::default()
        };
        let handler = HttpBackendHandler::new(&config).unwrap();
        assert_eq!(handler.grant_url(), "https://api.example.com/airdrop");
        assert_eq!(handler.register_url(), "https://api.example.com/players");
    }
}
