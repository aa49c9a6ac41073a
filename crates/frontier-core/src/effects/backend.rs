//! Backend service effects trait definitions
//!
//! # Effect Classification
//!
//! - **Category**: Application Effect
//! - **Implementation**: `frontier-effects` (`HttpBackendHandler`)
//! - **Usage**: the backend grant strategy and player registration

use crate::identifiers::ActorAddress;
use async_trait::async_trait;
use std::sync::Arc;

/// Backend service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a usable HTTP response
    #[error("Backend unreachable at {url}: {reason}")]
    Transport {
        /// Request URL
        url: String,
        /// Reason for the failure
        reason: String,
    },
    /// The service answered with a non-success status
    #[error("Backend rejected request to {url} with status {status}")]
    Status {
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
    },
    /// The response body could not be decoded
    #[error("Invalid backend response from {url}: {reason}")]
    InvalidResponse {
        /// Request URL
        url: String,
        /// What was wrong with it
        reason: String,
    },
}

/// Off-ledger backend: funding grants and the player index.
#[async_trait]
pub trait BackendEffects: Send + Sync {
    /// Ask the backend to fund `actor`. `Ok(false)` means the backend
    /// declined without a transport failure.
    async fn request_grant(&self, actor: &ActorAddress) -> Result<bool, BackendError>;

    /// Record `actor` in the backend's player index.
    async fn register_player(&self, actor: &ActorAddress) -> Result<(), BackendError>;
}

/// Blanket implementation for Arc<T> where T: BackendEffects
#[async_trait]
impl<T: BackendEffects + ?Sized> BackendEffects for Arc<T> {
    async fn request_grant(&self, actor: &ActorAddress) -> Result<bool, BackendError> {
        (**self).request_grant(actor).await
    }

    async fn register_player(&self, actor: &ActorAddress) -> Result<(), BackendError> {
        (**self).register_player(actor).await
    }
}
