//! In-memory backend service.

#![allow(clippy::disallowed_types)]

use async_trait::async_trait;
use frontier_core::effects::{BackendEffects, BackendError};
use frontier_core::ActorAddress;
use std::sync::{Arc, Mutex};

/// How the backend answers grant requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantBehavior {
    Approve,
    Decline,
    Fail(BackendError),
}

/// Backend double recording grant requests and registrations.
#[derive(Debug, Clone)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
}

#[derive(Debug)]
struct BackendState {
    grant: GrantBehavior,
    register_failure: Option<BackendError>,
    grant_requests: Vec<ActorAddress>,
    registration_attempts: usize,
    registered: Vec<ActorAddress>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Backend that approves grants and accepts registrations.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BackendState {
                grant: GrantBehavior::Approve,
                register_failure: None,
                grant_requests: Vec::new(),
                registration_attempts: 0,
                registered: Vec::new(),
            })),
        }
    }

    pub fn with_grant(self, grant: GrantBehavior) -> Self {
        self.set_grant(grant);
        self
    }

    pub fn set_grant(&self, grant: GrantBehavior) {
        self.state.lock().unwrap().grant = grant;
    }

    /// Fail registrations with `error`; `None` restores success.
    pub fn set_register_failure(&self, error: Option<BackendError>) {
        self.state.lock().unwrap().register_failure = error;
    }

    /// Error a backend returns when it is down.
    pub fn unavailable() -> BackendError {
        BackendError::Status {
            url: "mock://backend".to_string(),
            status: 503,
        }
    }

    pub fn grant_requests(&self) -> usize {
        self.state.lock().unwrap().grant_requests.len()
    }

    pub fn registration_attempts(&self) -> usize {
        self.state.lock().unwrap().registration_attempts
    }

    /// Actors registered successfully, oldest first.
    pub fn registered(&self) -> Vec<ActorAddress> {
        self.state.lock().unwrap().registered.clone()
    }
}

#[async_trait]
impl BackendEffects for MockBackend {
    async fn request_grant(&self, actor: &ActorAddress) -> Result<bool, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.grant_requests.push(actor.clone());
        match &state.grant {
            GrantBehavior::Approve => Ok(true),
            GrantBehavior::Decline => Ok(false),
            GrantBehavior::Fail(error) => Err(error.clone()),
        }
    }

    async fn register_player(&self, actor: &ActorAddress) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.registration_attempts += 1;
        if let Some(error) = &state.register_failure {
            return Err(error.clone());
        }
        state.registered.push(actor.clone());
        Ok(())
    }
}
