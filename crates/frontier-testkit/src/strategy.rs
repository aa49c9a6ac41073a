//! Scripted funding strategies.

#![allow(clippy::disallowed_types)]

use async_trait::async_trait;
use frontier_bootstrap::{ProviderError, ProviderStrategy};
use frontier_core::{ActorAddress, Lamports};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a scripted strategy does when attempted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyBehavior {
    Succeed,
    Fail(String),
    /// Never completes; only a timeout ends the attempt
    Hang,
}

/// Attempt order shared by several strategies.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Strategy with a fixed behavior that counts its attempts.
#[derive(Debug, Clone)]
pub struct ScriptedStrategy {
    name: String,
    behavior: StrategyBehavior,
    calls: Arc<AtomicUsize>,
    amounts: Arc<Mutex<Vec<Lamports>>>,
    log: Option<CallLog>,
}

impl ScriptedStrategy {
    pub fn new(name: impl Into<String>, behavior: StrategyBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            amounts: Arc::new(Mutex::new(Vec::new())),
            log: None,
        }
    }

    pub fn succeeding(name: impl Into<String>) -> Self {
        Self::new(name, StrategyBehavior::Succeed)
    }

    pub fn failing(name: impl Into<String>) -> Self {
        let name = name.into();
        let message = format!("{name} unavailable");
        Self::new(name, StrategyBehavior::Fail(message))
    }

    pub fn hanging(name: impl Into<String>) -> Self {
        Self::new(name, StrategyBehavior::Hang)
    }

    /// Record each attempt's name in `log`.
    pub fn logging_to(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Amounts requested, one per attempt.
    pub fn requested_amounts(&self) -> Vec<Lamports> {
        self.amounts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderStrategy for ScriptedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, actor: &ActorAddress, amount: Lamports) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.amounts.lock().unwrap().push(amount);
        if let Some(log) = &self.log {
            log.record(self.name.clone());
        }
        tracing::debug!(provider = %self.name, %actor, %amount, "scripted attempt");

        match &self.behavior {
            StrategyBehavior::Succeed => Ok(()),
            StrategyBehavior::Fail(message) => Err(ProviderError::failed(&self.name, message)),
            StrategyBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }
}
