//! Common fixtures.

use frontier_core::{ActorAddress, FrontierConfig, Lamports};

const ACTORS: [&str; 4] = [
    "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
    "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
    "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R",
    "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263",
];

/// Deterministic, valid actor address. `index` wraps around a small pool.
pub fn test_actor(index: usize) -> ActorAddress {
    ActorAddress::new(ACTORS[index % ACTORS.len()]).expect("fixture addresses are valid")
}

/// Default minimum balance: 0.25 coin.
pub fn test_min_balance() -> Lamports {
    frontier_core::config::DEFAULT_MIN_BALANCE
}

/// Configuration with fast confirmation polling, pointed at `ledger_url`
/// and `backend_url`.
pub fn test_config(ledger_url: &str, backend_url: &str) -> FrontierConfig {
    let mut config = FrontierConfig::default();
    config.ledger.primary_endpoint = ledger_url.to_string();
    config.ledger.alternate_endpoint = Some(ledger_url.to_string());
    config.ledger.request_timeout_ms = 2_000;
    config.backend.base_url = backend_url.to_string();
    config.backend.request_timeout_ms = 2_000;
    config.confirmation.poll_interval_ms = 10;
    config.confirmation.max_polls = 5;
    config.funding.attempt_timeout_ms = 5_000;
    config
}
