//! Wiring of production handlers into an orchestrator.

use crate::funding::FundingProvisioner;
use crate::initializer::GameInitializer;
use crate::orchestrator::BootstrapOrchestrator;
use crate::provider::default_cascade;
use frontier_core::effects::SessionTransactionSource;
use frontier_core::{FrontierConfig, FrontierError};
use frontier_effects::{HttpBackendHandler, RpcGameProgramHandler, RpcLedgerHandler};
use std::sync::Arc;

/// Orchestrator over the JSON-RPC ledger and the HTTP backend.
pub type RpcOrchestrator<S> =
    BootstrapOrchestrator<Arc<RpcLedgerHandler>, RpcGameProgramHandler<S>, Arc<HttpBackendHandler>>;

struct Handlers {
    primary: Arc<RpcLedgerHandler>,
    backend: Arc<HttpBackendHandler>,
    provisioner: FundingProvisioner<Arc<RpcLedgerHandler>>,
}

fn handlers(config: &FrontierConfig) -> Result<Handlers, FrontierError> {
    let primary = Arc::new(RpcLedgerHandler::primary(config)?);
    let alternate = RpcLedgerHandler::alternate(config)?;
    let backend = Arc::new(HttpBackendHandler::new(&config.backend)?);

    let cascade = default_cascade(&config.funding, primary.clone(), alternate, backend.clone());
    let provisioner = FundingProvisioner::new(primary.clone(), cascade)?
        .with_attempt_timeout(config.funding.attempt_timeout());

    Ok(Handlers {
        primary,
        backend,
        provisioner,
    })
}

/// Provisioner with the default cascade: primary faucet, alternate faucet,
/// backend grant. Balance reads go to the primary endpoint.
pub fn build_provisioner(
    config: &FrontierConfig,
) -> Result<FundingProvisioner<Arc<RpcLedgerHandler>>, FrontierError> {
    Ok(handlers(config)?.provisioner)
}

/// Full orchestrator. `source` supplies the actor's signed session
/// initialization transaction.
pub fn build_orchestrator<S>(
    config: &FrontierConfig,
    source: S,
) -> Result<RpcOrchestrator<S>, FrontierError>
where
    S: SessionTransactionSource + 'static,
{
    let Handlers {
        primary,
        backend,
        provisioner,
    } = handlers(config)?;

    let program = RpcGameProgramHandler::new(primary, source);
    let initializer = GameInitializer::new(program, backend)
        .with_session_check(config.session.skip_existing_session);

    Ok(BootstrapOrchestrator::new(
        provisioner,
        initializer,
        config.funding.min_balance_lamports,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ALTERNATE_FAUCET, BACKEND_GRANT, PRIMARY_FAUCET};

    #[test]
    fn default_config_builds_three_provider_cascade() {
        let provisioner = build_provisioner(&FrontierConfig::default()).unwrap();
        assert_eq!(
            provisioner.strategy_names(),
            vec![PRIMARY_FAUCET, ALTERNATE_FAUCET, BACKEND_GRANT]
        );
    }
}
