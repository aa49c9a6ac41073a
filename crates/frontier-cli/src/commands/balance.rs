//! Balance lookup.

use anyhow::Result;
use frontier_core::effects::LedgerEffects;
use frontier_core::{ActorAddress, FrontierConfig};
use frontier_effects::RpcLedgerHandler;

/// Print `address`'s balance on the primary endpoint and whether it meets
/// the configured minimum.
pub async fn run(config: &FrontierConfig, address: &ActorAddress) -> Result<()> {
    let ledger = RpcLedgerHandler::primary(config)?;
    let balance = ledger.get_balance(address).await?;
    let minimum = config.funding.min_balance_lamports;

    println!("Address:  {address}");
    println!("Endpoint: {} ({})", ledger.endpoint(), ledger.commitment());
    println!("Balance:  {balance} ({} lamports)", balance.get());
    if balance >= minimum {
        println!("Status:   funded (minimum {minimum})");
    } else {
        println!(
            "Status:   below minimum {minimum}, short by {}",
            minimum.saturating_sub(balance)
        );
    }
    Ok(())
}
