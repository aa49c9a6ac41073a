//! Funding cascade on its own, without session initialization.

use anyhow::Result;
use frontier_bootstrap::{build_provisioner, FundingOutcome};
use frontier_core::{ActorAddress, FrontierConfig};
use std::process::ExitCode;

pub async fn run(config: &FrontierConfig, address: &ActorAddress) -> Result<ExitCode> {
    let provisioner = build_provisioner(config)?;
    tracing::info!(providers = ?provisioner.strategy_names(), "funding cascade");

    let outcome = provisioner
        .ensure_funded(address, config.funding.min_balance_lamports)
        .await?;

    match outcome {
        FundingOutcome::Skipped { balance } => {
            println!("{address} already holds {balance}; no funding requested");
            Ok(ExitCode::SUCCESS)
        }
        FundingOutcome::Funded {
            provider,
            balance_before,
        } => {
            println!("{address} funded by {provider} (balance before: {balance_before})");
            Ok(ExitCode::SUCCESS)
        }
        FundingOutcome::Exhausted { causes } => {
            eprintln!("All funding providers failed for {address}:");
            for cause in &causes {
                eprintln!("  - {cause}");
            }
            eprintln!("Please fund the wallet manually using a web faucet.");
            Ok(ExitCode::FAILURE)
        }
    }
}
