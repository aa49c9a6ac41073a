//! Full bootstrap: funding, session initialization, registration.

use anyhow::{Context, Result};
use frontier_bootstrap::{build_orchestrator, StepState};
use frontier_core::{ActorAddress, FrontierConfig};
use frontier_effects::PresignedTransactionSource;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

pub async fn run(
    config: &FrontierConfig,
    address: ActorAddress,
    session_account: ActorAddress,
    init_tx: &Path,
) -> Result<ExitCode> {
    let source = PresignedTransactionSource::from_file(address.clone(), session_account, init_tx)
        .with_context(|| format!("reading signed transaction from {}", init_tx.display()))?;

    let observer = |step: &str, state: StepState| {
        println!("[{:>9}] {step}", state.as_str());
    };
    let orchestrator = build_orchestrator(config, source)?.with_observer(Arc::new(observer));

    let result = orchestrator.run(&address).await?;

    if let Some(message) = result.user_message() {
        eprintln!("{message}");
        for cause in &result.causes {
            eprintln!("  - {cause}");
        }
        return Ok(ExitCode::FAILURE);
    }

    match result.receipt {
        Some(receipt) if receipt.resumed => {
            println!("{address}: existing session reused, player registered");
        }
        Some(receipt) => {
            let signature = receipt
                .signature
                .map(|s| s.to_string())
                .unwrap_or_default();
            println!("{address}: game session initialized ({signature}), player registered");
        }
        None => println!("{address}: bootstrap complete"),
    }
    Ok(ExitCode::SUCCESS)
}
