//! Configuration commands.

use anyhow::Result;
use clap::Subcommand;
use frontier_core::FrontierConfig;

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Validate the effective configuration
    Check,
    /// Print the effective configuration as TOML
    Show,
}

/// `config` has already been loaded and validated by the time this runs.
pub fn run(command: &ConfigCommand, config: &FrontierConfig) -> Result<()> {
    match command {
        ConfigCommand::Check => {
            println!("Configuration OK");
            println!("  primary endpoint:   {}", config.ledger.primary_endpoint);
            println!(
                "  alternate endpoint: {}",
                config.ledger.alternate_endpoint_or_default()
            );
            println!("  backend:            {}", config.backend.base_url);
            println!(
                "  minimum balance:    {}",
                config.funding.min_balance_lamports
            );
        }
        ConfigCommand::Show => print!("{}", config.to_toml_string()?),
    }
    Ok(())
}
