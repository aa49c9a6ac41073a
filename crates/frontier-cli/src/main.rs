//! Frontier CLI
//!
//! Operator entry point for the player bootstrap flow: inspect a balance,
//! run the funding cascade on its own, or run the full bootstrap with a
//! transaction the player's wallet signed ahead of time.

use anyhow::Result;
use clap::{Parser, Subcommand};
use frontier_core::ActorAddress;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{
    common::{self, Overrides},
    config::ConfigCommand,
};

#[derive(Debug, Parser)]
#[command(name = "frontier")]
#[command(about = "Frontier - player funding and game session bootstrap", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the primary ledger RPC endpoint
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Override the backend service base URL
    #[arg(long, global = true)]
    backend_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show an account's balance on the primary endpoint
    Balance {
        /// Account address (base58)
        address: ActorAddress,
    },

    /// Bring an account up to the minimum balance
    Fund {
        /// Account address (base58)
        address: ActorAddress,
    },

    /// Fund an account, initialize its game session, and register it
    Bootstrap {
        /// Player address (base58)
        address: ActorAddress,

        /// Account holding the player's session state
        #[arg(long)]
        session_account: ActorAddress,

        /// File with the signed initialization transaction (base64)
        #[arg(long)]
        init_tx: PathBuf,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize unified logging system
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let overrides = Overrides {
        rpc_url: cli.rpc_url,
        backend_url: cli.backend_url,
    };
    let config = common::load_config(cli.config.as_deref(), &overrides)?;

    match cli.command {
        Commands::Balance { address } => {
            commands::balance::run(&config, &address).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fund { address } => commands::fund::run(&config, &address).await,
        Commands::Bootstrap {
            address,
            session_account,
            init_tx,
        } => commands::bootstrap::run(&config, address, session_account, &init_tx).await,
        Commands::Config(cmd) => {
            commands::config::run(&cmd, &config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
