// Command modules for CLI

/// Shared utilities for all commands
pub mod common;

/// Balance lookup command
pub mod balance;

/// Funding cascade command
pub mod fund;

/// Full bootstrap command
pub mod bootstrap;

/// Configuration commands
pub mod config;
