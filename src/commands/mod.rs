//! CLI command definitions and dispatch.

pub mod migrate;
pub mod password;
pub mod secret;
pub mod token;

use clap::{Parser, Subcommand};

use portal_core::config::AppConfig;
use portal_core::error::AppError;

/// Med Portal credential and session tooling
#[derive(Debug, Parser)]
#[command(name = "portal", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (`config/<env>.toml`)
    #[arg(short, long, env = "PORTAL_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a random pepper or signing secret
    GenSecret(secret::GenSecretArgs),
    /// Hash a password with the configured pepper and cost
    HashPassword(password::HashPasswordArgs),
    /// Verify a token and print its claims
    InspectToken(token::InspectTokenArgs),
    /// Apply pending database migrations
    Migrate,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// `config` is only required by commands that need secrets or a database.
    pub async fn execute(&self, config: Result<AppConfig, AppError>) -> Result<(), AppError> {
        match &self.command {
            Commands::GenSecret(args) => secret::execute(args),
            Commands::HashPassword(args) => password::execute(args, &config?).await,
            Commands::InspectToken(args) => token::execute(args, &config?),
            Commands::Migrate => migrate::execute(&config?).await,
        }
    }
}
