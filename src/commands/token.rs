//! Token inspection command.

use clap::Args;

use portal_auth::JwtDecoder;
use portal_core::config::AppConfig;
use portal_core::error::AppError;

use crate::output;

/// Arguments for the inspect-token command
#[derive(Debug, Args)]
pub struct InspectTokenArgs {
    /// The signed token
    pub token: String,

    /// Treat the token as a refresh token
    #[arg(long)]
    pub refresh: bool,
}

/// Verify the token with the configured keys and print its claims.
pub fn execute(args: &InspectTokenArgs, config: &AppConfig) -> Result<(), AppError> {
    let decoder = JwtDecoder::new(&config.auth);
    let claims = if args.refresh {
        decoder.verify_refresh(&args.token)?
    } else {
        decoder.verify_access(&args.token)?
    };

    output::print_json(&claims);
    output::print_kv("expires at", &claims.expires_at().to_rfc3339());
    Ok(())
}
