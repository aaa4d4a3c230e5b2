//! Secret generation command.

use clap::Args;

use portal_auth::password::generate_secret;
use portal_core::error::AppError;

use crate::output;

/// Arguments for the gen-secret command
#[derive(Debug, Args)]
pub struct GenSecretArgs {
    /// Number of secrets to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

/// Print `count` fresh base64 secrets, one per line.
pub fn execute(args: &GenSecretArgs) -> Result<(), AppError> {
    if args.count == 0 {
        return Err(AppError::invalid_input("count must be at least 1"));
    }

    for _ in 0..args.count {
        println!("{}", generate_secret());
    }
    if args.count >= 3 {
        output::print_kv("hint", "use one each for pepper, access and refresh secrets");
    }
    Ok(())
}
