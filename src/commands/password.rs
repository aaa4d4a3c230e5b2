//! Password hashing command.

use clap::Args;

use portal_auth::PasswordHasher;
use portal_core::config::AppConfig;
use portal_core::error::AppError;

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Password to hash; prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Hash a password exactly as registration would and print the PHC string.
pub async fn execute(args: &HashPasswordArgs, config: &AppConfig) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let hasher = PasswordHasher::new(&config.auth)?;
    let hash = hasher.hash_password_blocking(password).await?;
    println!("{hash}");
    Ok(())
}
