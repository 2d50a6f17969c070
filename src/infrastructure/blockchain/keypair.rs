//! Payer keypair loading

use solana_sdk::signature::{read_keypair_file, Keypair};
use std::env;

use crate::shared::errors::AppError;

/// Environment variable holding the payer secret key as a JSON byte array
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Load the payer from a keypair file, falling back to `PRIVATE_KEY`
pub fn load_keypair(path: Option<&str>) -> Result<Keypair, AppError> {
    if let Some(path) = path {
        return read_keypair_file(path)
            .map_err(|e| AppError::ConfigError(format!("Failed to load keypair {}: {}", path, e)));
    }

    let secret = env::var(PRIVATE_KEY_ENV).map_err(|_| {
        AppError::ConfigError(format!("Missing {} in environment variables", PRIVATE_KEY_ENV))
    })?;
    keypair_from_json(&secret)
}

/// Parse a `[u8; 64]` secret key written as a JSON array
pub fn keypair_from_json(secret: &str) -> Result<Keypair, AppError> {
    let bytes: Vec<u8> = serde_json::from_str(secret).map_err(|e| {
        AppError::ConfigError(format!("{} is not a JSON byte array: {}", PRIVATE_KEY_ENV, e))
    })?;

    Keypair::try_from(bytes.as_slice())
        .map_err(|e| AppError::ConfigError(format!("Invalid secret key: {}", e)))
}
