//! Error handling for the application

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Config selection errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Malformed vault config {key}: end vesting duration {end} is before start {start}")]
    MalformedVaultConfig { key: Pubkey, start: u64, end: u64 },
}

/// Launch pipeline errors
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("No pool config with vault support matches the requirement")]
    NoMatchingConfig,

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Activation point out of range: {0}")]
    ActivationOutOfRange(String),

    #[error("Pool creation failed: {0}")]
    PoolCreationFailed(String),

    #[error("Vault creation failed: {0}")]
    VaultCreationFailed(String),

    #[error(transparent)]
    App(#[from] AppError),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Blockchain error: {0}")]
    BlockchainError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Execution error: {0}")]
    ExecutionError(String),
}
