//! Common types used across the application

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::fmt;

use crate::shared::errors::AppError;

/// Meteora Dynamic AMM program
pub const DYNAMIC_AMM_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("Eo7WjKq67rjJQSZxS6z3YkapzY3eMj6Xy8X5EQVn5UaB");

/// Meteora Alpha Vault program
pub const ALPHA_VAULT_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("vaU6kP7iNEGkbmPkLmZfGwiGxd4Mob24QQCie5R9kd2");

/// Wrapped SOL mint
pub const NATIVE_MINT: Pubkey =
    solana_sdk::pubkey!("So11111111111111111111111111111111111111112");

/// Classic SPL token program
pub const SPL_TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Token-2022 program
pub const SPL_TOKEN_2022_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

/// How a pool (or vault) measures its activation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ActivationType {
    Slot,
    Timestamp,
}

impl ActivationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationType::Slot => "slot",
            ActivationType::Timestamp => "timestamp",
        }
    }
}

impl TryFrom<u8> for ActivationType {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ActivationType::Slot),
            1 => Ok(ActivationType::Timestamp),
            other => Err(AppError::DecodeError(format!(
                "Unknown activation type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ActivationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vault allocation mode; selects which vault config catalog is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VaultMode {
    /// First come, first served
    Fcfs,
    /// Proportional distribution among depositors
    Prorata,
}

impl VaultMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultMode::Fcfs => "fcfs",
            VaultMode::Prorata => "prorata",
        }
    }
}

impl fmt::Display for VaultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
