//! Account parsers for pool and vault config accounts

use solana_sdk::pubkey::Pubkey;

use super::config_structures::{DynamicAmmConfig, FcfsConfig, ProrataConfig};
use crate::domain::selection::{PoolConfigRecord, VaultConfigRecord};
use crate::shared::errors::AppError;
use crate::shared::types::{ActivationType, VaultMode};

/// Turns raw config accounts into selection records
pub struct ConfigAccountParser;

impl ConfigAccountParser {
    /// Parse a Dynamic AMM `Config` account
    pub fn parse_pool_config(key: Pubkey, data: &[u8]) -> Result<PoolConfigRecord, AppError> {
        let config = DynamicAmmConfig::try_deserialize(data).map_err(|e| {
            AppError::DecodeError(format!("Failed to deserialize pool config {}: {}", key, e))
        })?;

        Ok(PoolConfigRecord {
            key,
            activation_type: ActivationType::try_from(config.activation_type)?,
            activation_duration: config.activation_duration,
            vault_config_key: Pubkey::new_from_array(config.vault_config_key),
            pool_creator_authority: Pubkey::new_from_array(config.pool_creator_authority),
        })
    }

    /// Parse an Alpha Vault config account of the given mode
    pub fn parse_vault_config(
        mode: VaultMode,
        key: Pubkey,
        data: &[u8],
    ) -> Result<VaultConfigRecord, AppError> {
        let decode_err = |e: borsh::maybestd::io::Error| {
            AppError::DecodeError(format!(
                "Failed to deserialize {} vault config {}: {}",
                mode, key, e
            ))
        };

        let (activation_type, start_vesting_duration, end_vesting_duration) = match mode {
            VaultMode::Fcfs => {
                let config = FcfsConfig::try_deserialize(data).map_err(decode_err)?;
                (config.activation_type, config.start_vesting_duration, config.end_vesting_duration)
            }
            VaultMode::Prorata => {
                let config = ProrataConfig::try_deserialize(data).map_err(decode_err)?;
                (config.activation_type, config.start_vesting_duration, config.end_vesting_duration)
            }
        };

        Ok(VaultConfigRecord {
            key,
            activation_type: ActivationType::try_from(activation_type)?,
            start_vesting_duration,
            end_vesting_duration,
        })
    }
}
