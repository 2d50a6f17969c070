//! Config selection domain - matching pool/vault configs against timing requirements

mod selector;

pub use selector::ConfigSelector;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::shared::errors::SelectionError;
use crate::shared::types::{ActivationType, VaultMode};

/// Dynamic AMM pool config snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfigRecord {
    pub key: Pubkey,
    pub activation_type: ActivationType,
    /// Slots or seconds, depending on `activation_type`
    pub activation_duration: u64,
    /// `Pubkey::default()` when the config has no vault support
    pub vault_config_key: Pubkey,
    /// `Pubkey::default()` for public configs
    pub pool_creator_authority: Pubkey,
}

impl PoolConfigRecord {
    pub fn has_vault_support(&self) -> bool {
        self.vault_config_key != Pubkey::default()
    }
}

/// Alpha Vault config snapshot (FCFS or Prorata)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfigRecord {
    pub key: Pubkey,
    pub activation_type: ActivationType,
    /// Offset from pool activation to vesting start (the lock duration)
    pub start_vesting_duration: u64,
    /// Offset from pool activation to vesting end
    pub end_vesting_duration: u64,
}

impl VaultConfigRecord {
    /// Length of the vesting window. `None` if the record is malformed.
    pub fn vesting_duration(&self) -> Option<u64> {
        self.end_vesting_duration
            .checked_sub(self.start_vesting_duration)
    }
}

/// Caller's constraints on the pool and vault configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirement {
    pub activation_type: ActivationType,
    /// Inclusive lower bound on the pool config's activation duration
    pub maximum_activation_duration: u64,
    pub minimum_lock_duration: u64,
    pub maximum_lock_duration: u64,
    pub minimum_vesting_duration: u64,
    pub maximum_vesting_duration: u64,
    pub vault_mode: VaultMode,
}

impl Default for Requirement {
    fn default() -> Self {
        Self {
            activation_type: ActivationType::Timestamp,
            maximum_activation_duration: 86_400, // 1 day
            minimum_lock_duration: 60 * 30, // 30 minutes
            maximum_lock_duration: 86_400, // 1 day
            minimum_vesting_duration: 60 * 60, // 1 hour
            maximum_vesting_duration: 60 * 60 * 24 * 7, // 1 week
            vault_mode: VaultMode::Prorata,
        }
    }
}

impl Requirement {
    /// Pool-level checks: activation type and activation duration.
    pub fn accepts_pool(&self, pool_config: &PoolConfigRecord) -> bool {
        pool_config.activation_type == self.activation_type
            && pool_config.activation_duration >= self.maximum_activation_duration
    }

    /// Vault-level checks: lock window, vesting window and activation type.
    pub fn accepts_vault(&self, vault_config: &VaultConfigRecord) -> Result<bool, SelectionError> {
        let vesting_duration = vault_config.vesting_duration().ok_or(
            SelectionError::MalformedVaultConfig {
                key: vault_config.key,
                start: vault_config.start_vesting_duration,
                end: vault_config.end_vesting_duration,
            },
        )?;
        let lock_duration = vault_config.start_vesting_duration;

        Ok(lock_duration >= self.minimum_lock_duration
            && lock_duration <= self.maximum_lock_duration
            && vesting_duration >= self.minimum_vesting_duration
            && vesting_duration <= self.maximum_vesting_duration
            && vault_config.activation_type == self.activation_type)
    }

    /// Full predicate over a linked pool/vault pair.
    pub fn admits(
        &self,
        pool_config: &PoolConfigRecord,
        vault_config: &VaultConfigRecord,
    ) -> Result<bool, SelectionError> {
        if !pool_config.has_vault_support()
            || pool_config.vault_config_key != vault_config.key
            || !self.accepts_pool(pool_config)
        {
            return Ok(false);
        }
        self.accepts_vault(vault_config)
    }
}

/// A selected pool config together with its linked vault config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMatch {
    pub pool_config: PoolConfigRecord,
    pub vault_config: VaultConfigRecord,
}
