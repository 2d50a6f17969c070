//! In-memory ledger shared by the application tests

use async_trait::async_trait;
use solana_sdk::clock::Clock;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::launch::{ClockSource, ConfigCatalog, MintInspector};
use crate::domain::selection::{PoolConfigRecord, VaultConfigRecord};
use crate::shared::errors::AppError;
use crate::shared::types::{ActivationType, VaultMode};

pub const FAKE_SLOT: u64 = 250_000_000;
pub const FAKE_UNIX_TIMESTAMP: i64 = 1_700_000_000;

/// Serves configs, clock and mint owners from memory and records every call
#[derive(Default)]
pub struct FakeLedger {
    pub pool_configs: HashMap<Pubkey, Vec<PoolConfigRecord>>,
    pub fcfs_configs: Vec<VaultConfigRecord>,
    pub prorata_configs: Vec<VaultConfigRecord>,
    /// Mint -> owning program; unknown mints fail the lookup
    pub mint_owners: HashMap<Pubkey, Pubkey>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeLedger {
    /// One public pool config linked to one prorata vault config
    pub fn with_public_match() -> (Self, PoolConfigRecord, VaultConfigRecord) {
        let vault = vault_config();
        let config = pool_config(vault.key, Pubkey::default());
        let mut ledger = FakeLedger {
            prorata_configs: vec![vault.clone()],
            ..FakeLedger::default()
        };
        ledger.pool_configs.insert(Pubkey::default(), vec![config.clone()]);
        (ledger, config, vault)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn pool_config(vault_config_key: Pubkey, authority: Pubkey) -> PoolConfigRecord {
    PoolConfigRecord {
        key: Pubkey::new_unique(),
        activation_type: ActivationType::Timestamp,
        activation_duration: 90_000,
        vault_config_key,
        pool_creator_authority: authority,
    }
}

pub fn vault_config() -> VaultConfigRecord {
    VaultConfigRecord {
        key: Pubkey::new_unique(),
        activation_type: ActivationType::Timestamp,
        start_vesting_duration: 1_800,
        end_vesting_duration: 5_400,
    }
}

#[async_trait]
impl ConfigCatalog for FakeLedger {
    async fn fetch_pool_configs(
        &self,
        scope: &Pubkey,
    ) -> Result<Vec<PoolConfigRecord>, AppError> {
        self.calls.lock().unwrap().push(format!("pools:{}", scope));
        Ok(self.pool_configs.get(scope).cloned().unwrap_or_default())
    }

    async fn fetch_vault_configs(
        &self,
        mode: VaultMode,
    ) -> Result<Vec<VaultConfigRecord>, AppError> {
        self.calls.lock().unwrap().push(format!("vaults:{}", mode));
        Ok(match mode {
            VaultMode::Fcfs => self.fcfs_configs.clone(),
            VaultMode::Prorata => self.prorata_configs.clone(),
        })
    }
}

#[async_trait]
impl ClockSource for FakeLedger {
    async fn current_clock(&self) -> Result<Clock, AppError> {
        self.calls.lock().unwrap().push("clock".to_string());
        Ok(Clock {
            slot: FAKE_SLOT,
            unix_timestamp: FAKE_UNIX_TIMESTAMP,
            ..Clock::default()
        })
    }
}

#[async_trait]
impl MintInspector for FakeLedger {
    async fn mint_owner(&self, mint: &Pubkey) -> Result<Pubkey, AppError> {
        self.calls.lock().unwrap().push(format!("mint:{}", mint));
        self.mint_owners
            .get(mint)
            .copied()
            .ok_or_else(|| AppError::BlockchainError(format!("AccountNotFound: {}", mint)))
    }
}
