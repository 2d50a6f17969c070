//! RPC-backed config catalog and clock

use async_trait::async_trait;
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::clock::Clock;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::{debug, info};

use super::account_parser::ConfigAccountParser;
use super::config_structures::{
    account_discriminator, DynamicAmmConfig, FcfsConfig, ProrataConfig,
    POOL_CREATOR_AUTHORITY_OFFSET,
};
use super::rpc_client::SolanaRpcClient;
use crate::domain::launch::{ClockSource, ConfigCatalog, MintInspector};
use crate::domain::selection::{PoolConfigRecord, VaultConfigRecord};
use crate::shared::errors::AppError;
use crate::shared::types::{VaultMode, ALPHA_VAULT_PROGRAM_ID, DYNAMIC_AMM_PROGRAM_ID};

/// Reads config accounts and the clock straight from the cluster
pub struct RpcLedger {
    rpc: Arc<SolanaRpcClient>,
    amm_program_id: Pubkey,
    vault_program_id: Pubkey,
}

impl RpcLedger {
    pub fn new(rpc: Arc<SolanaRpcClient>) -> Self {
        Self::with_programs(rpc, DYNAMIC_AMM_PROGRAM_ID, ALPHA_VAULT_PROGRAM_ID)
    }

    pub fn with_programs(
        rpc: Arc<SolanaRpcClient>,
        amm_program_id: Pubkey,
        vault_program_id: Pubkey,
    ) -> Self {
        Self {
            rpc,
            amm_program_id,
            vault_program_id,
        }
    }
}

/// getProgramAccounts filters for pool configs owned by `scope`
pub fn pool_config_filters(scope: &Pubkey) -> Vec<RpcFilterType> {
    vec![
        RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            0,
            &account_discriminator(DynamicAmmConfig::ACCOUNT_NAME),
        )),
        RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            POOL_CREATOR_AUTHORITY_OFFSET,
            scope.as_ref(),
        )),
    ]
}

/// getProgramAccounts filters for vault configs of `mode`
pub fn vault_config_filters(mode: VaultMode) -> Vec<RpcFilterType> {
    let account_name = match mode {
        VaultMode::Fcfs => FcfsConfig::ACCOUNT_NAME,
        VaultMode::Prorata => ProrataConfig::ACCOUNT_NAME,
    };
    vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
        0,
        &account_discriminator(account_name),
    ))]
}

#[async_trait]
impl ConfigCatalog for RpcLedger {
    async fn fetch_pool_configs(
        &self,
        scope: &Pubkey,
    ) -> Result<Vec<PoolConfigRecord>, AppError> {
        let accounts = self
            .rpc
            .get_program_accounts(&self.amm_program_id, pool_config_filters(scope))
            .await?;
        debug!("Fetched {} pool config accounts for scope {}", accounts.len(), scope);

        accounts
            .into_iter()
            .map(|(key, data)| ConfigAccountParser::parse_pool_config(key, &data))
            .collect()
    }

    async fn fetch_vault_configs(
        &self,
        mode: VaultMode,
    ) -> Result<Vec<VaultConfigRecord>, AppError> {
        let accounts = self
            .rpc
            .get_program_accounts(&self.vault_program_id, vault_config_filters(mode))
            .await?;
        info!("Fetched {} {} vault configs", accounts.len(), mode);

        accounts
            .into_iter()
            .map(|(key, data)| ConfigAccountParser::parse_vault_config(mode, key, &data))
            .collect()
    }
}

#[async_trait]
impl ClockSource for RpcLedger {
    async fn current_clock(&self) -> Result<Clock, AppError> {
        self.rpc.get_clock().await
    }
}

#[async_trait]
impl MintInspector for RpcLedger {
    async fn mint_owner(&self, mint: &Pubkey) -> Result<Pubkey, AppError> {
        self.rpc.get_account_owner(mint).await
    }
}
