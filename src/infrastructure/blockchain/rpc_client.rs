//! Solana RPC client for direct blockchain reading

use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::RpcFilterType;
use solana_sdk::clock::Clock;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::sysvar;

use crate::shared::errors::AppError;

/// Solana RPC client wrapper
pub struct SolanaRpcClient {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl SolanaRpcClient {
    /// Create new RPC client
    pub fn new(rpc_url: String, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url, commitment),
            commitment,
        }
    }

    /// Get accounts owned by a program that pass all `filters`
    pub async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, AppError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .client
            .get_program_accounts_with_config(program_id, config)
            .await
            .map_err(|e| {
                AppError::BlockchainError(format!("Failed to get program accounts: {}", e))
            })?;

        Ok(accounts
            .into_iter()
            .map(|(pubkey, account)| (pubkey, account.data))
            .collect())
    }

    /// Owner program of an account
    pub async fn get_account_owner(&self, address: &Pubkey) -> Result<Pubkey, AppError> {
        let account = self
            .client
            .get_account(address)
            .await
            .map_err(|e| AppError::BlockchainError(format!("Failed to get account: {}", e)))?;

        Ok(account.owner)
    }

    /// Read the clock sysvar
    pub async fn get_clock(&self) -> Result<Clock, AppError> {
        let account = self
            .client
            .get_account(&sysvar::clock::id())
            .await
            .map_err(|e| {
                AppError::BlockchainError(format!("Failed to get clock sysvar: {}", e))
            })?;

        bincode::deserialize::<Clock>(&account.data)
            .map_err(|e| AppError::DecodeError(format!("Failed to decode clock sysvar: {}", e)))
    }
}
