//! Launch domain - pool + vault launch planning and the services it depends on

mod planning;

pub use planning::{activation_point, derive_pool_address};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use solana_sdk::{clock::Clock, pubkey::Pubkey, signature::Signature};

use crate::domain::selection::{ConfigMatch, PoolConfigRecord, Requirement, VaultConfigRecord};
use crate::shared::errors::{AppError, LaunchError};
use crate::shared::types::{ActivationType, VaultMode};

/// Source of on-chain pool and vault configs
#[async_trait]
pub trait ConfigCatalog: Send + Sync {
    /// Pool configs usable by `scope`; `Pubkey::default()` is the public scope
    async fn fetch_pool_configs(
        &self,
        scope: &Pubkey,
    ) -> Result<Vec<PoolConfigRecord>, AppError>;

    /// Vault configs for the given allocation mode
    async fn fetch_vault_configs(
        &self,
        mode: VaultMode,
    ) -> Result<Vec<VaultConfigRecord>, AppError>;
}

/// Source of the current cluster clock
#[async_trait]
pub trait ClockSource: Send + Sync {
    async fn current_clock(&self) -> Result<Clock, AppError>;
}

/// Reads mint accounts to report which token program owns them
#[async_trait]
pub trait MintInspector: Send + Sync {
    async fn mint_owner(&self, mint: &Pubkey) -> Result<Pubkey, AppError>;
}

/// Builds and submits the pool and vault creation transactions for a plan.
#[async_trait]
pub trait LaunchExecutor: Send + Sync {
    /// Create the pool; may take several transactions
    async fn create_pool(&self, plan: &LaunchPlan) -> Result<Vec<Signature>, AppError>;

    /// Create the permissionless vault attached to `plan.pool_address`
    async fn create_vault(&self, plan: &LaunchPlan) -> Result<Signature, AppError>;
}

/// Delay between pool creation and activation, per activation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationDelay {
    pub seconds: u64,
    pub slots: u64,
}

impl Default for ActivationDelay {
    fn default() -> Self {
        // 5 hours; 400ms slots
        Self {
            seconds: 3_600 * 5,
            slots: 45_000,
        }
    }
}

impl ActivationDelay {
    pub fn for_type(&self, activation_type: ActivationType) -> u64 {
        match activation_type {
            ActivationType::Slot => self.slots,
            ActivationType::Timestamp => self.seconds,
        }
    }
}

/// Caller inputs for a launch
#[derive(Debug, Clone)]
pub struct LaunchParams {
    pub creator: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    pub requirement: Requirement,
    pub activation_delay: ActivationDelay,
}

/// Everything the pool and vault creation requests need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPlan {
    pub creator: Pubkey,
    pub pool_config: PoolConfigRecord,
    pub vault_config: VaultConfigRecord,
    pub vault_mode: VaultMode,
    pub activation_type: ActivationType,
    pub activation_point: u64,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    pub pool_address: Pubkey,
}

impl LaunchPlan {
    pub fn new(
        params: &LaunchParams,
        selected: ConfigMatch,
        clock: &Clock,
        program_id: &Pubkey,
    ) -> Result<Self, LaunchError> {
        let activation_type = selected.pool_config.activation_type;
        let activation_point = activation_point(
            activation_type,
            clock,
            params.activation_delay.for_type(activation_type),
        )?;
        let pool_address = derive_pool_address(
            &params.mint_a,
            &params.mint_b,
            &selected.pool_config.key,
            program_id,
        );

        Ok(Self {
            creator: params.creator,
            pool_config: selected.pool_config,
            vault_config: selected.vault_config,
            vault_mode: params.requirement.vault_mode,
            activation_type,
            activation_point,
            mint_a: params.mint_a,
            mint_b: params.mint_b,
            token_a_amount: params.token_a_amount,
            token_b_amount: params.token_b_amount,
            pool_address,
        })
    }
}
