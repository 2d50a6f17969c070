//! Pool + vault launch orchestration
//!
//! Every step is awaited before the next one starts: later steps consume the
//! addresses produced by earlier ones.

use chrono::{DateTime, Utc};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::launch::{
    ClockSource, ConfigCatalog, LaunchExecutor, LaunchParams, LaunchPlan,
};
use crate::domain::selection::{ConfigMatch, ConfigSelector, Requirement};
use crate::shared::errors::LaunchError;
use crate::shared::types::DYNAMIC_AMM_PROGRAM_ID;
use crate::shared::utils::describe_activation_point;

/// Outcome of a completed launch
#[derive(Debug, Clone, Serialize)]
pub struct LaunchReport {
    pub plan: LaunchPlan,
    pub pool_signatures: Vec<Signature>,
    pub vault_signature: Signature,
    pub completed_at: DateTime<Utc>,
}

pub struct PoolLauncher {
    catalog: Arc<dyn ConfigCatalog>,
    clock: Arc<dyn ClockSource>,
    amm_program_id: Pubkey,
}

impl PoolLauncher {
    pub fn new(catalog: Arc<dyn ConfigCatalog>, clock: Arc<dyn ClockSource>) -> Self {
        Self {
            catalog,
            clock,
            amm_program_id: DYNAMIC_AMM_PROGRAM_ID,
        }
    }

    /// Find the first pool config usable by `creator` that satisfies `requirement`.
    ///
    /// Public configs are scanned before the creator's own configs.
    pub async fn find_config(
        &self,
        creator: &Pubkey,
        requirement: &Requirement,
    ) -> Result<Option<ConfigMatch>, LaunchError> {
        let public_configs = self.catalog.fetch_pool_configs(&Pubkey::default()).await?;
        let creator_configs = self.catalog.fetch_pool_configs(creator).await?;

        let pool_configs: Vec<_> = public_configs
            .into_iter()
            .chain(creator_configs)
            .filter(|config| config.has_vault_support())
            .collect();
        info!("Got {} usable pool configs with vault support", pool_configs.len());

        let vault_configs = self.catalog.fetch_vault_configs(requirement.vault_mode).await?;

        let selected =
            ConfigSelector::new(requirement.clone()).select(&pool_configs, &vault_configs)?;
        match &selected {
            Some(found) => info!(
                "Selected pool config {} with {} vault config {}",
                found.pool_config.key, requirement.vault_mode, found.vault_config.key
            ),
            None => warn!("No pool config matches the requirement"),
        }
        Ok(selected)
    }

    /// Select a config and compute everything needed to create the pool and vault.
    pub async fn plan(&self, params: &LaunchParams) -> Result<LaunchPlan, LaunchError> {
        let selected = self
            .find_config(&params.creator, &params.requirement)
            .await?
            .ok_or(LaunchError::NoMatchingConfig)?;

        let clock = self.clock.current_clock().await?;
        let plan = LaunchPlan::new(params, selected, &clock, &self.amm_program_id)?;

        info!(
            "Pool {} activates at {}",
            plan.pool_address,
            describe_activation_point(plan.activation_type, plan.activation_point)
        );
        Ok(plan)
    }

    /// Plan, then create the pool, then create the vault.
    pub async fn launch(
        &self,
        params: &LaunchParams,
        executor: &dyn LaunchExecutor,
    ) -> Result<LaunchReport, LaunchError> {
        let plan = self.plan(params).await?;

        info!("Creating pool");
        let pool_signatures = executor
            .create_pool(&plan)
            .await
            .map_err(|e| LaunchError::PoolCreationFailed(e.to_string()))?;
        for signature in &pool_signatures {
            info!("Pool transaction confirmed: {}", signature);
        }
        info!("Pool created {}", plan.pool_address);

        info!("Creating vault");
        let vault_signature = executor
            .create_vault(&plan)
            .await
            .map_err(|e| LaunchError::VaultCreationFailed(e.to_string()))?;
        info!("Vault transaction confirmed: {}", vault_signature);

        Ok(LaunchReport {
            plan,
            pool_signatures,
            vault_signature,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{pool_config, vault_config, FakeLedger, FAKE_UNIX_TIMESTAMP};
    use crate::domain::launch::ActivationDelay;
    use crate::shared::errors::AppError;
    use crate::shared::types::{ActivationType, VaultMode};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingExecutor {
        fail_pool: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LaunchExecutor for RecordingExecutor {
        async fn create_pool(&self, plan: &LaunchPlan) -> Result<Vec<Signature>, AppError> {
            self.calls.lock().unwrap().push(format!("pool:{}", plan.pool_config.key));
            if self.fail_pool {
                return Err(AppError::ExecutionError("blockhash expired".to_string()));
            }
            Ok(vec![Signature::new_unique(), Signature::new_unique()])
        }

        async fn create_vault(&self, plan: &LaunchPlan) -> Result<Signature, AppError> {
            self.calls.lock().unwrap().push(format!("vault:{}", plan.vault_config.key));
            Ok(Signature::new_unique())
        }
    }

    fn params(creator: Pubkey) -> LaunchParams {
        LaunchParams {
            creator,
            mint_a: Pubkey::new_unique(),
            mint_b: Pubkey::new_unique(),
            token_a_amount: 1_000_000_000_000_000,
            token_b_amount: 10_000_000,
            requirement: Requirement::default(),
            activation_delay: ActivationDelay::default(),
        }
    }

    fn launcher(ledger: FakeLedger) -> (PoolLauncher, Arc<FakeLedger>) {
        let ledger = Arc::new(ledger);
        (PoolLauncher::new(ledger.clone(), ledger.clone()), ledger)
    }

    #[tokio::test]
    async fn test_public_configs_are_preferred_over_creator_configs() {
        let creator = Pubkey::new_unique();
        let vault = vault_config();
        let public = pool_config(vault.key, Pubkey::default());
        let private = pool_config(vault.key, creator);

        let mut ledger = FakeLedger {
            prorata_configs: vec![vault],
            ..FakeLedger::default()
        };
        ledger.pool_configs.insert(Pubkey::default(), vec![public.clone()]);
        ledger.pool_configs.insert(creator, vec![private]);
        let (launcher, ledger) = launcher(ledger);

        let selected = launcher
            .find_config(&creator, &Requirement::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(selected.pool_config.key, public.key);

        assert_eq!(
            ledger.calls(),
            vec![
                format!("pools:{}", Pubkey::default()),
                format!("pools:{}", creator),
                "vaults:prorata".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_vault_mode_selects_catalog() {
        let creator = Pubkey::new_unique();
        let vault = vault_config();
        let mut ledger = FakeLedger {
            fcfs_configs: vec![vault.clone()],
            ..FakeLedger::default()
        };
        ledger.pool_configs.insert(creator, vec![pool_config(vault.key, creator)]);
        let (launcher, _) = launcher(ledger);

        let prorata = launcher.find_config(&creator, &Requirement::default()).await.unwrap();
        assert!(prorata.is_none());

        let fcfs_requirement = Requirement {
            vault_mode: VaultMode::Fcfs,
            ..Requirement::default()
        };
        let fcfs = launcher.find_config(&creator, &fcfs_requirement).await.unwrap();
        assert_eq!(fcfs.unwrap().vault_config.key, vault.key);
    }

    #[tokio::test]
    async fn test_plan_computes_activation_and_pool_address() {
        let (ledger, config, vault) = FakeLedger::with_public_match();
        let (launcher, _) = launcher(ledger);

        let params = params(Pubkey::new_unique());
        let plan = launcher.plan(&params).await.unwrap();

        assert_eq!(plan.pool_config, config);
        assert_eq!(plan.vault_config, vault);
        assert_eq!(plan.activation_type, ActivationType::Timestamp);
        assert_eq!(plan.activation_point, FAKE_UNIX_TIMESTAMP as u64 + 18_000);
        assert_eq!(
            plan.pool_address,
            crate::domain::launch::derive_pool_address(
                &params.mint_a,
                &params.mint_b,
                &config.key,
                &DYNAMIC_AMM_PROGRAM_ID
            )
        );
    }

    #[tokio::test]
    async fn test_no_match_aborts_before_reading_clock() {
        let (launcher, ledger) = launcher(FakeLedger::default());
        let executor = RecordingExecutor::default();

        let result = launcher.launch(&params(Pubkey::new_unique()), &executor).await;
        assert!(matches!(result, Err(LaunchError::NoMatchingConfig)));
        assert!(!ledger.calls().contains(&"clock".to_string()));
        assert!(executor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_launch_creates_pool_then_vault() {
        let (ledger, config, vault) = FakeLedger::with_public_match();
        let (launcher, _) = launcher(ledger);
        let executor = RecordingExecutor::default();

        let report = launcher
            .launch(&params(Pubkey::new_unique()), &executor)
            .await
            .unwrap();

        assert_eq!(report.pool_signatures.len(), 2);
        assert_eq!(
            *executor.calls.lock().unwrap(),
            vec![format!("pool:{}", config.key), format!("vault:{}", vault.key)]
        );
    }

    #[tokio::test]
    async fn test_failed_pool_creation_skips_vault() {
        let (ledger, _, _) = FakeLedger::with_public_match();
        let (launcher, _) = launcher(ledger);
        let executor = RecordingExecutor {
            fail_pool: true,
            ..RecordingExecutor::default()
        };

        let result = launcher.launch(&params(Pubkey::new_unique()), &executor).await;
        assert!(matches!(result, Err(LaunchError::PoolCreationFailed(_))));
        assert_eq!(executor.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_vault_config_surfaces_as_error() {
        let (mut ledger, _, _) = FakeLedger::with_public_match();
        ledger.prorata_configs[0].end_vesting_duration = 0;
        let (launcher, _) = launcher(ledger);

        let result = launcher
            .find_config(&Pubkey::new_unique(), &Requirement::default())
            .await;
        assert!(matches!(result, Err(LaunchError::Selection(_))));
    }
}
