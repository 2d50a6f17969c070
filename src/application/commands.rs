//! CLI commands and handlers
use clap::{Args, Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use tracing::{info, warn};

use crate::application::launcher::PoolLauncher;
use crate::domain::launch::{ActivationDelay, LaunchParams, LaunchPlan, MintInspector};
use crate::domain::selection::{ConfigMatch, Requirement};
use crate::shared::errors::{AppError, LaunchError};
use crate::shared::types::{
    ActivationType, VaultMode, NATIVE_MINT, SPL_TOKEN_2022_PROGRAM_ID, SPL_TOKEN_PROGRAM_ID,
};
use crate::shared::utils::{format_amount, format_duration};

#[derive(Parser, Debug)]
#[command(name = "alpha-launch")]
#[command(version, about = "Dynamic AMM pool + permissionless Alpha Vault launcher")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// RPC endpoint URL (overrides config)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Path to payer keypair file; `PRIVATE_KEY` is read when absent
    #[arg(long, global = true)]
    pub keypair: Option<String>,

    /// Pool creator authority to search configs for (defaults to the payer)
    #[arg(long, global = true)]
    pub creator: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the first pool config with vault support matching the requirement
    Select {
        #[command(flatten)]
        requirement: RequirementArgs,
    },

    /// Select a config and print the pool/vault launch plan
    Plan {
        #[command(flatten)]
        requirement: RequirementArgs,

        /// Base token mint (overrides config)
        #[arg(long)]
        mint_a: Option<String>,

        /// Quote token mint (overrides config, defaults to wrapped SOL)
        #[arg(long)]
        mint_b: Option<String>,

        /// Base token amount in raw units
        #[arg(long)]
        amount_a: Option<u64>,

        /// Quote token amount in raw units
        #[arg(long)]
        amount_b: Option<u64>,

        /// Seconds between now and activation for timestamp configs
        #[arg(long)]
        activation_delay_secs: Option<u64>,

        /// Slots between now and activation for slot configs
        #[arg(long)]
        activation_delay_slots: Option<u64>,
    },
}

/// Requirement overrides; unset flags keep the config file values
#[derive(Args, Debug, Clone, Default)]
pub struct RequirementArgs {
    #[arg(long, value_enum)]
    pub activation_type: Option<ActivationType>,

    /// Pool config activation duration must be at least this long
    #[arg(long)]
    pub max_activation_duration: Option<u64>,

    #[arg(long)]
    pub min_lock_duration: Option<u64>,

    #[arg(long)]
    pub max_lock_duration: Option<u64>,

    #[arg(long)]
    pub min_vesting_duration: Option<u64>,

    #[arg(long)]
    pub max_vesting_duration: Option<u64>,

    #[arg(long, value_enum)]
    pub vault_mode: Option<VaultMode>,
}

impl RequirementArgs {
    pub fn apply(&self, base: Requirement) -> Requirement {
        Requirement {
            activation_type: self.activation_type.unwrap_or(base.activation_type),
            maximum_activation_duration: self
                .max_activation_duration
                .unwrap_or(base.maximum_activation_duration),
            minimum_lock_duration: self.min_lock_duration.unwrap_or(base.minimum_lock_duration),
            maximum_lock_duration: self.max_lock_duration.unwrap_or(base.maximum_lock_duration),
            minimum_vesting_duration: self
                .min_vesting_duration
                .unwrap_or(base.minimum_vesting_duration),
            maximum_vesting_duration: self
                .max_vesting_duration
                .unwrap_or(base.maximum_vesting_duration),
            vault_mode: self.vault_mode.unwrap_or(base.vault_mode),
        }
    }
}

/// Inputs for the `plan` command after merging CLI and config file
#[derive(Debug, Clone)]
pub struct PlanInputs {
    pub mint_a: Option<String>,
    pub mint_b: Option<String>,
    pub amount_a: u64,
    pub amount_b: u64,
    pub activation_delay: ActivationDelay,
}

pub fn parse_pubkey(label: &str, value: &str) -> Result<Pubkey, AppError> {
    Pubkey::from_str(value)
        .map_err(|e| AppError::ConfigError(format!("Invalid {} {}: {}", label, value, e)))
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute select command
    pub async fn execute_select(
        launcher: &PoolLauncher,
        creator: &Pubkey,
        requirement: &Requirement,
    ) -> Result<ConfigMatch, LaunchError> {
        log_requirement(requirement);

        let selected = launcher
            .find_config(creator, requirement)
            .await?
            .ok_or(LaunchError::NoMatchingConfig)?;

        let json = serde_json::to_string_pretty(&selected)
            .map_err(|e| AppError::ExecutionError(format!("Failed to render config: {}", e)))?;
        println!("{}", json);
        Ok(selected)
    }

    /// Execute plan command
    pub async fn execute_plan(
        launcher: &PoolLauncher,
        mints: &dyn MintInspector,
        creator: Pubkey,
        requirement: Requirement,
        inputs: PlanInputs,
    ) -> Result<LaunchPlan, LaunchError> {
        log_requirement(&requirement);

        let mint_a = inputs
            .mint_a
            .as_deref()
            .ok_or_else(|| AppError::ConfigError("--mint-a is required for plan".to_string()))?;
        let mint_a = parse_pubkey("mint_a", mint_a)?;
        let mint_b = match inputs.mint_b.as_deref() {
            Some(mint) => parse_pubkey("mint_b", mint)?,
            None => NATIVE_MINT,
        };

        for mint in [&mint_a, &mint_b] {
            match mints.mint_owner(mint).await {
                Ok(owner) => info!(
                    "Token program for {}: {} ({})",
                    mint,
                    owner,
                    token_program_label(&owner)
                ),
                Err(e) => warn!("Could not read mint {}: {}", mint, e),
            }
        }

        let params = LaunchParams {
            creator,
            mint_a,
            mint_b,
            token_a_amount: inputs.amount_a,
            token_b_amount: inputs.amount_b,
            requirement,
            activation_delay: inputs.activation_delay,
        };
        info!(
            "Seeding pool with {} of {} and {} of {}",
            inputs.amount_a, mint_a, inputs.amount_b, mint_b
        );
        if mint_b == NATIVE_MINT {
            info!("Quote side: {} SOL", format_amount(inputs.amount_b, 9));
        }

        let plan = launcher.plan(&params).await?;
        let json = serde_json::to_string_pretty(&plan)
            .map_err(|e| AppError::ExecutionError(format!("Failed to render plan: {}", e)))?;
        println!("{}", json);
        Ok(plan)
    }
}

fn log_requirement(requirement: &Requirement) {
    let (lock, vesting) = match requirement.activation_type {
        ActivationType::Timestamp => (
            format!(
                "{} - {}",
                format_duration(requirement.minimum_lock_duration),
                format_duration(requirement.maximum_lock_duration)
            ),
            format!(
                "{} - {}",
                format_duration(requirement.minimum_vesting_duration),
                format_duration(requirement.maximum_vesting_duration)
            ),
        ),
        ActivationType::Slot => (
            format!(
                "{} - {} slots",
                requirement.minimum_lock_duration, requirement.maximum_lock_duration
            ),
            format!(
                "{} - {} slots",
                requirement.minimum_vesting_duration, requirement.maximum_vesting_duration
            ),
        ),
    };
    info!(
        "Requirement: {} activation >= {}, lock {}, vesting {}, {} vault",
        requirement.activation_type,
        requirement.maximum_activation_duration,
        lock,
        vesting,
        requirement.vault_mode
    );
}

fn token_program_label(owner: &Pubkey) -> &'static str {
    if *owner == SPL_TOKEN_PROGRAM_ID {
        "spl-token"
    } else if *owner == SPL_TOKEN_2022_PROGRAM_ID {
        "token-2022"
    } else {
        "not a token program"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{FakeLedger, FAKE_UNIX_TIMESTAMP};
    use std::sync::Arc;

    fn launcher(ledger: FakeLedger) -> (PoolLauncher, Arc<FakeLedger>) {
        let ledger = Arc::new(ledger);
        (PoolLauncher::new(ledger.clone(), ledger.clone()), ledger)
    }

    fn plan_inputs(mint_a: Option<String>, mint_b: Option<String>) -> PlanInputs {
        PlanInputs {
            mint_a,
            mint_b,
            amount_a: 5_000,
            amount_b: 42,
            activation_delay: ActivationDelay::default(),
        }
    }

    #[test]
    fn test_requirement_args_override_only_set_fields() {
        let args = RequirementArgs {
            vault_mode: Some(VaultMode::Fcfs),
            min_lock_duration: Some(0),
            ..RequirementArgs::default()
        };
        let merged = args.apply(Requirement::default());

        assert_eq!(merged.vault_mode, VaultMode::Fcfs);
        assert_eq!(merged.minimum_lock_duration, 0);
        assert_eq!(merged.maximum_lock_duration, Requirement::default().maximum_lock_duration);
        assert_eq!(merged.activation_type, ActivationType::Timestamp);
    }

    #[test]
    fn test_cli_parses_plan_command() {
        let cli = Cli::try_parse_from([
            "alpha-launch",
            "plan",
            "--mint-a",
            "Aw1d4RWJt6jzDPj622GHqsxGZ2PckL7kwv88VDDEwivL",
            "--vault-mode",
            "prorata",
            "--activation-type",
            "slot",
            "--rpc-url",
            "http://localhost:8899",
        ])
        .unwrap();

        assert_eq!(cli.rpc_url.as_deref(), Some("http://localhost:8899"));
        match cli.command {
            Commands::Plan { requirement, mint_a, .. } => {
                assert_eq!(requirement.vault_mode, Some(VaultMode::Prorata));
                assert_eq!(requirement.activation_type, Some(ActivationType::Slot));
                assert!(mint_a.is_some());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_pubkey_reports_label() {
        let err = parse_pubkey("mint_a", "not-a-key").unwrap_err();
        assert!(err.to_string().contains("mint_a"));
    }

    #[test]
    fn test_token_program_label() {
        assert_eq!(token_program_label(&SPL_TOKEN_PROGRAM_ID), "spl-token");
        assert_eq!(token_program_label(&Pubkey::new_unique()), "not a token program");
    }

    #[tokio::test]
    async fn test_execute_select_returns_first_match() {
        let (ledger, config, vault) = FakeLedger::with_public_match();
        let (launcher, _) = launcher(ledger);

        let selected = CommandExecutor::execute_select(
            &launcher,
            &Pubkey::new_unique(),
            &Requirement::default(),
        )
        .await
        .unwrap();

        assert_eq!(selected.pool_config, config);
        assert_eq!(selected.vault_config, vault);
    }

    #[tokio::test]
    async fn test_execute_select_without_match_is_an_error() {
        let (ledger, _, _) = FakeLedger::with_public_match();
        let (launcher, _) = launcher(ledger);
        let requirement = Requirement {
            vault_mode: VaultMode::Fcfs,
            ..Requirement::default()
        };

        let result =
            CommandExecutor::execute_select(&launcher, &Pubkey::new_unique(), &requirement).await;
        assert!(matches!(result, Err(LaunchError::NoMatchingConfig)));
    }

    #[tokio::test]
    async fn test_execute_plan_defaults_quote_mint_to_wrapped_sol() {
        let mint_a = Pubkey::new_unique();
        let (mut ledger, config, _) = FakeLedger::with_public_match();
        ledger.mint_owners.insert(mint_a, SPL_TOKEN_2022_PROGRAM_ID);
        ledger.mint_owners.insert(NATIVE_MINT, SPL_TOKEN_PROGRAM_ID);
        let (launcher, ledger) = launcher(ledger);

        let plan = CommandExecutor::execute_plan(
            &launcher,
            ledger.as_ref(),
            Pubkey::new_unique(),
            Requirement::default(),
            plan_inputs(Some(mint_a.to_string()), None),
        )
        .await
        .unwrap();

        assert_eq!(plan.mint_a, mint_a);
        assert_eq!(plan.mint_b, NATIVE_MINT);
        assert_eq!(plan.pool_config, config);
        assert_eq!(plan.token_a_amount, 5_000);
        assert_eq!(plan.token_b_amount, 42);
        assert_eq!(plan.activation_point, FAKE_UNIX_TIMESTAMP as u64 + 18_000);

        let calls = ledger.calls();
        assert_eq!(calls[0], format!("mint:{}", mint_a));
        assert_eq!(calls[1], format!("mint:{}", NATIVE_MINT));
    }

    #[tokio::test]
    async fn test_execute_plan_tolerates_unreadable_mints() {
        let (ledger, _, _) = FakeLedger::with_public_match();
        let (launcher, ledger) = launcher(ledger);
        let mint_b = Pubkey::new_unique();

        let plan = CommandExecutor::execute_plan(
            &launcher,
            ledger.as_ref(),
            Pubkey::new_unique(),
            Requirement::default(),
            plan_inputs(Some(Pubkey::new_unique().to_string()), Some(mint_b.to_string())),
        )
        .await
        .unwrap();

        assert_eq!(plan.mint_b, mint_b);
        assert!(ledger.calls().contains(&"clock".to_string()));
    }

    #[tokio::test]
    async fn test_execute_plan_requires_base_mint() {
        let (ledger, _, _) = FakeLedger::with_public_match();
        let (launcher, ledger) = launcher(ledger);

        let result = CommandExecutor::execute_plan(
            &launcher,
            ledger.as_ref(),
            Pubkey::new_unique(),
            Requirement::default(),
            plan_inputs(None, None),
        )
        .await;

        assert!(matches!(result, Err(LaunchError::App(AppError::ConfigError(_)))));
        assert!(ledger.calls().is_empty());
    }
}
