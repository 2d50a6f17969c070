// src/app.rs
use anyhow::Result;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::application::commands::{parse_pubkey, Cli, CommandExecutor, Commands, PlanInputs};
use crate::application::launcher::PoolLauncher;
use crate::config::{Config, LaunchCfg, TokenCfg};
use crate::domain::launch::ActivationDelay;
use crate::domain::selection::Requirement;
use crate::infrastructure::blockchain::{load_keypair, RpcLedger, SolanaRpcClient};
use crate::shared::errors::AppError;

/// Effective settings: CLI args > config file > defaults
#[derive(Debug, Clone)]
pub struct AppCfg {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub keypair_path: Option<String>,
    pub creator: Option<String>,
    pub requirement: Requirement,
    pub tokens: Option<TokenCfg>,
    pub launch: LaunchCfg,
}

impl AppCfg {
    pub fn from_config(cfg: Config, cli: &Cli) -> Result<Self> {
        let commitment = match cfg.rpc.commitment.as_deref() {
            Some(level) => CommitmentConfig::from_str(level).map_err(|e| {
                AppError::ConfigError(format!("Invalid commitment {}: {}", level, e))
            })?,
            None => CommitmentConfig::confirmed(),
        };

        Ok(Self {
            rpc_url: cli.rpc_url.clone().unwrap_or(cfg.rpc.url),
            commitment,
            keypair_path: cli.keypair.clone().or(cfg.wallet.keypair),
            creator: cli.creator.clone().or(cfg.wallet.creator),
            requirement: cfg.requirement,
            tokens: cfg.tokens,
            launch: cfg.launch,
        })
    }

    /// Creator authority to search configs for; loads the payer when not given.
    pub fn resolve_creator(&self) -> Result<Pubkey, AppError> {
        if let Some(creator) = &self.creator {
            return parse_pubkey("creator", creator);
        }
        let payer = load_keypair(self.keypair_path.as_deref())?;
        info!("Loaded keypair: {}", payer.pubkey());
        Ok(payer.pubkey())
    }

    fn plan_inputs(
        &self,
        mint_a: Option<String>,
        mint_b: Option<String>,
        amount_a: Option<u64>,
        amount_b: Option<u64>,
        activation_delay_secs: Option<u64>,
        activation_delay_slots: Option<u64>,
    ) -> PlanInputs {
        let tokens = self.tokens.as_ref();
        PlanInputs {
            mint_a: mint_a.or_else(|| tokens.map(|t| t.mint_a.clone())),
            mint_b: mint_b.or_else(|| tokens.and_then(|t| t.mint_b.clone())),
            amount_a: amount_a
                .or_else(|| tokens.map(|t| t.amount_a))
                .unwrap_or(1_000_000_000_000_000),
            amount_b: amount_b
                .or_else(|| tokens.map(|t| t.amount_b))
                .unwrap_or(10_000_000),
            activation_delay: ActivationDelay {
                seconds: activation_delay_secs.unwrap_or(self.launch.activation_delay_secs),
                slots: activation_delay_slots.unwrap_or(self.launch.activation_delay_slots),
            },
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let base_config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let app_cfg = AppCfg::from_config(base_config, &cli)?;
    info!("Using RPC endpoint {}", app_cfg.rpc_url);

    // Fails before any network call when no creator or credential is available
    let creator = app_cfg.resolve_creator()?;

    let rpc = Arc::new(SolanaRpcClient::new(app_cfg.rpc_url.clone(), app_cfg.commitment));
    let ledger = Arc::new(RpcLedger::new(rpc));
    let launcher = PoolLauncher::new(ledger.clone(), ledger.clone());

    match cli.command {
        Commands::Select { requirement } => {
            let requirement = requirement.apply(app_cfg.requirement.clone());
            CommandExecutor::execute_select(&launcher, &creator, &requirement).await?;
        }
        Commands::Plan {
            requirement,
            mint_a,
            mint_b,
            amount_a,
            amount_b,
            activation_delay_secs,
            activation_delay_slots,
        } => {
            let requirement = requirement.apply(app_cfg.requirement.clone());
            let inputs = app_cfg.plan_inputs(
                mint_a,
                mint_b,
                amount_a,
                amount_b,
                activation_delay_secs,
                activation_delay_slots,
            );
            CommandExecutor::execute_plan(
                &launcher,
                ledger.as_ref(),
                creator,
                requirement,
                inputs,
            )
            .await?;
        }
    }

    info!("Done");
    Ok(())
}
