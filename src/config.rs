use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::domain::selection::Requirement;

#[derive(Debug, Clone, Deserialize)]
pub struct RpcCfg {
    pub url: String,
    pub commitment: Option<String>,
}

impl Default for RpcCfg {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletCfg {
    /// Keypair file; `PRIVATE_KEY` is used when absent
    pub keypair: Option<String>,
    /// Pool creator authority to search configs for; defaults to the payer
    pub creator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenCfg {
    pub mint_a: String,
    /// Defaults to wrapped SOL
    pub mint_b: Option<String>,
    #[serde(default = "default_amount_a")]
    pub amount_a: u64,
    #[serde(default = "default_amount_b")]
    pub amount_b: u64,
}

fn default_amount_a() -> u64 {
    1_000_000_000_000_000
}

fn default_amount_b() -> u64 {
    10_000_000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LaunchCfg {
    pub activation_delay_secs: u64,
    pub activation_delay_slots: u64,
}

impl Default for LaunchCfg {
    fn default() -> Self {
        Self {
            activation_delay_secs: 3_600 * 5,
            activation_delay_slots: 45_000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rpc: RpcCfg,
    #[serde(default)]
    pub wallet: WalletCfg,
    pub tokens: Option<TokenCfg>,
    #[serde(default)]
    pub requirement: Requirement,
    #[serde(default)]
    pub launch: LaunchCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse launch config")?;
        Ok(cfg)
    }
}
