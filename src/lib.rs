//! Alpha Launch - Dynamic AMM pool + permissionless Alpha Vault launcher
//! Built with Domain-Driven Design principles

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::PoolLauncher;
pub use domain::selection::{
    ConfigMatch, ConfigSelector, PoolConfigRecord, Requirement, VaultConfigRecord,
};
pub use infrastructure::blockchain::RpcLedger;
