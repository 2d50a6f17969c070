//! Direct blockchain reading for Dynamic AMM and Alpha Vault configs

pub mod account_parser;
pub mod config_catalog;
pub mod config_structures;
pub mod keypair;
pub mod rpc_client;

pub use account_parser::ConfigAccountParser;
pub use config_catalog::RpcLedger;
pub use keypair::load_keypair;
pub use rpc_client::SolanaRpcClient;
