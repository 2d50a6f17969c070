//! Application layer - use cases and CLI handlers

pub mod commands;
pub mod launcher;

#[cfg(test)]
pub(crate) mod fakes;

pub use commands::{Cli, Commands, CommandExecutor};
pub use launcher::{LaunchReport, PoolLauncher};
