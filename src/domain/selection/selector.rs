//! First-match config selection

use tracing::debug;

use super::{ConfigMatch, PoolConfigRecord, Requirement, VaultConfigRecord};
use crate::shared::errors::SelectionError;

/// Picks the first pool config (in input order) whose linked vault config
/// satisfies the requirement.
#[derive(Debug, Clone)]
pub struct ConfigSelector {
    requirement: Requirement,
}

impl ConfigSelector {
    pub fn new(requirement: Requirement) -> Self {
        Self { requirement }
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Scan `pool_configs` in order and return the first match.
    ///
    /// Pool configs without vault support are ignored, and so are pool configs
    /// whose vault config is not in `vault_configs`. A linked vault config whose
    /// vesting end precedes its start aborts the scan with
    /// [`SelectionError::MalformedVaultConfig`].
    pub fn select(
        &self,
        pool_configs: &[PoolConfigRecord],
        vault_configs: &[VaultConfigRecord],
    ) -> Result<Option<ConfigMatch>, SelectionError> {
        let candidates = pool_configs
            .iter()
            .filter(|config| config.has_vault_support());

        for pool_config in candidates {
            if !self.requirement.accepts_pool(pool_config) {
                continue;
            }

            let Some(vault_config) = vault_configs
                .iter()
                .find(|vault| vault.key == pool_config.vault_config_key)
            else {
                debug!(
                    "Vault config {} for pool config {} not found, skipping",
                    pool_config.vault_config_key, pool_config.key
                );
                continue;
            };

            if self.requirement.accepts_vault(vault_config)? {
                return Ok(Some(ConfigMatch {
                    pool_config: pool_config.clone(),
                    vault_config: vault_config.clone(),
                }));
            }
        }

        Ok(None)
    }
}
