//! Activation point and pool address derivation

use solana_sdk::{clock::Clock, pubkey::Pubkey};

use crate::shared::errors::LaunchError;
use crate::shared::types::ActivationType;

/// Activation point `delay` units after the current clock.
pub fn activation_point(
    activation_type: ActivationType,
    clock: &Clock,
    delay: u64,
) -> Result<u64, LaunchError> {
    let now = match activation_type {
        ActivationType::Slot => clock.slot,
        ActivationType::Timestamp => u64::try_from(clock.unix_timestamp).map_err(|_| {
            LaunchError::ActivationOutOfRange(format!(
                "negative cluster timestamp {}",
                clock.unix_timestamp
            ))
        })?,
    };

    now.checked_add(delay).ok_or_else(|| {
        LaunchError::ActivationOutOfRange(format!("{} + {} overflows", now, delay))
    })
}

/// Dynamic AMM pool address for a mint pair created with `config`.
///
/// Seeds are the larger mint, the smaller mint (byte order), then the config key.
pub fn derive_pool_address(
    mint_a: &Pubkey,
    mint_b: &Pubkey,
    config: &Pubkey,
    program_id: &Pubkey,
) -> Pubkey {
    let (first, second) = if mint_a.to_bytes() > mint_b.to_bytes() {
        (mint_a, mint_b)
    } else {
        (mint_b, mint_a)
    };

    let (pool, _bump) = Pubkey::find_program_address(
        &[first.as_ref(), second.as_ref(), config.as_ref()],
        program_id,
    );
    pool
}
