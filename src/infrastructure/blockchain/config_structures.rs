//! Dynamic AMM and Alpha Vault config account structures

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::hash::hashv;

/// Offset of `pool_creator_authority` in a Dynamic AMM `Config` account,
/// discriminator included
pub const POOL_CREATOR_AUTHORITY_OFFSET: usize = 8 + 32 + 8 + 32;

/// Anchor account discriminator: first 8 bytes of `sha256("account:<Name>")`
pub fn account_discriminator(account_name: &str) -> [u8; 8] {
    let hash = hashv(&[format!("account:{}", account_name).as_bytes()]);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.to_bytes()[..8]);
    discriminator
}

/// Split off and check the discriminator, returning the account body
pub fn strip_discriminator<'a>(
    data: &'a [u8],
    expected: &[u8; 8],
) -> Result<&'a [u8], borsh::maybestd::io::Error> {
    if data.len() < 8 || &data[..8] != expected {
        return Err(borsh::maybestd::io::Error::new(
            borsh::maybestd::io::ErrorKind::InvalidData,
            "Account discriminator mismatch",
        ));
    }
    Ok(&data[8..])
}

#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, Default)]
pub struct PoolFees {
    pub trade_fee_numerator: u64,
    pub trade_fee_denominator: u64,
    pub protocol_trade_fee_numerator: u64,
    pub protocol_trade_fee_denominator: u64,
}

/// Dynamic AMM `Config` account (padding omitted)
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, Default)]
pub struct DynamicAmmConfig {
    pub pool_fees: PoolFees,
    pub activation_duration: u64,
    pub vault_config_key: [u8; 32],
    pub pool_creator_authority: [u8; 32],
    pub activation_type: u8,
    pub partner_fee_numerator: u64,
}

impl DynamicAmmConfig {
    pub const ACCOUNT_NAME: &'static str = "Config";

    /// Decode account data; trailing padding is ignored
    pub fn try_deserialize(data: &[u8]) -> Result<Self, borsh::maybestd::io::Error> {
        let mut body = strip_discriminator(data, &account_discriminator(Self::ACCOUNT_NAME))?;
        Self::deserialize(&mut body)
    }
}

/// Alpha Vault `FcfsConfig` account (padding omitted)
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, Default)]
pub struct FcfsConfig {
    pub max_depositing_cap: u64,
    pub start_vesting_duration: u64,
    pub end_vesting_duration: u64,
    pub depositing_duration_until_last_join_point: u64,
    pub individual_depositing_cap: u64,
    pub escrow_fee: u64,
    pub activation_type: u8,
}

impl FcfsConfig {
    pub const ACCOUNT_NAME: &'static str = "FcfsConfig";

    pub fn try_deserialize(data: &[u8]) -> Result<Self, borsh::maybestd::io::Error> {
        let mut body = strip_discriminator(data, &account_discriminator(Self::ACCOUNT_NAME))?;
        Self::deserialize(&mut body)
    }
}

/// Alpha Vault `ProrataConfig` account (padding omitted)
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, Default)]
pub struct ProrataConfig {
    pub max_buying_cap: u64,
    pub start_vesting_duration: u64,
    pub end_vesting_duration: u64,
    pub escrow_fee: u64,
    pub activation_type: u8,
}

impl ProrataConfig {
    pub const ACCOUNT_NAME: &'static str = "ProrataConfig";

    pub fn try_deserialize(data: &[u8]) -> Result<Self, borsh::maybestd::io::Error> {
        let mut body = strip_discriminator(data, &account_discriminator(Self::ACCOUNT_NAME))?;
        Self::deserialize(&mut body)
    }
}
