use anchor_lang::prelude::*;

/// Fixed-point base for every rate stored by this program (1.0 == 100%)
pub const FEE_BASE: u64 = 1_000_000_000;

pub const FEE_CONFIG_SEED: &[u8] = b"fee_config";

/// Singleton fee schedule read by the option router
///
/// Rates are stored exactly as configured by the authority. Consumers are
/// expected to apply their own protocol-wide caps before charging them.
#[account]
#[derive(InitSpace)]
pub struct FeeConfig {
    /// Signer allowed to change rates, sink and partner shares
    pub authority: Pubkey,

    /// Owner of the token accounts that receive the protocol's fee share
    pub fee_sink: Pubkey,

    /// Fee on every matched premium (FEE_BASE fixed point)
    pub match_fee: u64,

    /// Fee on every exercise settlement amount and borrow collateral amount
    pub exercise_fee: u64,

    pub bump: u8,
}

impl FeeConfig {
    pub fn is_valid_rate(rate: u64) -> bool {
        rate <= FEE_BASE
    }
}
