use anchor_lang::prelude::*;

use super::FEE_BASE;
use crate::errors::ErrorCode;

pub const DIST_PARTNER_SEED: &[u8] = b"dist_partner";

/// Revenue-share registration for a distribution partner
#[account]
#[derive(InitSpace)]
pub struct DistPartner {
    pub partner: Pubkey,

    /// Fraction of every computed fee owed to the partner (FEE_BASE fixed point).
    /// Values above FEE_BASE are accepted but read back as 100%.
    pub fee_share: u64,

    pub bump: u8,
}

impl DistPartner {
    pub fn capped_share(&self) -> u64 {
        self.fee_share.min(FEE_BASE)
    }
}

/// Splits `fee` into (protocol, partner) portions for a partner `share`.
///
/// The partner portion floors, so any rounding dust stays with the protocol.
pub fn split_fee(fee: u64, share: u64) -> Result<(u64, u64)> {
    let share = share.min(FEE_BASE);
    let partner = (fee as u128)
        .checked_mul(share as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(FEE_BASE as u128)
        .ok_or(ErrorCode::MathOverflow)? as u64;
    let protocol = fee.checked_sub(partner).ok_or(ErrorCode::MathOverflow)?;
    Ok((protocol, partner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fee() {
        // No partner share: everything to the protocol
        assert_eq!(split_fee(1_000, 0).unwrap(), (1_000, 0));
        // 25% partner share
        assert_eq!(split_fee(1_000, FEE_BASE / 4).unwrap(), (750, 250));
        // Rounding dust stays with the protocol
        assert_eq!(split_fee(3, FEE_BASE / 2).unwrap(), (2, 1));
    }

    #[test]
    fn test_share_above_base_is_clamped() {
        let partner = DistPartner {
            partner: Pubkey::new_unique(),
            fee_share: FEE_BASE * 3,
            bump: 255,
        };
        assert_eq!(partner.capped_share(), FEE_BASE);
        assert_eq!(split_fee(500, partner.fee_share).unwrap(), (0, 500));
    }
}
