use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use fee_handler::state::split_fee;
use fee_handler::{DistPartner, FeeConfig};

use crate::constants::{BASE, MAX_EXERCISE_FEE, MAX_MATCH_FEE};
use crate::errors::ErrorCode;
use crate::state::Router;
use crate::utils::math::mul_div_floor;

/// Fee rates in force for one request, already clamped to protocol caps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSchedule {
    pub match_fee: u64,
    pub exercise_fee: u64,
    pub partner_share: u64,
    /// Owner of the token accounts receiving the protocol share
    pub fee_sink: Option<Pubkey>,
    /// Distribution partner receiving `partner_share` of match fees
    pub partner: Option<Pubkey>,
}

/// Match fee on a premium, split between protocol and distribution partner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub protocol: u64,
    pub partner: u64,
}

impl FeeSplit {
    pub fn total(&self) -> u64 {
        self.protocol.saturating_add(self.partner)
    }
}

impl FeeSchedule {
    /// Builds a schedule from raw handler values, clamping every rate
    pub fn clamped(
        match_fee: u64,
        exercise_fee: u64,
        partner_share: u64,
        fee_sink: Option<Pubkey>,
        partner: Option<Pubkey>,
    ) -> Self {
        Self {
            match_fee: match_fee.min(MAX_MATCH_FEE),
            exercise_fee: exercise_fee.min(MAX_EXERCISE_FEE),
            partner_share: partner_share.min(BASE),
            fee_sink,
            partner,
        }
    }

    /// Resolves the schedule for the router's active fee handler.
    ///
    /// With no handler configured nothing is charged. With one configured the
    /// caller must present exactly that fee config.
    pub fn resolve(
        router: &Router,
        fee_config: Option<&Account<FeeConfig>>,
        dist_partner: Option<&Account<DistPartner>>,
    ) -> Result<Self> {
        let Some(expected) = router.fee_handler else {
            return Ok(Self::default());
        };
        let fee_config = fee_config.ok_or(ErrorCode::FeeHandlerMismatch)?;
        require_keys_eq!(fee_config.key(), expected, ErrorCode::FeeHandlerMismatch);

        let (partner_share, partner) = match dist_partner {
            Some(dist_partner) => (dist_partner.capped_share(), Some(dist_partner.partner)),
            None => (0, None),
        };

        Ok(Self::clamped(
            fee_config.match_fee,
            fee_config.exercise_fee,
            partner_share,
            Some(fee_config.fee_sink),
            partner,
        ))
    }

    /// Match fee on `premium`; never more than the premium itself
    pub fn match_fees(&self, premium: u64) -> Result<FeeSplit> {
        let fee = mul_div_floor(premium, self.match_fee, BASE)?;
        require!(fee <= premium, ErrorCode::FeesExceedPremium);
        let (protocol, partner) = split_fee(fee, self.partner_share)?;
        Ok(FeeSplit { protocol, partner })
    }

    /// Exercise fee on a settlement or borrow-collateral amount
    pub fn exercise_fee_on(&self, amount: u64) -> Result<u64> {
        mul_div_floor(amount, self.exercise_fee, BASE)
    }
}

/// Checks a fee recipient token account before it is credited
pub fn checked_fee_recipient<'a, 'info>(
    account: Option<&'a InterfaceAccount<'info, TokenAccount>>,
    expected_owner: Option<Pubkey>,
    mint: &Pubkey,
) -> Result<&'a InterfaceAccount<'info, TokenAccount>> {
    let account = account.ok_or(ErrorCode::InvalidFeeAccount)?;
    let expected_owner = expected_owner.ok_or(ErrorCode::InvalidFeeAccount)?;
    require_keys_eq!(account.owner, expected_owner, ErrorCode::InvalidFeeAccount);
    require_keys_eq!(account.mint, *mint, ErrorCode::InvalidFeeAccount);
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_are_clamped_to_protocol_caps() {
        let schedule = FeeSchedule::clamped(BASE / 2, BASE / 10, BASE * 2, None, None);
        assert_eq!(schedule.match_fee, MAX_MATCH_FEE);
        assert_eq!(schedule.exercise_fee, MAX_EXERCISE_FEE);
        assert_eq!(schedule.partner_share, BASE);

        // A misconfigured 50% handler still only takes 20% of a premium
        let split = schedule.match_fees(1_000_000).unwrap();
        assert_eq!(split.total(), 200_000);
        assert_eq!(split.partner, 200_000);
        assert_eq!(split.protocol, 0);

        // ... and 0.5% of an exercise
        assert_eq!(schedule.exercise_fee_on(1_000_000).unwrap(), 5_000);
    }

    #[test]
    fn test_match_fee_split_with_partner() {
        // 10% match fee, partner gets 30% of it
        let schedule = FeeSchedule::clamped(BASE / 10, 0, BASE * 3 / 10, None, None);
        let split = schedule.match_fees(1_000).unwrap();
        assert_eq!(split, FeeSplit { protocol: 70, partner: 30 });
        assert!(split.total() <= 1_000);
    }

    #[test]
    fn test_no_handler_charges_nothing() {
        let schedule = FeeSchedule::default();
        assert_eq!(schedule.match_fees(123_456).unwrap().total(), 0);
        assert_eq!(schedule.exercise_fee_on(123_456).unwrap(), 0);
    }

    #[test]
    fn test_fee_base_matches_handler_base() {
        assert_eq!(BASE, fee_handler::FEE_BASE);
    }
}
