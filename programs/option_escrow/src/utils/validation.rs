use anchor_lang::prelude::*;

use crate::constants::{BASE, MIN_EXERCISE_WINDOW};
use crate::errors::ErrorCode;
use crate::state::{AdvancedSettings, AuctionParams, OptionInfo};
use crate::utils::math::calculate_strike;

/// Validates that an amount is greater than zero
pub fn validate_amount(amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidAmount);
    Ok(())
}

/// Validates advanced settings shared by every initialization path
pub fn validate_advanced(advanced: &AdvancedSettings) -> Result<()> {
    require!(advanced.borrow_cap <= BASE, ErrorCode::InvalidBorrowCap);
    if let Some(oracle) = advanced.oracle {
        require!(oracle != Pubkey::default(), ErrorCode::InvalidOracle);
    }
    Ok(())
}

/// Validates absolute option terms (RFQ and direct-mint paths)
pub fn validate_option_info(info: &OptionInfo, now: i64) -> Result<()> {
    require!(
        info.collateral_mint != info.settlement_mint,
        ErrorCode::InvalidTokenPair
    );
    require!(info.notional > 0, ErrorCode::InvalidNotional);
    require!(info.strike > 0, ErrorCode::InvalidStrikePrice);
    require!(info.expiry > now, ErrorCode::ExpirationInPast);
    require!(info.earliest_exercise >= 0, ErrorCode::InvalidEarliestExercise);
    if info.earliest_exercise != 0 {
        let latest_allowed = info
            .expiry
            .checked_sub(MIN_EXERCISE_WINDOW)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(
            info.earliest_exercise <= latest_allowed,
            ErrorCode::InvalidEarliestExercise
        );
    }
    validate_advanced(&info.advanced)
}

/// Validates relative auction terms before any collateral is pulled
pub fn validate_auction_params(params: &AuctionParams) -> Result<()> {
    require!(params.rel_strike > 0, ErrorCode::InvalidRelativeStrike);
    require!(params.tenor > 0, ErrorCode::InvalidTenor);
    require!(params.earliest_exercise_tenor >= 0, ErrorCode::InvalidTenor);
    if params.earliest_exercise_tenor != 0 {
        let min_tenor = params
            .earliest_exercise_tenor
            .checked_add(MIN_EXERCISE_WINDOW)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(params.tenor >= min_tenor, ErrorCode::InvalidTenor);
    }
    require!(
        params.rel_premium_floor > 0 && params.rel_premium_start > params.rel_premium_floor,
        ErrorCode::InvalidPremiumRange
    );
    require!(params.decay_duration > 0, ErrorCode::InvalidDecayDuration);
    require!(
        params.min_spot > 0 && params.min_spot < params.max_spot,
        ErrorCode::InvalidSpotBand
    );
    // Strike only grows with spot, so a positive strike at the band floor covers every accepted bid
    require!(
        calculate_strike(params.rel_strike, params.min_spot)? > 0,
        ErrorCode::InvalidRelativeStrike
    );
    require!(params.oracle != Pubkey::default(), ErrorCode::InvalidOracle);
    Ok(())
}

/// Validates that `now` lies within [earliest_exercise, expiry]
pub fn validate_exercise_window(info: &OptionInfo, now: i64) -> Result<()> {
    require!(now >= info.earliest_exercise, ErrorCode::ExerciseNotStarted);
    require!(now <= info.expiry, ErrorCode::OptionExpired);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::assert_anchor_error;

    const DAY: i64 = 86_400;
    const NOW: i64 = 1_700_000_000;

    fn option_info() -> OptionInfo {
        OptionInfo {
            collateral_mint: Pubkey::new_unique(),
            settlement_mint: Pubkey::new_unique(),
            notional: 100_000_000,
            strike: 1_000_000,
            expiry: NOW + 30 * DAY,
            earliest_exercise: 0,
            advanced: AdvancedSettings {
                borrow_cap: BASE / 2,
                ..Default::default()
            },
        }
    }

    fn auction_params() -> AuctionParams {
        AuctionParams {
            rel_strike: BASE,
            tenor: 30 * DAY,
            earliest_exercise_tenor: 0,
            rel_premium_start: BASE / 100,
            rel_premium_floor: BASE / 200,
            decay_start: NOW,
            decay_duration: 7 * DAY,
            min_spot: 500_000,
            max_spot: 2_000_000,
            oracle: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_valid_option_info() {
        assert!(validate_option_info(&option_info(), NOW).is_ok());
    }

    #[test]
    fn test_option_info_rejections() {
        let mut info = option_info();
        info.settlement_mint = info.collateral_mint;
        assert_anchor_error(validate_option_info(&info, NOW), ErrorCode::InvalidTokenPair);

        let mut info = option_info();
        info.notional = 0;
        assert_anchor_error(validate_option_info(&info, NOW), ErrorCode::InvalidNotional);

        let mut info = option_info();
        info.strike = 0;
        assert_anchor_error(validate_option_info(&info, NOW), ErrorCode::InvalidStrikePrice);

        let mut info = option_info();
        info.expiry = NOW;
        assert_anchor_error(validate_option_info(&info, NOW), ErrorCode::ExpirationInPast);

        let mut info = option_info();
        info.advanced.borrow_cap = BASE + 1;
        assert_anchor_error(validate_option_info(&info, NOW), ErrorCode::InvalidBorrowCap);

        let mut info = option_info();
        info.advanced.oracle = Some(Pubkey::default());
        assert_anchor_error(validate_option_info(&info, NOW), ErrorCode::InvalidOracle);
    }

    #[test]
    fn test_earliest_exercise_needs_one_day_window() {
        let mut info = option_info();
        info.earliest_exercise = info.expiry - DAY;
        assert!(validate_option_info(&info, NOW).is_ok());

        info.earliest_exercise = info.expiry - DAY + 1;
        assert_anchor_error(
            validate_option_info(&info, NOW),
            ErrorCode::InvalidEarliestExercise,
        );
    }

    #[test]
    fn test_auction_param_rejections() {
        assert!(validate_auction_params(&auction_params()).is_ok());

        let mut params = auction_params();
        params.rel_premium_floor = params.rel_premium_start;
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidPremiumRange);

        let mut params = auction_params();
        params.rel_premium_floor = 0;
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidPremiumRange);

        let mut params = auction_params();
        params.min_spot = params.max_spot;
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidSpotBand);

        let mut params = auction_params();
        params.min_spot = 0;
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidSpotBand);

        let mut params = auction_params();
        params.earliest_exercise_tenor = params.tenor;
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidTenor);

        let mut params = auction_params();
        params.decay_duration = 0;
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidDecayDuration);

        let mut params = auction_params();
        params.oracle = Pubkey::default();
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidOracle);

        let mut params = auction_params();
        params.rel_strike = 0;
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidRelativeStrike);
    }

    #[test]
    fn test_auction_strike_must_be_positive_across_spot_band() {
        // 0.5 × spot 1 floors to a zero strike at the bottom of the band
        let mut params = auction_params();
        params.rel_strike = BASE / 2;
        params.min_spot = 1;
        params.max_spot = 10;
        assert_anchor_error(validate_auction_params(&params), ErrorCode::InvalidRelativeStrike);

        // 0.5 × spot 2 is the smallest band floor that still strikes at 1
        params.min_spot = 2;
        assert!(validate_auction_params(&params).is_ok());
    }

    #[test]
    fn test_exercise_window_bounds() {
        let mut info = option_info();
        info.earliest_exercise = NOW + DAY;
        assert_anchor_error(
            validate_exercise_window(&info, NOW),
            ErrorCode::ExerciseNotStarted,
        );
        assert!(validate_exercise_window(&info, NOW + DAY).is_ok());
        assert!(validate_exercise_window(&info, info.expiry).is_ok());
        assert_anchor_error(
            validate_exercise_window(&info, info.expiry + 1),
            ErrorCode::OptionExpired,
        );
    }
}
