use anchor_lang::prelude::*;

use crate::constants::BASE;
use crate::errors::ErrorCode;

/// `a × b / denominator`, floored, with a u128 intermediate
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, ErrorCode::MathOverflow);
    let value = (a as u128)
        .checked_mul(b as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(denominator as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    u64::try_from(value).map_err(|_| error!(ErrorCode::MathOverflow))
}

fn decimals_scale(decimals: u8) -> Result<u128> {
    10_u128
        .checked_pow(decimals as u32)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
}

/// Calculates pro-rata share using the formula:
/// payout = (vault_balance × user_amount) / total_supply
///
/// Returns 0 if vault_balance is 0 (nothing to distribute)
pub fn calculate_pro_rata_share(
    vault_balance: u64,
    user_amount: u64,
    total_supply: u64,
) -> Result<u64> {
    require!(total_supply > 0, ErrorCode::NothingToRedeem);

    if vault_balance == 0 {
        return Ok(0);
    }

    mul_div_floor(vault_balance, user_amount, total_supply)
}

/// Calculates the settlement payment owed for `amount` collateral
/// Formula: (amount × strike) / 10^collateral_decimals
///
/// Example: 100 BONK × $0.04 strike = $4 USDC
/// (10_000_000 raw × 40_000) / 10^5 = 4_000_000 raw USDC ($4)
pub fn calculate_strike_payment(amount: u64, strike: u64, collateral_decimals: u8) -> Result<u64> {
    let payment = (amount as u128)
        .checked_mul(strike as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(decimals_scale(collateral_decimals)?)
        .ok_or(ErrorCode::MathOverflow)?;
    u64::try_from(payment).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Converts a settlement amount into collateral base units at `price`
/// (settlement base units per whole collateral token)
pub fn settlement_to_collateral(
    settlement_amount: u64,
    price: u64,
    collateral_decimals: u8,
) -> Result<u64> {
    require!(price > 0, ErrorCode::PriceUnavailable);
    let collateral = (settlement_amount as u128)
        .checked_mul(decimals_scale(collateral_decimals)?)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(price as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    u64::try_from(collateral).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Absolute strike for a relative strike at `spot`
pub fn calculate_strike(rel_strike: u64, spot: u64) -> Result<u64> {
    mul_div_floor(rel_strike, spot, BASE)
}

/// Premium owed for a relative premium on `notional`
///
/// Paid in collateral: notional × rel_premium / BASE.
/// Paid in settlement: (notional × spot / 10^collateral_decimals) × rel_premium / BASE.
pub fn calculate_premium(
    rel_premium: u64,
    notional: u64,
    spot: u64,
    collateral_decimals: u8,
    premium_in_collateral: bool,
) -> Result<u64> {
    if premium_in_collateral {
        return mul_div_floor(notional, rel_premium, BASE);
    }
    let notional_value = calculate_strike_payment(notional, spot, collateral_decimals)?;
    mul_div_floor(notional_value, rel_premium, BASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_payment_scales_by_collateral_decimals() {
        // 100 BONK (5 decimals) at $0.04 (USDC, 6 decimals)
        assert_eq!(calculate_strike_payment(10_000_000, 40_000, 5).unwrap(), 4_000_000);
        // 50 units at strike 1.0 with 6/6 decimals
        assert_eq!(calculate_strike_payment(50_000_000, 1_000_000, 6).unwrap(), 50_000_000);
        // floors
        assert_eq!(calculate_strike_payment(1, 1_999_999, 6).unwrap(), 1);
    }

    #[test]
    fn test_strike_payment_across_decimal_mismatch() {
        // 2 whole tokens with 9 decimals at 1.5 settlement (2 decimals) each
        assert_eq!(calculate_strike_payment(2_000_000_000, 150, 9).unwrap(), 300);
    }

    #[test]
    fn test_pro_rata_share() {
        assert_eq!(calculate_pro_rata_share(1_000, 250, 1_000).unwrap(), 250);
        assert_eq!(calculate_pro_rata_share(999, 1, 1_000).unwrap(), 0);
        assert_eq!(calculate_pro_rata_share(0, 10, 1_000).unwrap(), 0);
        assert!(calculate_pro_rata_share(10, 10, 0).is_err());
    }

    #[test]
    fn test_settlement_to_collateral() {
        // 50 USDC at 2 USDC per token (6 decimals both) is 25 tokens
        assert_eq!(settlement_to_collateral(50_000_000, 2_000_000, 6).unwrap(), 25_000_000);
        assert!(settlement_to_collateral(1, 0, 6).is_err());
    }

    #[test]
    fn test_premium_in_settlement_and_collateral() {
        // 0.0075 × 100 tokens × 1.0 spot = 0.75 settlement tokens
        assert_eq!(
            calculate_premium(7_500_000, 100_000_000, 1_000_000, 6, false).unwrap(),
            750_000
        );
        // 0.0075 × 100 collateral tokens = 0.75 collateral tokens
        assert_eq!(
            calculate_premium(7_500_000, 100_000_000, 1_000_000, 6, true).unwrap(),
            750_000
        );
        // spot 2.0 doubles a settlement premium but not a collateral premium
        assert_eq!(
            calculate_premium(7_500_000, 100_000_000, 2_000_000, 6, false).unwrap(),
            1_500_000
        );
    }

    #[test]
    fn test_mul_div_overflow_is_an_error() {
        assert!(mul_div_floor(u64::MAX, u64::MAX, 1).is_err());
        assert!(mul_div_floor(1, 1, 0).is_err());
        assert_eq!(calculate_strike(BASE / 2, 3_000_000).unwrap(), 1_500_000);
    }
}
