use anchor_lang::prelude::*;

use crate::constants::BASE;
use crate::errors::ErrorCode;
use crate::utils::math::mul_div_floor;

/// Optional features of an option agreement
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct AdvancedSettings {
    /// Fraction of notional that may be borrowed in aggregate (BASE fixed point)
    pub borrow_cap: u64,
    /// Price feed used for net-settled exercise
    pub oracle: Option<Pubkey>,
    /// Premium is paid in the collateral asset instead of the settlement asset
    pub premium_in_collateral: bool,
    /// Owner may record a vote delegate for the escrowed collateral
    pub allow_vote_delegation: bool,
    /// External delegation registry the vote delegate is published to
    pub delegate_registry: Option<Pubkey>,
}

/// Terms of an option agreement. Fixed once the option is minted.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct OptionInfo {
    pub collateral_mint: Pubkey,
    pub settlement_mint: Pubkey,
    /// Collateral base units the claim is written against (1 claim unit each)
    pub notional: u64,
    /// Settlement base units per whole collateral token
    pub strike: u64,
    pub expiry: i64,
    /// 0 means exercisable immediately
    pub earliest_exercise: i64,
    pub advanced: AdvancedSettings,
}

impl OptionInfo {
    pub fn premium_mint(&self) -> Pubkey {
        if self.advanced.premium_in_collateral {
            self.collateral_mint
        } else {
            self.settlement_mint
        }
    }

    /// Collateral base units that may be outstanding as borrows
    pub fn borrow_capacity(&self) -> Result<u64> {
        mul_div_floor(self.notional, self.advanced.borrow_cap, BASE)
    }

    /// Canonical byte encoding of every economic term, used in quote hashes
    pub fn write_terms(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.collateral_mint.as_ref());
        out.extend_from_slice(self.settlement_mint.as_ref());
        out.extend_from_slice(&self.notional.to_le_bytes());
        out.extend_from_slice(&self.strike.to_le_bytes());
        out.extend_from_slice(&self.expiry.to_le_bytes());
        out.extend_from_slice(&self.earliest_exercise.to_le_bytes());

        let advanced = &self.advanced;
        out.extend_from_slice(&advanced.borrow_cap.to_le_bytes());
        write_optional_key(out, advanced.oracle.as_ref());
        out.push(advanced.premium_in_collateral as u8);
        out.push(advanced.allow_vote_delegation as u8);
        write_optional_key(out, advanced.delegate_registry.as_ref());
    }
}

fn write_optional_key(out: &mut Vec<u8>, key: Option<&Pubkey>) {
    match key {
        Some(key) => {
            out.push(1);
            out.extend_from_slice(key.as_ref());
        }
        None => out.push(0),
    }
}

/// Parameters of a descending-price auction for a covered option
///
/// Strike and premium are relative to the spot price at the time of the bid;
/// tenors are relative to the time of the match.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct AuctionParams {
    /// Strike as a fraction of spot (BASE fixed point)
    pub rel_strike: u64,
    /// Seconds from match until expiry
    pub tenor: i64,
    /// Seconds from match until exercise opens (0 = immediately)
    pub earliest_exercise_tenor: i64,
    pub rel_premium_start: u64,
    pub rel_premium_floor: u64,
    pub decay_start: i64,
    pub decay_duration: i64,
    /// Accepted reference spot band (settlement base units per whole collateral token)
    pub min_spot: u64,
    pub max_spot: u64,
    pub oracle: Pubkey,
}

impl AuctionParams {
    /// Relative premium currently asked by the auction
    ///
    /// Flat at `rel_premium_start` until `decay_start`, then linear down to
    /// `rel_premium_floor` over `decay_duration`, flat afterwards.
    pub fn current_ask(&self, now: i64) -> u64 {
        if now < self.decay_start {
            return self.rel_premium_start;
        }
        let elapsed = now.saturating_sub(self.decay_start);
        if self.decay_duration <= 0 || elapsed >= self.decay_duration {
            return self.rel_premium_floor;
        }

        let range = self.rel_premium_start.saturating_sub(self.rel_premium_floor) as u128;
        let decayed = range * elapsed as u128 / self.decay_duration as u128;
        // decayed < range here, so the result stays within [floor, start]
        self.rel_premium_start - decayed as u64
    }

    pub fn spot_in_range(&self, spot: u64) -> bool {
        spot >= self.min_spot && spot <= self.max_spot
    }

    pub fn earliest_exercise_at(&self, now: i64) -> Result<i64> {
        if self.earliest_exercise_tenor == 0 {
            return Ok(0);
        }
        now.checked_add(self.earliest_exercise_tenor)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    pub fn expiry_at(&self, now: i64) -> Result<i64> {
        now.checked_add(self.tenor)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    fn auction() -> AuctionParams {
        AuctionParams {
            rel_strike: BASE,
            tenor: 30 * DAY,
            earliest_exercise_tenor: 0,
            rel_premium_start: BASE / 100,       // 0.01
            rel_premium_floor: BASE / 200,       // 0.005
            decay_start: 1_000_000,
            decay_duration: 7 * DAY,
            min_spot: 1,
            max_spot: u64::MAX,
            oracle: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_current_ask_before_during_after_decay() {
        let params = auction();
        assert_eq!(params.current_ask(0), BASE / 100);
        assert_eq!(params.current_ask(params.decay_start - 1), BASE / 100);
        assert_eq!(params.current_ask(params.decay_start), BASE / 100);
        // Halfway through a 7 day decay: 0.0075
        assert_eq!(params.current_ask(params.decay_start + 3 * DAY + DAY / 2), 7_500_000);
        assert_eq!(params.current_ask(params.decay_start + 7 * DAY), BASE / 200);
        assert_eq!(params.current_ask(i64::MAX), BASE / 200);
    }

    #[test]
    fn test_current_ask_is_monotonic_and_bounded() {
        let params = auction();
        let mut previous = u64::MAX;
        let mut now = params.decay_start - DAY;
        while now < params.decay_start + 8 * DAY {
            let ask = params.current_ask(now);
            assert!(ask <= previous);
            assert!(ask >= params.rel_premium_floor && ask <= params.rel_premium_start);
            previous = ask;
            now += 3_607;
        }
    }

    #[test]
    fn test_earliest_exercise_and_expiry() {
        let mut params = auction();
        assert_eq!(params.earliest_exercise_at(500).unwrap(), 0);
        params.earliest_exercise_tenor = DAY;
        assert_eq!(params.earliest_exercise_at(500).unwrap(), 500 + DAY);
        assert_eq!(params.expiry_at(500).unwrap(), 500 + 30 * DAY);
        assert!(params.expiry_at(i64::MAX).is_err());
    }

    #[test]
    fn test_terms_encoding_distinguishes_settings() {
        let info = OptionInfo {
            collateral_mint: Pubkey::new_unique(),
            settlement_mint: Pubkey::new_unique(),
            notional: 100,
            strike: 1,
            expiry: 10,
            earliest_exercise: 0,
            advanced: AdvancedSettings::default(),
        };
        let mut other = info;
        other.advanced.premium_in_collateral = true;

        let (mut a, mut b) = (Vec::new(), Vec::new());
        info.write_terms(&mut a);
        other.write_terms(&mut b);
        assert_ne!(a, b);
        assert_eq!(info.premium_mint(), info.settlement_mint);
        assert_eq!(other.premium_mint(), other.collateral_mint);
    }
}
