use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Push oracle for one collateral/settlement pair
///
/// PDA Seeds: "price_feed", base_mint, quote_mint, authority
///
/// `price` is quote (settlement) base units per whole base (collateral) token.
#[account]
#[derive(InitSpace)]
pub struct PriceFeed {
    pub authority: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub price: u64,
    pub publish_time: i64,
    /// Seconds a published price stays usable
    pub max_age: i64,
    pub bump: u8,
}

impl PriceFeed {
    pub fn prices(&self, base_mint: &Pubkey, quote_mint: &Pubkey) -> bool {
        self.base_mint == *base_mint && self.quote_mint == *quote_mint
    }

    /// Latest price, failing if none was published or it is older than `max_age`
    pub fn price_at(&self, now: i64) -> Result<u64> {
        require!(self.price > 0, ErrorCode::PriceUnavailable);
        let age = now
            .checked_sub(self.publish_time)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(age <= self.max_age, ErrorCode::StalePrice);
        Ok(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::assert_anchor_error;

    #[test]
    fn test_price_freshness() {
        let mut feed = PriceFeed {
            authority: Pubkey::new_unique(),
            base_mint: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            price: 0,
            publish_time: 1_000,
            max_age: 60,
            bump: 255,
        };
        assert_anchor_error(feed.price_at(1_000), ErrorCode::PriceUnavailable);

        feed.price = 2_500_000;
        assert_eq!(feed.price_at(1_060).unwrap(), 2_500_000);
        assert_anchor_error(feed.price_at(1_061), ErrorCode::StalePrice);

        let (base, quote) = (feed.base_mint, feed.quote_mint);
        assert!(feed.prices(&base, &quote));
        assert!(!feed.prices(&quote, &base));
    }
}
