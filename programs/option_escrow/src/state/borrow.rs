use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::utils::math::mul_div_floor;

/// Per-borrower loan against one escrow
///
/// PDA Seeds: "borrow", escrow, borrower
#[account]
#[derive(InitSpace)]
pub struct BorrowPosition {
    pub escrow: Pubkey,
    pub borrower: Pubkey,
    /// Collateral base units currently owed back to the escrow
    pub borrowed: u64,
    /// Settlement base units posted against `borrowed`
    pub collateral_posted: u64,
    pub bump: u8,
}

impl BorrowPosition {
    pub fn record(&mut self, amount: u64, posted: u64) -> Result<()> {
        self.borrowed = self
            .borrowed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        self.collateral_posted = self
            .collateral_posted
            .checked_add(posted)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Books a repayment of `amount`. Returns the posted collateral released,
    /// proportional to the share repaid and everything on a full repay.
    pub fn repay(&mut self, amount: u64) -> Result<u64> {
        require!(self.borrowed > 0, ErrorCode::NothingToRepay);
        require!(amount > 0, ErrorCode::InvalidAmount);
        require!(amount <= self.borrowed, ErrorCode::ExceedsOutstandingBorrow);

        let returned = if amount == self.borrowed {
            self.collateral_posted
        } else {
            mul_div_floor(self.collateral_posted, amount, self.borrowed)?
        };
        self.borrowed -= amount;
        self.collateral_posted -= returned;
        Ok(returned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::assert_anchor_error;

    fn position() -> BorrowPosition {
        BorrowPosition {
            escrow: Pubkey::new_unique(),
            borrower: Pubkey::new_unique(),
            borrowed: 0,
            collateral_posted: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_repay_with_nothing_owed() {
        let mut position = position();
        assert_anchor_error(position.repay(1), ErrorCode::NothingToRepay);
    }

    #[test]
    fn test_partial_then_full_repay() {
        let mut position = position();
        position.record(30, 100).unwrap();

        // 1/3 of 100 floors to 33
        assert_eq!(position.repay(10).unwrap(), 33);
        assert_eq!(position.borrowed, 20);
        assert_eq!(position.collateral_posted, 67);

        assert_anchor_error(position.repay(21), ErrorCode::ExceedsOutstandingBorrow);

        // The last repay releases the rounding dust too
        assert_eq!(position.repay(20).unwrap(), 67);
        assert_eq!(position.collateral_posted, 0);
        assert_anchor_error(position.repay(1), ErrorCode::NothingToRepay);
    }
}
