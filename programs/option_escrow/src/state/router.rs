use anchor_lang::prelude::*;

use crate::constants::{ESCROW_SEED, MAX_REGISTRY_PAGE};
use crate::errors::ErrorCode;

/// Singleton escrow factory and registry
///
/// PDA Seeds: "router"
///
/// Escrows are numbered 0..num_escrows and live at
/// `["escrow", router, index]`, so the registry is append-only and
/// membership is proven by the seeds alone. The router PDA is also the token
/// delegate quote makers approve so their signed quotes can be filled.
#[account]
#[derive(InitSpace)]
pub struct Router {
    pub admin: Pubkey,
    pub pending_admin: Option<Pubkey>,
    /// Mixed into every quote hash so a signature is only valid on one cluster
    pub chain_id: u64,
    /// Active `fee_handler::FeeConfig`, none means no fees
    pub fee_handler: Option<Pubkey>,
    pub num_escrows: u64,
    pub bump: u8,
}

impl Router {
    /// Reserves the next registry index
    pub fn next_index(&mut self) -> Result<u64> {
        let index = self.num_escrows;
        self.num_escrows = index.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        Ok(index)
    }

    /// Indices of the registry page `[from, from + count)`
    pub fn page(&self, from: u64, count: u64) -> Result<std::ops::Range<u64>> {
        validate_page(from, count, self.num_escrows)?;
        Ok(from..from + count)
    }
}

pub fn validate_page(from: u64, count: u64, len: u64) -> Result<()> {
    require!(count > 0, ErrorCode::InvalidRange);
    require!(count <= MAX_REGISTRY_PAGE, ErrorCode::InvalidRange);
    let end = from.checked_add(count).ok_or(ErrorCode::InvalidRange)?;
    require!(end <= len, ErrorCode::InvalidRange);
    Ok(())
}

/// Address of the escrow registered at `index`
pub fn escrow_address(router: &Pubkey, index: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[ESCROW_SEED, router.as_ref(), &index.to_le_bytes()],
        &crate::ID,
    )
    .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::assert_anchor_error;

    fn router_with(num_escrows: u64) -> Router {
        Router {
            admin: Pubkey::new_unique(),
            pending_admin: None,
            chain_id: 1,
            fee_handler: None,
            num_escrows,
            bump: 255,
        }
    }

    #[test]
    fn test_next_index_is_sequential() {
        let mut router = router_with(0);
        assert_eq!(router.next_index().unwrap(), 0);
        assert_eq!(router.next_index().unwrap(), 1);
        assert_eq!(router.num_escrows, 2);
    }

    #[test]
    fn test_page_bounds() {
        let router = router_with(10);
        assert_eq!(router.page(0, 10).unwrap(), 0..10);
        assert_eq!(router.page(9, 1).unwrap(), 9..10);
        assert_anchor_error(router.page(0, 0), ErrorCode::InvalidRange);
        assert_anchor_error(router.page(5, 6), ErrorCode::InvalidRange);
        assert_anchor_error(router.page(u64::MAX, 1), ErrorCode::InvalidRange);

        let big = router_with(100);
        assert_anchor_error(big.page(0, MAX_REGISTRY_PAGE + 1), ErrorCode::InvalidRange);
    }

    #[test]
    fn test_escrow_addresses_are_distinct_per_index() {
        let router = Pubkey::new_unique();
        assert_ne!(escrow_address(&router, 0), escrow_address(&router, 1));
        assert_eq!(escrow_address(&router, 3), escrow_address(&router, 3));
    }
}
