use anchor_lang::prelude::*;

use crate::constants::{ESCROW_SEED, ROUTER_SEED};
use crate::state::Escrow;

/// Owned copies of the escrow PDA seeds, so the escrow account can still be
/// mutated while a CPI signs with them
pub struct EscrowSeeds {
    router: Pubkey,
    index: [u8; 8],
    bump: [u8; 1],
}

impl EscrowSeeds {
    pub fn new(escrow: &Escrow) -> Self {
        Self {
            router: escrow.router,
            index: escrow.index.to_le_bytes(),
            bump: [escrow.bump],
        }
    }

    /// Seed components for `CpiContext::new_with_signer`: `&[&seeds.signer()[..]]`
    pub fn signer(&self) -> [&[u8]; 4] {
        [ESCROW_SEED, self.router.as_ref(), &self.index, &self.bump]
    }
}

/// Seed components the router PDA signs with when pulling delegated quote funds
pub fn router_signer_seeds(bump_bytes: &[u8; 1]) -> [&[u8]; 2] {
    [ROUTER_SEED, bump_bytes]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escrow_seeds_rederive_the_registry_address() {
        let router = Pubkey::new_unique();
        let index = 3u64;
        let (address, bump) = Pubkey::find_program_address(
            &[ESCROW_SEED, router.as_ref(), &index.to_le_bytes()],
            &crate::ID,
        );

        let seeds = EscrowSeeds {
            router,
            index: index.to_le_bytes(),
            bump: [bump],
        };
        let derived = Pubkey::create_program_address(&seeds.signer(), &crate::ID).unwrap();
        assert_eq!(derived, address);
        assert_eq!(derived, crate::state::escrow_address(&router, index));
    }
}
