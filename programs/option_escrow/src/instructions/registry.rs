use anchor_lang::prelude::*;

use crate::constants::ROUTER_SEED;
use crate::state::{escrow_address, Router};

#[derive(Accounts)]
pub struct RegistryView<'info> {
    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Account<'info, Router>,
}

/// Escrow addresses `[from, from + count)` in creation order
pub fn escrows_in_range(ctx: Context<RegistryView>, from: u64, count: u64) -> Result<Vec<Pubkey>> {
    let router_key = ctx.accounts.router.key();
    let page = ctx.accounts.router.page(from, count)?;
    Ok(page.map(|index| escrow_address(&router_key, index)).collect())
}
