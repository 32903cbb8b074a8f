use anchor_lang::prelude::*;

use crate::constants::ROUTER_SEED;
use crate::events::RouterInitialized;
use crate::state::Router;

#[derive(Accounts)]
pub struct InitializeRouter<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + Router::INIT_SPACE,
        seeds = [ROUTER_SEED],
        bump
    )]
    pub router: Account<'info, Router>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeRouter>, chain_id: u64) -> Result<()> {
    let router = &mut ctx.accounts.router;
    router.admin = ctx.accounts.admin.key();
    router.pending_admin = None;
    router.chain_id = chain_id;
    router.fee_handler = None;
    router.num_escrows = 0;
    router.bump = ctx.bumps.router;

    emit!(RouterInitialized {
        admin: router.admin,
        chain_id,
    });
    msg!("Router initialized by {} for chain {}", router.admin, chain_id);

    Ok(())
}
