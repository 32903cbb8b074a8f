use anchor_lang::prelude::*;
use fee_handler::FeeConfig;

use crate::constants::ROUTER_SEED;
use crate::errors::ErrorCode;
use crate::events::{FeeHandlerChanged, OwnershipTransferred};
use crate::state::Router;

#[derive(Accounts)]
pub struct RouterAdmin<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ROUTER_SEED],
        bump = router.bump,
        has_one = admin @ ErrorCode::Unauthorized
    )]
    pub router: Account<'info, Router>,
}

#[derive(Accounts)]
pub struct SetFeeHandler<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ROUTER_SEED],
        bump = router.bump,
        has_one = admin @ ErrorCode::Unauthorized
    )]
    pub router: Account<'info, Router>,

    /// New fee schedule, omitted to stop charging fees
    pub fee_config: Option<Account<'info, FeeConfig>>,
}

#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    pub new_admin: Signer<'info>,

    #[account(mut, seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Account<'info, Router>,
}

/// Points the router at a `fee_handler` fee config (or at none)
pub fn set_fee_handler(ctx: Context<SetFeeHandler>) -> Result<()> {
    let fee_handler = ctx.accounts.fee_config.as_ref().map(|config| config.key());
    let router = &mut ctx.accounts.router;
    let previous = router.fee_handler;
    router.fee_handler = fee_handler;

    emit!(FeeHandlerChanged {
        previous,
        fee_handler,
    });
    msg!("Fee handler changed from {:?} to {:?}", previous, fee_handler);

    Ok(())
}

pub fn propose_admin(ctx: Context<RouterAdmin>, new_admin: Pubkey) -> Result<()> {
    ctx.accounts.router.pending_admin = Some(new_admin);
    msg!("Router admin transfer proposed to {}", new_admin);
    Ok(())
}

pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
    let new_admin = ctx.accounts.new_admin.key();
    let router_key = ctx.accounts.router.key();
    let router = &mut ctx.accounts.router;
    require!(
        router.pending_admin == Some(new_admin),
        ErrorCode::NoPendingAdmin
    );

    let previous_owner = router.admin;
    router.admin = new_admin;
    router.pending_admin = None;

    emit!(OwnershipTransferred {
        subject: router_key,
        previous_owner,
        new_owner: new_admin,
    });
    msg!("Router admin transferred from {} to {}", previous_owner, new_admin);

    Ok(())
}
