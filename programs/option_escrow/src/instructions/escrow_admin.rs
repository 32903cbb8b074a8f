use anchor_lang::prelude::*;

use crate::constants::{ESCROW_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::events::{OwnershipTransferred, VotesDelegated};
use crate::state::{Escrow, Router};
use crate::utils::delegation::forward_delegation;
use crate::utils::pda::EscrowSeeds;

#[derive(Accounts)]
pub struct EscrowOwner<'info> {
    pub owner: Signer<'info>,

    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, router.key().as_ref(), escrow.index.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = router @ ErrorCode::UnknownEscrow,
        has_one = owner @ ErrorCode::Unauthorized,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    /// CHECK: must be the escrow's configured delegation registry program; only invoked
    #[account(executable)]
    pub delegate_registry: Option<UncheckedAccount<'info>>,
}

/// Hands the escrow (premium and post-expiry withdrawals) to a new owner
pub fn transfer_ownership(ctx: Context<EscrowOwner>, new_owner: Pubkey) -> Result<()> {
    require!(new_owner != Pubkey::default(), ErrorCode::Unauthorized);
    let escrow_key = ctx.accounts.escrow.key();
    let escrow = &mut ctx.accounts.escrow;
    let previous_owner = escrow.owner;
    escrow.owner = new_owner;

    emit!(OwnershipTransferred {
        subject: escrow_key,
        previous_owner,
        new_owner,
    });
    msg!("Escrow {} owner changed from {} to {}", escrow_key, previous_owner, new_owner);
    Ok(())
}

/// Records the vote delegate for the escrowed collateral and publishes it to
/// the configured delegation registry under the collateral mint's space
pub fn delegate_votes(ctx: Context<EscrowOwner>, delegate: Pubkey) -> Result<()> {
    let escrow_key = ctx.accounts.escrow.key();
    let space = ctx.accounts.escrow.option_info.collateral_mint;
    let registry = ctx.accounts.escrow.delegate_votes(delegate)?;

    let registry_program = ctx
        .accounts
        .delegate_registry
        .as_ref()
        .ok_or(ErrorCode::InvalidDelegateRegistry)?;
    require_keys_eq!(registry_program.key(), registry, ErrorCode::InvalidDelegateRegistry);

    let seeds = EscrowSeeds::new(&ctx.accounts.escrow);
    let signer = seeds.signer();
    forward_delegation(
        registry_program.to_account_info(),
        ctx.accounts.escrow.to_account_info(),
        &[&signer[..]],
        &space,
        &delegate,
    )?;

    emit!(VotesDelegated {
        escrow: escrow_key,
        delegate,
        registry,
    });
    msg!("Escrow {} votes delegated to {} via {}", escrow_key, delegate, registry);
    Ok(())
}
