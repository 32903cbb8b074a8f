use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{ESCROW_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::events::Withdrawn;
use crate::state::{Escrow, Router, WithdrawKind};
use crate::utils::pda::EscrowSeeds;
use crate::utils::transfer::transfer_tokens;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub owner: Signer<'info>,

    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, router.key().as_ref(), escrow.index.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = router @ ErrorCode::UnknownEscrow,
        has_one = owner @ ErrorCode::Unauthorized,
        has_one = collateral_vault,
        has_one = settlement_vault,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    #[account(address = escrow.option_info.collateral_mint @ ErrorCode::InvalidTokenPair)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = escrow.option_info.settlement_mint @ ErrorCode::InvalidTokenPair)]
    pub settlement_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub settlement_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = collateral_mint)]
    pub owner_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = settlement_mint)]
    pub owner_settlement: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Owner exit: cancels an auction nobody bid on, or sweeps an expired escrow
/// (unexercised collateral plus settlement tokens posted by unpaid borrowers)
pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let escrow = &mut ctx.accounts.escrow;
    escrow.enter()?;
    let kind = escrow.withdraw(now)?;
    ctx.accounts.escrow.exit(&crate::ID)?;

    let collateral_amount = ctx.accounts.collateral_vault.amount;
    let settlement_amount = match kind {
        WithdrawKind::CancelAuction => 0,
        WithdrawKind::Sweep => ctx.accounts.settlement_vault.amount,
    };

    let token_program = ctx.accounts.token_program.to_account_info();
    let seeds = EscrowSeeds::new(&ctx.accounts.escrow);
    let signer = seeds.signer();
    let escrow_info = ctx.accounts.escrow.to_account_info();

    transfer_tokens(
        token_program.clone(),
        ctx.accounts.collateral_vault.to_account_info(),
        ctx.accounts.owner_collateral.to_account_info(),
        &ctx.accounts.collateral_mint,
        escrow_info.clone(),
        &[&signer[..]],
        collateral_amount,
    )?;
    transfer_tokens(
        token_program,
        ctx.accounts.settlement_vault.to_account_info(),
        ctx.accounts.owner_settlement.to_account_info(),
        &ctx.accounts.settlement_mint,
        escrow_info,
        &[&signer[..]],
        settlement_amount,
    )?;

    emit!(Withdrawn {
        escrow: ctx.accounts.escrow.key(),
        owner: ctx.accounts.owner.key(),
        collateral_amount,
        settlement_amount,
        auction_cancelled: kind == WithdrawKind::CancelAuction,
    });
    msg!(
        "Withdrew {} collateral and {} settlement ({:?})",
        collateral_amount,
        settlement_amount,
        kind
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
