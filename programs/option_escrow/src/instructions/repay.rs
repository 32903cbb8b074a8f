use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{BORROW_SEED, ESCROW_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::events::Repaid;
use crate::state::{BorrowPosition, Escrow, Router};
use crate::utils::pda::EscrowSeeds;
use crate::utils::transfer::{mint_claims, transfer_tokens};

#[derive(Accounts)]
pub struct RepayBorrow<'info> {
    pub borrower: Signer<'info>,

    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, router.key().as_ref(), escrow.index.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = router @ ErrorCode::UnknownEscrow,
        has_one = claim_mint,
        has_one = collateral_vault,
        has_one = settlement_vault,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    #[account(
        mut,
        seeds = [BORROW_SEED, escrow.key().as_ref(), borrower.key().as_ref()],
        bump = borrow_position.bump,
        has_one = escrow,
        has_one = borrower @ ErrorCode::Unauthorized,
    )]
    pub borrow_position: Box<Account<'info, BorrowPosition>>,

    #[account(mut)]
    pub claim_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, token::mint = claim_mint)]
    pub borrower_claims: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = escrow.option_info.collateral_mint @ ErrorCode::InvalidTokenPair)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = escrow.option_info.settlement_mint @ ErrorCode::InvalidTokenPair)]
    pub settlement_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub settlement_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = borrower,
    )]
    pub borrower_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = settlement_mint)]
    pub borrower_settlement: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Returns `amount` borrowed collateral, releasing the matching share of
/// posted settlement tokens and re-minting the claims
pub fn handler(ctx: Context<RepayBorrow>, amount: u64) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    escrow.enter()?;
    let returned = ctx.accounts.borrow_position.repay(amount)?;
    escrow.repay(amount, returned)?;
    ctx.accounts.escrow.exit(&crate::ID)?;

    let token_program = ctx.accounts.token_program.to_account_info();
    transfer_tokens(
        token_program.clone(),
        ctx.accounts.borrower_collateral.to_account_info(),
        ctx.accounts.collateral_vault.to_account_info(),
        &ctx.accounts.collateral_mint,
        ctx.accounts.borrower.to_account_info(),
        &[],
        amount,
    )?;

    let seeds = EscrowSeeds::new(&ctx.accounts.escrow);
    let signer = seeds.signer();
    let escrow_info = ctx.accounts.escrow.to_account_info();
    transfer_tokens(
        token_program.clone(),
        ctx.accounts.settlement_vault.to_account_info(),
        ctx.accounts.borrower_settlement.to_account_info(),
        &ctx.accounts.settlement_mint,
        escrow_info.clone(),
        &[&signer[..]],
        returned,
    )?;
    mint_claims(
        token_program,
        ctx.accounts.claim_mint.to_account_info(),
        ctx.accounts.borrower_claims.to_account_info(),
        escrow_info,
        &[&signer[..]],
        amount,
    )?;

    emit!(Repaid {
        escrow: ctx.accounts.escrow.key(),
        borrower: ctx.accounts.borrower.key(),
        amount,
        collateral_returned: returned,
    });
    msg!(
        "Repaid {} collateral, {} posted collateral returned. Still owed: {}",
        amount,
        returned,
        ctx.accounts.borrow_position.borrowed
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
