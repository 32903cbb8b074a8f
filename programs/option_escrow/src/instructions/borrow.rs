use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use fee_handler::FeeConfig;

use crate::constants::{BORROW_SEED, ESCROW_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::events::Borrowed;
use crate::state::{BorrowPosition, Escrow, Router};
use crate::utils::fees::{checked_fee_recipient, FeeSchedule};
use crate::utils::pda::EscrowSeeds;
use crate::utils::transfer::{burn_claims, transfer_tokens};

#[derive(Accounts)]
pub struct BorrowCollateral<'info> {
    #[account(mut)]
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
        init_if_needed,
        payer = borrower,
        space = 8 + BorrowPosition::INIT_SPACE,
        seeds = [BORROW_SEED, escrow.key().as_ref(), borrower.key().as_ref()],
        bump
    )]
    pub borrow_position: Box<Account<'info, BorrowPosition>>,

    #[account(mut)]
    pub claim_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = claim_mint,
        token::authority = borrower,
    )]
    pub borrower_claims: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = escrow.option_info.collateral_mint @ ErrorCode::InvalidTokenPair)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = escrow.option_info.settlement_mint @ ErrorCode::InvalidTokenPair)]
    pub settlement_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub settlement_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = collateral_mint)]
    pub borrower_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = settlement_mint,
        token::authority = borrower,
    )]
    pub borrower_settlement: Box<InterfaceAccount<'info, TokenAccount>>,

    pub fee_config: Option<Account<'info, FeeConfig>>,

    #[account(mut)]
    pub fee_sink_settlement: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Borrows `amount` collateral against the borrower's claims.
///
/// The claims are burned and strike × amount settlement tokens are posted,
/// plus the exercise-rate fee. Repaying re-mints the claims.
pub fn handler(ctx: Context<BorrowCollateral>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let fees = FeeSchedule::resolve(&ctx.accounts.router, ctx.accounts.fee_config.as_ref(), None)?;

    // 1. Effects
    let escrow_key = ctx.accounts.escrow.key();
    let borrower = ctx.accounts.borrower.key();
    let escrow = &mut ctx.accounts.escrow;
    escrow.enter()?;
    let posted = escrow.borrow(amount, now)?;
    let fee = fees.exercise_fee_on(posted)?;

    let position = &mut ctx.accounts.borrow_position;
    if position.escrow == Pubkey::default() {
        position.escrow = escrow_key;
        position.borrower = borrower;
        position.bump = ctx.bumps.borrow_position;
    }
    position.record(amount, posted)?;
    ctx.accounts.escrow.exit(&crate::ID)?;

    // 2. Claims burned, settlement collateral and fee posted
    let token_program = ctx.accounts.token_program.to_account_info();
    let borrower_info = ctx.accounts.borrower.to_account_info();
    burn_claims(
        token_program.clone(),
        ctx.accounts.claim_mint.to_account_info(),
        ctx.accounts.borrower_claims.to_account_info(),
        borrower_info.clone(),
        amount,
    )?;
    transfer_tokens(
        token_program.clone(),
        ctx.accounts.borrower_settlement.to_account_info(),
        ctx.accounts.settlement_vault.to_account_info(),
        &ctx.accounts.settlement_mint,
        borrower_info.clone(),
        &[],
        posted,
    )?;
    if fee > 0 {
        let sink = checked_fee_recipient(
            ctx.accounts.fee_sink_settlement.as_ref(),
            fees.fee_sink,
            &ctx.accounts.settlement_mint.key(),
        )?;
        transfer_tokens(
            token_program.clone(),
            ctx.accounts.borrower_settlement.to_account_info(),
            sink.to_account_info(),
            &ctx.accounts.settlement_mint,
            borrower_info,
            &[],
            fee,
        )?;
    }

    // 3. Collateral out to the borrower
    let seeds = EscrowSeeds::new(&ctx.accounts.escrow);
    let signer = seeds.signer();
    transfer_tokens(
        token_program,
        ctx.accounts.collateral_vault.to_account_info(),
        ctx.accounts.borrower_collateral.to_account_info(),
        &ctx.accounts.collateral_mint,
        ctx.accounts.escrow.to_account_info(),
        &[&signer[..]],
        amount,
    )?;

    emit!(Borrowed {
        escrow: escrow_key,
        borrower,
        amount,
        collateral_posted: posted,
        fee,
    });
    msg!(
        "Borrowed {} collateral against {} posted (fee {}). Escrow total borrowed: {}",
        amount,
        posted,
        fee,
        ctx.accounts.escrow.total_borrowed
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
