use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{ESCROW_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::events::Redeemed;
use crate::state::{Escrow, Router};
use crate::utils::pda::EscrowSeeds;
use crate::utils::transfer::{burn_claims, transfer_tokens};

#[derive(Accounts)]
pub struct Redeem<'info> {
    pub owner: Signer<'info>,

    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, router.key().as_ref(), escrow.index.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = router @ ErrorCode::UnknownEscrow,
        has_one = owner @ ErrorCode::Unauthorized,
        has_one = claim_mint,
        has_one = collateral_vault,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    #[account(mut)]
    pub claim_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = claim_mint,
        token::authority = owner,
    )]
    pub owner_claims: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = escrow.option_info.collateral_mint @ ErrorCode::InvalidTokenPair)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = collateral_mint)]
    pub owner_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Burns every claim the owner holds for a pro-rata share of the collateral vault
pub fn handler(ctx: Context<Redeem>) -> Result<()> {
    let claims = ctx.accounts.owner_claims.amount;
    let vault_balance = ctx.accounts.collateral_vault.amount;

    let escrow = &mut ctx.accounts.escrow;
    escrow.enter()?;
    let payout = escrow.redeem(claims, vault_balance)?;
    ctx.accounts.escrow.exit(&crate::ID)?;

    let token_program = ctx.accounts.token_program.to_account_info();
    burn_claims(
        token_program.clone(),
        ctx.accounts.claim_mint.to_account_info(),
        ctx.accounts.owner_claims.to_account_info(),
        ctx.accounts.owner.to_account_info(),
        claims,
    )?;

    let seeds = EscrowSeeds::new(&ctx.accounts.escrow);
    let signer = seeds.signer();
    transfer_tokens(
        token_program,
        ctx.accounts.collateral_vault.to_account_info(),
        ctx.accounts.owner_collateral.to_account_info(),
        &ctx.accounts.collateral_mint,
        ctx.accounts.escrow.to_account_info(),
        &[&signer[..]],
        payout,
    )?;

    emit!(Redeemed {
        escrow: ctx.accounts.escrow.key(),
        owner: ctx.accounts.owner.key(),
        claims_burned: claims,
        collateral_amount: payout,
    });
    msg!(
        "Redeemed {} claims for {} collateral. Remaining claims: {}",
        claims,
        payout,
        ctx.accounts.escrow.claim_supply
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
