use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{
    CLAIM_MINT_SEED, COLLATERAL_VAULT_SEED, ESCROW_SEED, ROUTER_SEED, SETTLEMENT_VAULT_SEED,
};
use crate::events::EscrowCreated;
use crate::state::{AuctionInit, Escrow, EscrowKeys, Router};
use crate::utils::transfer::transfer_tokens;

/// Creates escrow number `router.num_escrows` and opens a Dutch auction on it
#[derive(Accounts)]
pub struct CreateAuction<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(mut, seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        init,
        payer = owner,
        space = 8 + Escrow::INIT_SPACE,
        seeds = [
            ESCROW_SEED,
            router.key().as_ref(),
            router.num_escrows.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    #[account(mint::token_program = token_program)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_program)]
    pub settlement_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        seeds = [CLAIM_MINT_SEED, escrow.key().as_ref()],
        bump,
        mint::decimals = collateral_mint.decimals,
        mint::authority = escrow,
        mint::token_program = token_program,
    )]
    pub claim_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        seeds = [COLLATERAL_VAULT_SEED, escrow.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = escrow,
        token::token_program = token_program,
    )]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [SETTLEMENT_VAULT_SEED, escrow.key().as_ref()],
        bump,
        token::mint = settlement_mint,
        token::authority = escrow,
        token::token_program = token_program,
    )]
    pub settlement_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = owner,
    )]
    pub owner_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateAuction>, init: AuctionInit) -> Result<()> {
    let router_key = ctx.accounts.router.key();
    let escrow_key = ctx.accounts.escrow.key();
    let index = ctx.accounts.router.next_index()?;

    let escrow = &mut ctx.accounts.escrow;
    escrow.register(EscrowKeys {
        router: router_key,
        owner: ctx.accounts.owner.key(),
        index,
        bump: ctx.bumps.escrow,
        claim_mint: ctx.accounts.claim_mint.key(),
        collateral_vault: ctx.accounts.collateral_vault.key(),
        settlement_vault: ctx.accounts.settlement_vault.key(),
        collateral_decimals: ctx.accounts.collateral_mint.decimals,
        settlement_decimals: ctx.accounts.settlement_mint.decimals,
    })?;
    escrow.enter()?;
    escrow.initialize_auction(
        ctx.accounts.collateral_mint.key(),
        ctx.accounts.settlement_mint.key(),
        &init,
    )?;
    ctx.accounts.escrow.exit(&crate::ID)?;

    // Pull the full notional up front; the auction can only be cancelled, not topped up
    transfer_tokens(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.owner_collateral.to_account_info(),
        ctx.accounts.collateral_vault.to_account_info(),
        &ctx.accounts.collateral_mint,
        ctx.accounts.owner.to_account_info(),
        &[],
        init.notional,
    )?;

    emit!(EscrowCreated {
        escrow: escrow_key,
        owner: ctx.accounts.owner.key(),
        index,
        notional: init.notional,
        path: 0,
    });
    msg!(
        "Auction opened on escrow #{} ({}): {} collateral, premium {} -> {}",
        index,
        escrow_key,
        init.notional,
        init.params.rel_premium_start,
        init.params.rel_premium_floor
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
